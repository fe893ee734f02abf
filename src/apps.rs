//! Application discovery.
//!
//! The apps are the `*.rs` files of the bin source directory. Ids follow
//! lexicographic file-name order, and an app's binary name is its file
//! name up to the first `.` (so `00hello.rs` builds `--bin 00hello`).

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// One discovered application source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSource {
    /// Slot index in sorted order, starting at 0.
    pub id: usize,
    /// Binary name derived from the file name.
    pub name: String,
    /// Source file path.
    pub path: PathBuf,
}

/// Discover the applications under `bin_dir`, sorted by file name.
pub fn discover(bin_dir: &Path) -> Result<Vec<AppSource>> {
    let entries = std::fs::read_dir(bin_dir)
        .with_context(|| format!("failed to read bin directory {}", bin_dir.display()))?;

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", bin_dir.display()))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(file_name) => files.push((file_name.to_string(), path)),
            None => bail!("non-UTF-8 file name in {}", bin_dir.display()),
        }
    }
    files.sort();

    let mut apps: Vec<AppSource> = Vec::with_capacity(files.len());
    for (id, (file_name, path)) in files.into_iter().enumerate() {
        let name = match file_name.split('.').next() {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => bail!("cannot derive an app name from {file_name:?}"),
        };
        if let Some(prev) = apps.iter().find(|a| a.name == name) {
            bail!(
                "apps {} and {} both map to binary name {:?}",
                prev.path.display(),
                path.display(),
                name
            );
        }
        apps.push(AppSource { id, name, path });
    }
    Ok(apps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "fn main() {}\n").unwrap();
    }

    #[test]
    fn test_discover_sorts_and_stems() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "01store_fault.rs");
        touch(tmp.path(), "00hello.rs");
        touch(tmp.path(), "02power.rs");

        let apps = discover(tmp.path()).unwrap();
        let names: Vec<_> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["00hello", "01store_fault", "02power"]);
        assert_eq!(apps[0].id, 0);
        assert_eq!(apps[2].id, 2);
    }

    #[test]
    fn test_name_stops_at_first_dot() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "cat.v2.rs");

        let apps = discover(tmp.path()).unwrap();
        assert_eq!(apps[0].name, "cat");
    }

    #[test]
    fn test_non_source_entries_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "00hello.rs");
        std::fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        std::fs::create_dir(tmp.path().join("subdir")).unwrap();

        let apps = discover(tmp.path()).unwrap();
        assert_eq!(apps.len(), 1);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "cat.rs");
        touch(tmp.path(), "cat.old.rs");

        assert!(discover(tmp.path()).is_err());
    }

    #[test]
    fn test_missing_dir_is_an_error() {
        assert!(discover(Path::new("/nonexistent/bin")).is_err());
    }
}
