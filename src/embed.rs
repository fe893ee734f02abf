//! Embedding assembly generation.
//!
//! The kernel loader finds the app images through a generated `link_app.S`:
//! `_num_app` holds the app count, then the start address of each image and
//! the final end address, and each image is a `.incbin` between
//! `app_<id>_start`/`app_<id>_end` symbols in `.data`.

use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::apps::{self, AppSource};
use crate::config::Config;
use crate::toolchain;

/// Render the assembly for `apps`, incbin-ing the matching `binaries`.
pub fn render(apps: &[AppSource], binaries: &[PathBuf]) -> String {
    let mut asm = String::new();
    let _ = writeln!(asm, "    .align 3");
    let _ = writeln!(asm, "    .section .data");
    let _ = writeln!(asm, "    .global _num_app");
    let _ = writeln!(asm, "_num_app:");
    let _ = writeln!(asm, "    .quad {}", apps.len());
    for app in apps {
        let _ = writeln!(asm, "    .quad app_{}_start", app.id);
    }
    if let Some(last) = apps.last() {
        let _ = writeln!(asm, "    .quad app_{}_end", last.id);
    }

    for (app, binary) in apps.iter().zip(binaries) {
        let _ = writeln!(asm);
        let _ = writeln!(asm, "    .section .data");
        let _ = writeln!(asm, "    .global app_{}_start", app.id);
        let _ = writeln!(asm, "    .global app_{}_end", app.id);
        let _ = writeln!(asm, "app_{}_start:", app.id);
        let _ = writeln!(asm, "    .incbin \"{}\"", binary.display());
        let _ = writeln!(asm, "app_{}_end:", app.id);
    }
    asm
}

/// Generate the embedding assembly from the built binaries. Every binary
/// must already exist — run `appstage build` first.
pub fn generate(cfg: &Config, out: Option<&Path>) -> Result<()> {
    let apps = apps::discover(&cfg.bin_dir)?;
    if apps.is_empty() {
        bail!("no applications found in {}", cfg.bin_dir.display());
    }

    let mut binaries = Vec::with_capacity(apps.len());
    for app in &apps {
        let binary = toolchain::binary_path(cfg, app);
        if !binary.is_file() {
            bail!(
                "missing binary for app {} at {} — run `appstage build` first",
                app.name,
                binary.display()
            );
        }
        binaries.push(binary);
    }

    let out = out.unwrap_or(&cfg.embed_asm);
    std::fs::write(out, render(&apps, &binaries))
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("📦 embedded {} apps into {}", apps.len(), out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: usize, name: &str) -> AppSource {
        AppSource {
            id,
            name: name.into(),
            path: PathBuf::from(format!("src/bin/{name}.rs")),
        }
    }

    #[test]
    fn test_render_table_and_images() {
        let apps = [app(0, "00hello"), app(1, "01store_fault")];
        let binaries = [
            PathBuf::from("target/release/00hello"),
            PathBuf::from("target/release/01store_fault"),
        ];

        let asm = render(&apps, &binaries);
        assert!(asm.contains("_num_app:\n    .quad 2\n"));
        assert!(asm.contains("    .quad app_0_start"));
        assert!(asm.contains("    .quad app_1_start"));
        assert!(asm.contains("    .quad app_1_end"));
        assert!(asm.contains("app_0_start:\n    .incbin \"target/release/00hello\"\napp_0_end:"));
        assert_eq!(asm.matches(".incbin").count(), 2);
    }

    #[test]
    fn test_render_empty_set_has_zero_count() {
        let asm = render(&[], &[]);
        assert!(asm.contains(".quad 0"));
        assert!(!asm.contains(".incbin"));
    }
}
