//! Linker script patching.
//!
//! The script is read once up front and every write during a run goes
//! through the same [`LinkerScript`] value, so the original text can
//! always be put back — including when a build fails mid-run.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct LinkerScript {
    path: PathBuf,
    original: String,
}

impl LinkerScript {
    pub fn load(path: &Path) -> Result<Self> {
        let original = fs::read_to_string(path)
            .with_context(|| format!("failed to read linker script {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            original,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Write the script with every occurrence of `base_token` replaced by
    /// `addr_token`. A script without the base token would make the
    /// substitution a silent no-op, so that is an error.
    pub fn patch(&self, base_token: &str, addr_token: &str) -> Result<()> {
        if !self.original.contains(base_token) {
            bail!(
                "linker script {} does not contain the base address {base_token}",
                self.path.display()
            );
        }
        let patched = self.original.replace(base_token, addr_token);
        fs::write(&self.path, patched)
            .with_context(|| format!("failed to write linker script {}", self.path.display()))
    }

    /// Put the original text back.
    pub fn restore(&self) -> Result<()> {
        fs::write(&self.path, &self.original)
            .with_context(|| format!("failed to restore linker script {}", self.path.display()))
    }

    /// Guard that restores the original text when dropped.
    pub fn restore_guard(&self) -> RestoreGuard<'_> {
        RestoreGuard {
            script: self,
            armed: true,
        }
    }
}

pub struct RestoreGuard<'a> {
    script: &'a LinkerScript,
    armed: bool,
}

impl RestoreGuard<'_> {
    /// Restore now, surfacing the I/O result instead of swallowing it in
    /// the drop path.
    pub fn finish(mut self) -> Result<()> {
        self.armed = false;
        self.script.restore()
    }
}

impl Drop for RestoreGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.script.restore();
        }
    }
}
