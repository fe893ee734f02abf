use anyhow::{bail, Context, Result};
use std::process::Command;

use crate::config::Config;

/// Remove generated artifacts. With `all`, also run `cargo clean` in the
/// application package.
pub fn run(cfg: &Config, all: bool) -> Result<()> {
    println!("🧹 Cleaning...");
    for path in [&cfg.manifest, &cfg.embed_asm] {
        if path.exists() {
            let _ = std::fs::remove_file(path);
        }
    }

    if all {
        let status = Command::new(&cfg.cargo)
            .current_dir(&cfg.app_dir)
            .arg("clean")
            .status()
            .with_context(|| format!("failed to run `{} clean`", cfg.cargo))?;
        if !status.success() {
            bail!("cargo clean failed ({status})");
        }
    }
    Ok(())
}
