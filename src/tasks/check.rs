use anyhow::Result;

use crate::apps;
use crate::config::Config;
use crate::toolchain;

/// Verify that every app's binary has been built. One status line per
/// app; exits non-zero if anything is missing.
pub fn run(cfg: &Config) -> Result<()> {
    let apps = apps::discover(&cfg.bin_dir)?;

    let mut fail = false;
    for app in &apps {
        let binary = toolchain::binary_path(cfg, app);
        if binary.is_file() {
            eprintln!("[ok] {}: {}", app.name, binary.display());
        } else {
            fail = true;
            eprintln!("[bad] {}: missing {}", app.name, binary.display());
        }
    }

    if fail {
        std::process::exit(1);
    }
    Ok(())
}
