use anyhow::{bail, Result};

use crate::config::Config;
use crate::layout::{hex_token, AddressLayout};
use crate::toolchain;

/// Check that the toolchain and the input files are in place.
pub fn run(cfg: &Config) -> Result<()> {
    let mut ok = true;

    if which::which(&cfg.cargo).is_err() {
        eprintln!("[FAIL] missing `{}` in PATH", cfg.cargo);
        ok = false;
    } else {
        eprintln!("[OK] {}", cfg.cargo);
    }

    if cfg.bin_dir.is_dir() {
        eprintln!("[OK] {}", cfg.bin_dir.display());
    } else {
        eprintln!("[FAIL] missing bin directory: {}", cfg.bin_dir.display());
        ok = false;
    }

    let layout = AddressLayout::new(cfg.base_address, cfg.step)?;
    match std::fs::read_to_string(&cfg.linker_script) {
        Ok(text) if text.contains(&layout.base_token()) => {
            eprintln!("[OK] {}", cfg.linker_script.display());
        }
        Ok(_) => {
            eprintln!(
                "[FAIL] {} does not contain the base address {}",
                cfg.linker_script.display(),
                hex_token(cfg.base_address)
            );
            ok = false;
        }
        Err(_) => {
            eprintln!(
                "[FAIL] missing linker script: {}",
                cfg.linker_script.display()
            );
            ok = false;
        }
    }

    if let Some(target) = &cfg.target {
        match toolchain::target_installed(target) {
            Ok(true) => eprintln!("[OK] target {target}"),
            Ok(false) => {
                eprintln!("[FAIL] target {target} not installed (rustup target add {target})");
                ok = false;
            }
            Err(e) => {
                eprintln!("[FAIL] cannot query rustup: {e:#}");
                ok = false;
            }
        }
    }

    if !ok {
        bail!("doctor checks failed");
    }
    Ok(())
}
