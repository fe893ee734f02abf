//! Cargo invocation and artifact paths.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::Command;

use crate::apps::AppSource;
use crate::config::Config;

/// Build one application: `cargo build --bin <name> --release`, run in
/// the app package directory. Blocking; the staging loop relies on the
/// linker script state on disk while the child runs, so there is exactly
/// one invocation at a time.
pub fn build_app(cfg: &Config, app: &AppSource) -> Result<()> {
    let mut cmd = Command::new(&cfg.cargo);
    cmd.current_dir(&cfg.app_dir);
    cmd.args(["build", "--bin", &app.name, "--release"]);
    if let Some(target) = &cfg.target {
        cmd.args(["--target", target]);
    }

    let status = cmd
        .status()
        .with_context(|| format!("failed to run `{}` for app {}", cfg.cargo, app.name))?;
    if !status.success() {
        bail!("build failed for app {} ({status})", app.name);
    }
    Ok(())
}

/// Expected path of the built binary for `app`:
/// `<app-dir>/target[/<triple>]/release/<name>`.
pub fn binary_path(cfg: &Config, app: &AppSource) -> PathBuf {
    let mut dir = cfg.app_dir.join("target");
    if let Some(target) = &cfg.target {
        dir = dir.join(target);
    }
    dir.join("release").join(&app.name)
}

/// Whether `triple` is installed, per `rustup target list --installed`.
pub fn target_installed(triple: &str) -> Result<bool> {
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
        .context("failed to run rustup")?;
    if !output.status.success() {
        bail!("rustup target list failed ({})", output.status);
    }
    let installed = String::from_utf8_lossy(&output.stdout);
    Ok(installed.lines().any(|line| line.trim() == triple))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Overrides;
    use std::path::Path;

    fn config(target: Option<&str>) -> Config {
        let cli = Overrides {
            target: target.map(str::to_string),
            ..Overrides::default()
        };
        Config::resolve(None, Some(PathBuf::from("user")), &cli).unwrap()
    }

    fn app() -> AppSource {
        AppSource {
            id: 0,
            name: "00hello".into(),
            path: PathBuf::from("user/src/bin/00hello.rs"),
        }
    }

    #[test]
    fn test_binary_path_host() {
        let cfg = config(None);
        assert_eq!(
            binary_path(&cfg, &app()),
            Path::new("user/target/release/00hello")
        );
    }

    #[test]
    fn test_binary_path_with_target() {
        let cfg = config(Some("riscv64gc-unknown-none-elf"));
        assert_eq!(
            binary_path(&cfg, &app()),
            Path::new("user/target/riscv64gc-unknown-none-elf/release/00hello")
        );
    }
}
