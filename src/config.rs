//! Run configuration: built-in defaults, optional `appstage.toml`,
//! CLI overrides — later layers win.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Overrides;

pub const DEFAULT_BASE_ADDRESS: u64 = 0x8040_0000;
pub const DEFAULT_STEP: u64 = 0x2_0000;
pub const DEFAULT_BIN_DIR: &str = "src/bin";
pub const DEFAULT_LINKER_SCRIPT: &str = "src/linker.ld";
pub const DEFAULT_EMBED_ASM: &str = "link_app.S";
pub const CONFIG_FILE: &str = "appstage.toml";
pub const MANIFEST_FILE: &str = "appstage-manifest.json";

/// On-disk configuration. Every field is optional; missing values fall
/// back to the defaults above.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub layout: Option<LayoutSection>,
    pub paths: Option<PathsSection>,
    pub build: Option<BuildSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutSection {
    /// Load address of app 0. TOML hex literals work: `base_address = 0x80400000`.
    pub base_address: Option<u64>,
    pub step: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsSection {
    /// Bin source directory, relative to the app package directory.
    pub bin_dir: Option<PathBuf>,
    /// Linker script, relative to the app package directory.
    pub linker_script: Option<PathBuf>,
    /// Generated embedding assembly, relative to the app package directory.
    pub embed_asm: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSection {
    /// Cargo program to invoke (defaults to `$CARGO`, then `cargo`).
    pub cargo: Option<String>,
    /// Target triple passed to every build.
    pub target: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Fully resolved configuration for one run. All paths are joined onto
/// the app package directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_address: u64,
    pub step: u64,
    pub app_dir: PathBuf,
    pub bin_dir: PathBuf,
    pub linker_script: PathBuf,
    pub embed_asm: PathBuf,
    pub manifest: PathBuf,
    pub cargo: String,
    pub target: Option<String>,
}

impl Config {
    /// Resolve the configuration for a run. An explicitly given config
    /// path must exist; the default `<app-dir>/appstage.toml` is optional.
    pub fn resolve(
        config_path: Option<&Path>,
        app_dir: Option<PathBuf>,
        overrides: &Overrides,
    ) -> Result<Self> {
        let app_dir = app_dir.unwrap_or_else(|| PathBuf::from("."));
        let file = match config_path {
            Some(path) => FileConfig::load(path)?,
            None => {
                let default = app_dir.join(CONFIG_FILE);
                if default.is_file() {
                    FileConfig::load(&default)?
                } else {
                    FileConfig::default()
                }
            }
        };
        Self::merge(app_dir, file, overrides)
    }

    fn merge(app_dir: PathBuf, file: FileConfig, overrides: &Overrides) -> Result<Self> {
        let layout = file.layout.unwrap_or_default();
        let paths = file.paths.unwrap_or_default();
        let build = file.build.unwrap_or_default();

        let base_address = overrides
            .base_address
            .or(layout.base_address)
            .unwrap_or(DEFAULT_BASE_ADDRESS);
        let step = overrides.step.or(layout.step).unwrap_or(DEFAULT_STEP);
        if step == 0 {
            bail!("address step must be nonzero");
        }

        let cargo = build
            .cargo
            .or_else(|| std::env::var("CARGO").ok())
            .unwrap_or_else(|| "cargo".to_string());
        let target = overrides.target.clone().or(build.target);

        let join = |p: Option<PathBuf>, default: &str| {
            app_dir.join(p.unwrap_or_else(|| PathBuf::from(default)))
        };
        let bin_dir = join(paths.bin_dir, DEFAULT_BIN_DIR);
        let linker_script = join(paths.linker_script, DEFAULT_LINKER_SCRIPT);
        let embed_asm = join(paths.embed_asm, DEFAULT_EMBED_ASM);
        let manifest = app_dir.join("target").join(MANIFEST_FILE);

        Ok(Self {
            base_address,
            step,
            app_dir,
            bin_dir,
            linker_script,
            embed_asm,
            manifest,
            cargo,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_constants() {
        let cfg = Config::resolve(None, Some(PathBuf::from("user")), &Overrides::default()).unwrap();
        assert_eq!(cfg.base_address, 0x8040_0000);
        assert_eq!(cfg.step, 0x2_0000);
        assert_eq!(cfg.bin_dir, PathBuf::from("user/src/bin"));
        assert_eq!(cfg.linker_script, PathBuf::from("user/src/linker.ld"));
    }

    #[test]
    fn test_file_config_layers_under_cli() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = tmp.path().join("appstage.toml");
        std::fs::write(
            &config,
            "[layout]\nbase_address = 0x1000\nstep = 0x100\n\n[build]\ncargo = \"cargo-stub\"\n",
        )
        .unwrap();

        let cfg = Config::resolve(Some(&config), Some(tmp.path().to_path_buf()), &Overrides::default())
            .unwrap();
        assert_eq!(cfg.base_address, 0x1000);
        assert_eq!(cfg.step, 0x100);
        assert_eq!(cfg.cargo, "cargo-stub");

        let cli = Overrides {
            base_address: Some(0x2000),
            step: None,
            target: Some("riscv64gc-unknown-none-elf".into()),
        };
        let cfg = Config::resolve(Some(&config), Some(tmp.path().to_path_buf()), &cli).unwrap();
        assert_eq!(cfg.base_address, 0x2000);
        assert_eq!(cfg.step, 0x100);
        assert_eq!(cfg.target.as_deref(), Some("riscv64gc-unknown-none-elf"));
    }

    #[test]
    fn test_default_config_file_is_picked_up() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[layout]\nstep = 0x8000\n").unwrap();

        let cfg = Config::resolve(None, Some(tmp.path().to_path_buf()), &Overrides::default()).unwrap();
        assert_eq!(cfg.step, 0x8000);
        assert_eq!(cfg.base_address, DEFAULT_BASE_ADDRESS);
    }

    #[test]
    fn test_zero_step_rejected() {
        let cli = Overrides {
            step: Some(0),
            ..Overrides::default()
        };
        assert!(Config::resolve(None, None, &cli).is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(Config::resolve(Some(&missing), None, &Overrides::default()).is_err());
    }
}
