use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "appstage")]
#[command(about = "Build each userspace app at its own staged load address")]
pub struct Cli {
    /// Config file (defaults to <app-dir>/appstage.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Application package directory (contains the apps' Cargo.toml).
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub app_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Build every app at its staged address (patches the linker script
    /// per app, restores it afterwards).
    Build {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// List discovered apps and the addresses they would be linked at.
    List {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Verify that every app's binary has been built.
    Check {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Generate the embedding assembly (link_app.S) from built binaries.
    Embed {
        /// Output path for the generated assembly.
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Remove generated artifacts (manifest, embedding assembly).
    Clean {
        /// Also run `cargo clean` in the application package.
        #[arg(long)]
        all: bool,
    },

    /// Check that the external toolchain and input files are in place.
    Doctor {
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Per-run overrides for values that otherwise come from the config file.
#[derive(Args, Clone, Debug, Default)]
pub struct Overrides {
    /// Base load address of app 0 (hex or decimal).
    #[arg(long, value_name = "ADDR", value_parser = parse_addr)]
    pub base_address: Option<u64>,

    /// Address distance between consecutive apps (hex or decimal).
    #[arg(long, value_name = "ADDR", value_parser = parse_addr)]
    pub step: Option<u64>,

    /// Target triple passed to cargo (e.g. riscv64gc-unknown-none-elf).
    #[arg(long, value_name = "TRIPLE")]
    pub target: Option<String>,
}

/// Parse an address argument, accepting `0x…` hex or plain decimal.
pub fn parse_addr(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address {s:?}: {e}"))
}
