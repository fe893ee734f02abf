//! appstage — per-application staged-address build tool.
//!
//! A multi-application userspace without virtual memory needs every app
//! linked at its own load address. This tool enumerates the app sources,
//! rewrites the shared linker script's base-address constant per app
//! (`base + id * step`), and invokes cargo once per app, strictly
//! sequentially, restoring the script afterwards.
//!
//! Structure:
//! - `cli` / `app` - command-line surface and dispatch
//! - `config` - defaults, `appstage.toml`, CLI overrides
//! - `apps` - application discovery
//! - `layout` - staged address arithmetic
//! - `linker` - linker script patch/restore
//! - `toolchain` - cargo invocation and artifact paths
//! - `manifest` - JSON record of a completed run
//! - `embed` - `link_app.S` generation for the kernel loader
//! - `tasks/` - one module per subcommand

pub mod app;
pub mod apps;
pub mod cli;
pub mod config;
pub mod embed;
pub mod layout;
pub mod linker;
pub mod manifest;
pub mod tasks;
pub mod toolchain;

pub use apps::AppSource;
pub use config::Config;
pub use layout::AddressLayout;
pub use linker::LinkerScript;
