//! The staging pipeline: patch, build, restore — once per app, in order.

use anyhow::{bail, Result};

use crate::apps;
use crate::config::Config;
use crate::layout::{hex_token, AddressLayout};
use crate::linker::LinkerScript;
use crate::manifest::{BuildManifest, ManifestEntry};
use crate::toolchain;

/// Build every application at its staged address.
///
/// Strictly sequential: the linker script on disk is shared state, so
/// each cargo invocation must finish before the next patch.
pub fn run(cfg: &Config) -> Result<()> {
    let layout = AddressLayout::new(cfg.base_address, cfg.step)?;
    let apps = apps::discover(&cfg.bin_dir)?;
    if apps.is_empty() {
        bail!("no applications found in {}", cfg.bin_dir.display());
    }
    // Fail before the first build rather than after the last fitting one.
    layout.address_of(apps.len() - 1)?;

    let script = LinkerScript::load(&cfg.linker_script)?;
    let base_token = layout.base_token();
    println!(
        "🔧 Staging {} apps from {} (base {}, step {})",
        apps.len(),
        cfg.bin_dir.display(),
        base_token,
        hex_token(layout.step)
    );

    let guard = script.restore_guard();
    let mut entries = Vec::with_capacity(apps.len());
    for app in &apps {
        let addr_token = hex_token(layout.address_of(app.id)?);
        script.patch(&base_token, &addr_token)?;
        toolchain::build_app(cfg, app)?;
        println!("📦 app {} linked at {}", app.name, addr_token);

        entries.push(ManifestEntry {
            id: app.id,
            name: app.name.clone(),
            source: app.path.display().to_string(),
            address: addr_token,
            binary: toolchain::binary_path(cfg, app).display().to_string(),
        });
    }
    guard.finish()?;

    BuildManifest::new(layout, entries).write_to(&cfg.manifest)?;
    println!(
        "✅ {} apps staged; manifest at {}",
        apps.len(),
        cfg.manifest.display()
    );
    Ok(())
}
