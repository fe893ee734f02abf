use anyhow::Result;

use crate::apps;
use crate::config::Config;
use crate::layout::{hex_token, AddressLayout};

/// Print the discovered apps and the addresses they would be linked at.
pub fn run(cfg: &Config) -> Result<()> {
    let layout = AddressLayout::new(cfg.base_address, cfg.step)?;
    let apps = apps::discover(&cfg.bin_dir)?;
    if apps.is_empty() {
        println!("no applications in {}", cfg.bin_dir.display());
        return Ok(());
    }

    for app in &apps {
        println!(
            "{:>3}  {}  {}",
            app.id,
            hex_token(layout.address_of(app.id)?),
            app.name
        );
    }
    Ok(())
}
