//! JSON record of a completed staging run, written next to the build
//! artifacts for humans and downstream tooling.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::layout::{hex_token, AddressLayout};

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildManifest {
    pub generated_at: String,
    pub base_address: String,
    pub step: String,
    pub apps: Vec<ManifestEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: usize,
    pub name: String,
    pub source: String,
    pub address: String,
    pub binary: String,
}

impl BuildManifest {
    pub fn new(layout: AddressLayout, apps: Vec<ManifestEntry>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            base_address: hex_token(layout.base),
            step: hex_token(layout.step),
            apps,
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write manifest {}", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse manifest {}", path.display()))
    }
}
