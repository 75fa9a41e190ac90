//! Diagram scaffolding

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{DiagramConfig, CONFIG_FILE};

/// Create `path` if needed and write a sample diagram.toml into it
pub fn create_project(path: &Path, name: &str) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let config = DiagramConfig::sample(name);
    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(())
}
