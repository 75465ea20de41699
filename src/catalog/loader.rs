//! Load a hero catalog from TOML

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::hero::{Hero, HeroCatalog};
use crate::core::error::Result;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "hero", default)]
    heroes: Vec<Hero>,
}

/// Parse catalog TOML of the form `[[hero]] name = ".." effects = [..]`
pub fn parse_catalog_toml(content: &str) -> Result<HeroCatalog> {
    let file: CatalogFile = toml::from_str(content)?;
    HeroCatalog::new(file.heroes)
}

/// Load a catalog file from disk
pub fn load_catalog(path: &Path) -> Result<HeroCatalog> {
    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog_toml(&content)?;
    tracing::info!("Loaded {} heroes from {:?}", catalog.len(), path);
    Ok(catalog)
}
