//! Hero catalog: the static buff table every calculation reads from

pub mod hero;
mod loader;

pub use hero::{Hero, HeroCatalog};
pub use loader::{load_catalog, parse_catalog_toml};
