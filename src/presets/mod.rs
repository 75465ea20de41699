//! Durable per-user team presets

mod store;

pub use store::{PresetFile, PresetStore};
