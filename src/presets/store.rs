//! Per-user named team presets in a single JSON file
//!
//! Layout: `{ "<user id>": { "<preset name>": "<team string>" } }`.
//! The whole file is read and rewritten on every save; concurrent saves are
//! last-write-wins.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, SkillModError};

/// user id -> preset name -> raw team string
pub type PresetFile = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every user's presets
    ///
    /// A missing file is an empty store. A file that does not parse is
    /// logged and also treated as empty.
    pub fn load_all(&self) -> Result<PresetFile> {
        match self.load_strict() {
            Err(SkillModError::SerdeError(e)) => {
                tracing::warn!("Preset file {:?} is unreadable, starting empty: {}", self.path, e);
                Ok(PresetFile::new())
            }
            other => other,
        }
    }

    /// Like `load_all`, but a file that does not parse is an error
    ///
    /// Writers go through this so they never replace data they could not read.
    fn load_strict(&self) -> Result<PresetFile> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PresetFile::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, presets: &PresetFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(presets)?)?;
        Ok(())
    }

    /// Create or overwrite one of `user`'s presets
    pub fn save(&self, user: &str, name: &str, team: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SkillModError::parse(name, "preset name must not be empty"));
        }

        let mut presets = self.load_strict()?;
        presets
            .entry(user.to_string())
            .or_default()
            .insert(name.to_string(), team.trim().to_string());
        self.write_all(&presets)?;

        tracing::info!("Saved preset '{}' for user {}", name, user);
        Ok(())
    }

    /// Raw team string of one preset
    pub fn load(&self, user: &str, name: &str) -> Result<String> {
        let name = name.trim();
        self.load_all()?
            .get(user)
            .and_then(|user_presets| user_presets.get(name))
            .cloned()
            .ok_or_else(|| SkillModError::PresetNotFound(name.to_string()))
    }

    /// Preset names of `user`, sorted
    pub fn list(&self, user: &str) -> Result<Vec<String>> {
        Ok(self
            .load_all()?
            .remove(user)
            .map(|user_presets| user_presets.into_keys().collect())
            .unwrap_or_default())
    }
}
