//! Bot configuration with documented defaults
//!
//! Every knob the front-end and the formation search read lives here.
//! Values can be overridden from a TOML file; missing keys keep their defaults.

use crate::core::error::{Result, SkillModError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the calculator front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    // === STORAGE ===
    /// Directory holding presets, the recommendation cache and optional data files
    pub data_dir: PathBuf,

    /// Preset store file name, relative to `data_dir`
    pub presets_file: String,

    /// Recommendation cache file name, relative to `data_dir`
    pub recommend_cache_file: String,

    /// Optional hero catalog TOML, relative to `data_dir`
    ///
    /// When unset the built-in catalog is used.
    pub catalog_file: Option<String>,

    // === FORMATION SEARCH ===
    /// Largest team the search will build
    ///
    /// The search is exponential in this value. At 4 with the built-in
    /// catalog of 12 heroes it evaluates under 2000 candidates.
    pub max_team_size: u32,

    /// How many formations to surface per objective
    pub top_n: usize,

    /// Age after which the cached global ranking is recomputed
    pub recommend_cache_ttl_hours: i64,

    // === FRONT-END ===
    /// Maximum hero names returned by autocomplete
    ///
    /// 25 matches the choice limit chat platforms put on autocomplete lists.
    pub autocomplete_limit: usize,

    /// tracing-subscriber env filter used by the binaries
    pub log_filter: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            presets_file: "presets.json".into(),
            recommend_cache_file: "recommend_cache.json".into(),
            catalog_file: None,

            max_team_size: 4,
            top_n: 2,
            recommend_cache_ttl_hours: 24,

            autocomplete_limit: 25,
            log_filter: "skillmod=info".into(),
        }
    }
}

impl BotConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BotConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        validate_search_limits(self.max_team_size, self.top_n)?;

        if self.recommend_cache_ttl_hours < 0 {
            return Err(SkillModError::Config(
                "recommend_cache_ttl_hours must not be negative".into(),
            ));
        }

        if self.presets_file.is_empty() || self.recommend_cache_file.is_empty() {
            return Err(SkillModError::Config("storage file names must not be empty".into()));
        }

        Ok(())
    }

    pub fn presets_path(&self) -> PathBuf {
        self.data_dir.join(&self.presets_file)
    }

    pub fn recommend_cache_path(&self) -> PathBuf {
        self.data_dir.join(&self.recommend_cache_file)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_file.as_ref().map(|f| self.data_dir.join(f))
    }
}

/// Bounds for a formation search; shared by config files and the headless runner
pub fn validate_search_limits(max_team_size: u32, top_n: usize) -> Result<()> {
    if max_team_size == 0 {
        return Err(SkillModError::Config("max_team_size must be at least 1".into()));
    }

    // Keeps the search bounded; beyond this the multiset count explodes
    if max_team_size > 8 {
        return Err(SkillModError::Config(format!(
            "max_team_size ({}) should be <= 8",
            max_team_size
        )));
    }

    if top_n == 0 {
        return Err(SkillModError::Config("top_n must be at least 1".into()));
    }

    Ok(())
}
