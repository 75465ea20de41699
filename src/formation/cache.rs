//! Time-boxed on-disk cache for the global recommendation
//!
//! The global ranking only changes when the catalog or the search limits do,
//! so it is computed at most once per TTL and reused from disk otherwise.
//! Each entry carries a fingerprint of those inputs; an entry whose
//! fingerprint differs is stale regardless of age. A missing or unreadable
//! cache file just means "recompute".

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::HeroCatalog;
use crate::core::error::Result;
use crate::formation::search::Recommendation;

/// Identity of the inputs a global recommendation is computed from
pub fn fingerprint(catalog: &HeroCatalog, max_size: u32, top_n: usize) -> String {
    let mut parts = vec![format!("max_size={}", max_size), format!("top_n={}", top_n)];
    for hero in catalog.iter() {
        let effects: Vec<String> = hero
            .effects
            .iter()
            .map(|e| format!("{}:{}:{}", e.category, e.variant, e.magnitude))
            .collect();
        parts.push(format!("{}[{}]", hero.name, effects.join(",")));
    }
    parts.join(";")
}

/// Snapshot of a global recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRecommendation {
    pub timestamp: DateTime<Utc>,
    /// Files written before fingerprints existed read as "" and never match
    #[serde(default)]
    pub fingerprint: String,
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

/// Whether a recommendation came from disk or was just computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Refreshed,
}

#[derive(Debug, Clone)]
pub struct RecommendationCache {
    path: PathBuf,
    ttl: Duration,
    fingerprint: String,
}

impl RecommendationCache {
    /// `fingerprint` identifies the inputs of the values this cache holds
    pub fn new(path: impl Into<PathBuf>, ttl: Duration, fingerprint: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ttl,
            fingerprint: fingerprint.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache; any failure is logged and treated as empty
    pub fn load(&self) -> Option<CachedRecommendation> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Could not read recommendation cache {:?}: {}", self.path, e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(cached) => Some(cached),
            Err(e) => {
                tracing::warn!("Ignoring corrupt recommendation cache {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn save(&self, cached: &CachedRecommendation) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string(cached)?)?;
        Ok(())
    }

    /// True if `cached` came from the same inputs and is younger than the TTL at `now`
    pub fn is_fresh(&self, cached: &CachedRecommendation, now: DateTime<Utc>) -> bool {
        cached.fingerprint == self.fingerprint
            && now.signed_duration_since(cached.timestamp) < self.ttl
    }

    /// Reuse the cached recommendation if fresh, otherwise compute and store a new one
    ///
    /// A failed write is logged; the freshly computed value is still returned.
    pub fn get_or_refresh<F>(
        &self,
        now: DateTime<Utc>,
        compute: F,
    ) -> Result<(Recommendation, CacheStatus)>
    where
        F: FnOnce() -> Result<Recommendation>,
    {
        if let Some(cached) = self.load() {
            if self.is_fresh(&cached, now) {
                tracing::debug!("Using cached recommendation from {}", cached.timestamp);
                return Ok((cached.recommendation, CacheStatus::Hit));
            }
        }

        let recommendation = compute()?;
        let cached = CachedRecommendation {
            timestamp: now,
            fingerprint: self.fingerprint.clone(),
            recommendation,
        };
        match self.save(&cached) {
            Ok(()) => tracing::info!("Refreshed recommendation cache at {:?}", self.path),
            Err(e) => tracing::warn!("Could not write recommendation cache {:?}: {}", self.path, e),
        }
        Ok((cached.recommendation, CacheStatus::Refreshed))
    }
}
