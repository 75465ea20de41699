//! Hero catalog - immutable table of heroes and their buffs
//!
//! Built once at startup and handed to everything that needs to resolve a
//! hero name. Name lookups are case-insensitive; the canonical spelling is
//! whatever the catalog entry uses.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SkillModError};
use crate::core::types::{Effect, EffectCategory};

/// A selectable hero and the buffs it contributes per copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub effects: Vec<Effect>,
}

impl Hero {
    pub fn new(name: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            name: name.into(),
            effects,
        }
    }
}

/// Read-only hero table with case-insensitive lookup
#[derive(Debug, Clone)]
pub struct HeroCatalog {
    /// Sorted case-insensitively by name
    heroes: Vec<Hero>,
    /// lowercase name -> index into `heroes`
    index: AHashMap<String, usize>,
}

impl HeroCatalog {
    /// Build a catalog, rejecting duplicate names and out-of-range magnitudes
    pub fn new(mut heroes: Vec<Hero>) -> Result<Self> {
        heroes.sort_by_key(|h| h.name.to_lowercase());

        let mut index = AHashMap::with_capacity(heroes.len());
        for (i, hero) in heroes.iter().enumerate() {
            let key = hero.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(SkillModError::Config("hero with empty name".into()));
            }
            if key.contains(|c: char| c == ':' || c == ',' || c.is_whitespace()) {
                return Err(SkillModError::Config(format!(
                    "hero name '{}' contains a separator character",
                    hero.name
                )));
            }
            for effect in &hero.effects {
                if !(effect.magnitude > 0.0 && effect.magnitude <= 1.0) {
                    return Err(SkillModError::Config(format!(
                        "{}: magnitude {} for {} op{} is outside (0, 1]",
                        hero.name, effect.magnitude, effect.category, effect.variant
                    )));
                }
            }
            if index.insert(key, i).is_some() {
                return Err(SkillModError::Config(format!(
                    "duplicate hero name '{}'",
                    hero.name
                )));
            }
        }

        Ok(Self { heroes, index })
    }

    /// The confirmed joiner hero values
    pub fn builtin() -> Self {
        use EffectCategory::*;

        let heroes = vec![
            Hero::new("Chenko", vec![Effect::new(DamageUp, 101, 0.25)]),
            Hero::new("Amadeus", vec![Effect::new(DamageUp, 101, 0.25)]),
            Hero::new("Yeonwoo", vec![Effect::new(DamageUp, 101, 0.25)]),
            Hero::new("Amane", vec![Effect::new(DamageUp, 102, 0.25)]),
            Hero::new("Howard", vec![Effect::new(DefenseUp, 111, 0.20)]),
            Hero::new("Quinn", vec![Effect::new(DefenseUp, 111, 0.20)]),
            Hero::new("Gordon", vec![Effect::new(DefenseUp, 113, 0.25)]),
            Hero::new("Fahd", vec![Effect::new(OppDamageDown, 201, 0.20)]),
            Hero::new(
                "Saul",
                vec![
                    Effect::new(DefenseUp, 112, 0.10),
                    Effect::new(DefenseUp, 113, 0.15),
                ],
            ),
            Hero::new(
                "Hilde",
                vec![
                    Effect::new(DefenseUp, 112, 0.10),
                    Effect::new(DamageUp, 102, 0.15),
                ],
            ),
            Hero::new("Eric", vec![Effect::new(OppDamageDown, 202, 0.20)]),
            Hero::new("Margot", vec![Effect::new(DamageUp, 102, 0.25)]),
        ];

        // Static table above satisfies every check in `new`
        match Self::new(heroes) {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("built-in catalog is invalid: {}", e),
        }
    }

    /// Look a hero up by name, ignoring case and surrounding whitespace
    pub fn get(&self, name: &str) -> Option<&Hero> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.heroes[i])
    }

    /// Like `get`, but unknown names become `UnknownHero`
    pub fn resolve(&self, name: &str) -> Result<&Hero> {
        self.get(name)
            .ok_or_else(|| SkillModError::UnknownHero(name.trim().to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter()
    }

    /// Canonical names, sorted case-insensitively
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.heroes.iter().map(|h| h.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    /// Hero names containing `fragment` (case-insensitive), at most `limit`
    pub fn autocomplete(&self, fragment: &str, limit: usize) -> Vec<&str> {
        let needle = fragment.trim().to_lowercase();
        self.names()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}
