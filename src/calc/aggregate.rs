//! Factor aggregation
//!
//! Contributions sharing a (category, variant) key are ADDITIVE. Distinct
//! variants inside one category are MULTIPLICATIVE:
//!
//! ```text
//! factor(category) = product over variants of (1 + sum of magnitude x count)
//! ```
//!
//! A category nobody contributes to has factor 1.0.

use std::collections::BTreeMap;

use crate::catalog::HeroCatalog;
use crate::core::error::Result;
use crate::core::types::{EffectCategory, VariantId};
use crate::team::TeamComposition;

/// Summed magnitudes per (category, variant)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectTotals {
    totals: BTreeMap<(EffectCategory, VariantId), f64>,
}

impl EffectTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contribution to one (category, variant) bucket
    pub fn add(&mut self, key: (EffectCategory, VariantId), amount: f64) {
        *self.totals.entry(key).or_insert(0.0) += amount;
    }

    pub fn get(&self, category: EffectCategory, variant: VariantId) -> Option<f64> {
        self.totals.get(&(category, variant)).copied()
    }

    /// All buckets, ordered by category then variant
    pub fn iter(&self) -> impl Iterator<Item = (EffectCategory, VariantId, f64)> + '_ {
        self.totals.iter().map(|(&(c, v), &sum)| (c, v, sum))
    }

    /// Buckets of one category
    pub fn variants(
        &self,
        category: EffectCategory,
    ) -> impl Iterator<Item = (VariantId, f64)> + '_ {
        self.iter()
            .filter(move |(c, _, _)| *c == category)
            .map(|(_, v, sum)| (v, sum))
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Product of `(1 + sum)` across the category's variants, 1.0 if none
    pub fn category_factor(&self, category: EffectCategory) -> f64 {
        self.variants(category).map(|(_, sum)| 1.0 + sum).product()
    }

    pub fn factors(&self) -> CategoryFactors {
        CategoryFactors {
            damage_up: self.category_factor(EffectCategory::DamageUp),
            defense_up: self.category_factor(EffectCategory::DefenseUp),
            opp_defense_down: self.category_factor(EffectCategory::OppDefenseDown),
            opp_damage_down: self.category_factor(EffectCategory::OppDamageDown),
        }
    }
}

/// One multiplicative factor per effect category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryFactors {
    pub damage_up: f64,
    pub defense_up: f64,
    pub opp_defense_down: f64,
    pub opp_damage_down: f64,
}

impl Default for CategoryFactors {
    fn default() -> Self {
        Self {
            damage_up: 1.0,
            defense_up: 1.0,
            opp_defense_down: 1.0,
            opp_damage_down: 1.0,
        }
    }
}

impl CategoryFactors {
    pub fn get(&self, category: EffectCategory) -> f64 {
        match category {
            EffectCategory::DamageUp => self.damage_up,
            EffectCategory::DefenseUp => self.defense_up,
            EffectCategory::OppDefenseDown => self.opp_defense_down,
            EffectCategory::OppDamageDown => self.opp_damage_down,
        }
    }
}

/// Sum every hero's contributions, scaled by its count
///
/// All heroes are resolved before anything is accumulated, so an unknown
/// hero fails the whole call.
pub fn aggregate(catalog: &HeroCatalog, team: &TeamComposition) -> Result<EffectTotals> {
    let resolved = team
        .iter()
        .map(|(name, count)| catalog.resolve(name).map(|hero| (hero, count)))
        .collect::<Result<Vec<_>>>()?;

    let mut totals = EffectTotals::new();
    for (hero, count) in resolved {
        for effect in &hero.effects {
            totals.add(effect.key(), effect.magnitude * f64::from(count));
        }
    }
    Ok(totals)
}
