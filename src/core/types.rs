//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis a hero buff modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectCategory {
    /// Raises our outgoing damage
    DamageUp,
    /// Reduces damage we receive
    DefenseUp,
    /// Lowers the opponent's defense (raises our outgoing damage)
    OppDefenseDown,
    /// Lowers the opponent's damage (reduces damage we receive)
    OppDamageDown,
}

impl EffectCategory {
    pub const ALL: [EffectCategory; 4] = [
        EffectCategory::DamageUp,
        EffectCategory::DefenseUp,
        EffectCategory::OppDefenseDown,
        EffectCategory::OppDamageDown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DamageUp => "DamageUp",
            Self::DefenseUp => "DefenseUp",
            Self::OppDefenseDown => "OppDefenseDown",
            Self::OppDamageDown => "OppDamageDown",
        }
    }
}

impl fmt::Display for EffectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distinguishes independently stacking instances of an effect within one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub u32);

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One percentage buff contributed by a hero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub category: EffectCategory,
    pub variant: VariantId,
    /// Decimal fraction, 0.25 = 25%
    pub magnitude: f64,
}

impl Effect {
    pub fn new(category: EffectCategory, variant: u32, magnitude: f64) -> Self {
        Self {
            category,
            variant: VariantId(variant),
            magnitude,
        }
    }

    /// Key used when accumulating contributions
    pub fn key(&self) -> (EffectCategory, VariantId) {
        (self.category, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_stable() {
        let mut shuffled = vec![
            EffectCategory::OppDamageDown,
            EffectCategory::DamageUp,
            EffectCategory::OppDefenseDown,
            EffectCategory::DefenseUp,
        ];
        shuffled.sort();
        assert_eq!(shuffled, EffectCategory::ALL.to_vec());
    }

    #[test]
    fn test_effect_key() {
        let effect = Effect::new(EffectCategory::DefenseUp, 112, 0.10);
        assert_eq!(effect.key(), (EffectCategory::DefenseUp, VariantId(112)));
    }
}
