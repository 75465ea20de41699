//! SkillMod evaluation
//!
//! ```text
//! SkillMod                   = (DamageUp x OppDefenseDown) / (OppDamageDown x DefenseUp)
//! Damage%Increase            = (SkillMod - 1) x 100
//! EnemyReductionFactor       = 1 / OppDamageDown
//! FinalDamageTakenMultiplier = (1 / DefenseUp) x EnemyReductionFactor
//! DamageTaken%Change         = (FinalDamageTakenMultiplier - 1) x 100
//! ```
//!
//! A zero denominator is replaced by 1.0. Factors built from positive
//! magnitudes never reach zero, so this only triggers on hand-built factors;
//! `division_guarded` records that it happened.

use crate::calc::aggregate::{aggregate, CategoryFactors, EffectTotals};
use crate::catalog::HeroCatalog;
use crate::core::error::Result;
use crate::team::TeamComposition;

/// Everything derived from one team
#[derive(Debug, Clone, PartialEq)]
pub struct SkillModResult {
    pub factors: CategoryFactors,
    pub totals: EffectTotals,
    pub skill_mod: f64,
    pub damage_percent_increase: f64,
    pub enemy_reduction_factor: f64,
    pub final_damage_taken_multiplier: f64,
    /// Negative means less damage taken
    pub damage_taken_percent_change: f64,
    /// True if any zero denominator was replaced by 1.0
    pub division_guarded: bool,
}

impl SkillModResult {
    /// Derive the ratios from precomputed factors
    pub fn from_factors(factors: CategoryFactors, totals: EffectTotals) -> Self {
        let mut guarded = false;
        let mut guard = |denominator: f64| {
            if denominator == 0.0 {
                guarded = true;
                1.0
            } else {
                denominator
            }
        };

        let skill_mod = (factors.damage_up * factors.opp_defense_down)
            / guard(factors.opp_damage_down * factors.defense_up);
        let enemy_reduction_factor = 1.0 / guard(factors.opp_damage_down);
        let final_damage_taken_multiplier =
            (1.0 / guard(factors.defense_up)) * enemy_reduction_factor;

        Self {
            factors,
            totals,
            skill_mod,
            damage_percent_increase: (skill_mod - 1.0) * 100.0,
            enemy_reduction_factor,
            final_damage_taken_multiplier,
            damage_taken_percent_change: (final_damage_taken_multiplier - 1.0) * 100.0,
            division_guarded: guarded,
        }
    }

    /// Baseline for a team with no buffs
    pub fn neutral() -> Self {
        Self::from_factors(CategoryFactors::default(), EffectTotals::new())
    }
}

/// Evaluate a team against the catalog
pub fn evaluate(catalog: &HeroCatalog, team: &TeamComposition) -> Result<SkillModResult> {
    let totals = aggregate(catalog, team)?;
    let result = SkillModResult::from_factors(totals.factors(), totals);
    tracing::debug!(
        "SkillMod for [{}]: {:.4} ({:+.1}% dealt, {:+.1}% taken)",
        team,
        result.skill_mod,
        result.damage_percent_increase,
        result.damage_taken_percent_change
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_team_is_neutral() {
        let result = evaluate(&HeroCatalog::builtin(), &TeamComposition::new()).unwrap();
        assert_eq!(result.skill_mod, 1.0);
        assert_eq!(result.damage_percent_increase, 0.0);
        assert_eq!(result.damage_taken_percent_change, 0.0);
        assert!(!result.division_guarded);
        assert_eq!(result, SkillModResult::neutral());
    }

    #[test]
    fn test_chenko_amane_example() {
        let team = TeamComposition::new().with("Chenko", 2).with("Amane", 2);
        let result = evaluate(&HeroCatalog::builtin(), &team).unwrap();
        assert!((result.factors.damage_up - 2.25).abs() < EPS);
        assert!((result.skill_mod - 2.25).abs() < EPS);
        assert!((result.damage_percent_increase - 125.0).abs() < EPS);
        assert_eq!(result.damage_taken_percent_change, 0.0);
    }

    #[test]
    fn test_defense_lowers_skillmod_and_damage_taken() {
        // Gordon: DefenseUp op113 0.25
        let team = TeamComposition::new().with("Gordon", 1);
        let result = evaluate(&HeroCatalog::builtin(), &team).unwrap();
        assert!((result.skill_mod - 0.8).abs() < EPS);
        assert!((result.final_damage_taken_multiplier - 0.8).abs() < EPS);
        assert!((result.damage_taken_percent_change + 20.0).abs() < EPS);
    }

    #[test]
    fn test_opp_damage_down_feeds_enemy_reduction() {
        // Fahd op201 and Eric op202 stack multiplicatively: 1.2 * 1.2
        let team = TeamComposition::new().with("Fahd", 1).with("Eric", 1);
        let result = evaluate(&HeroCatalog::builtin(), &team).unwrap();
        assert!((result.factors.opp_damage_down - 1.44).abs() < EPS);
        assert!((result.enemy_reduction_factor - 1.0 / 1.44).abs() < EPS);
        assert!((result.final_damage_taken_multiplier - 1.0 / 1.44).abs() < EPS);
    }

    #[test]
    fn test_zero_denominator_is_guarded() {
        let factors = CategoryFactors {
            damage_up: 1.5,
            defense_up: 0.0,
            opp_defense_down: 1.0,
            opp_damage_down: 0.0,
        };
        let result = SkillModResult::from_factors(factors, EffectTotals::new());
        assert!(result.division_guarded);
        assert_eq!(result.skill_mod, 1.5);
        assert_eq!(result.enemy_reduction_factor, 1.0);
        assert_eq!(result.final_damage_taken_multiplier, 1.0);
        assert!(result.skill_mod.is_finite());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let catalog = HeroCatalog::builtin();
        let team = TeamComposition::new().with("Hilde", 1).with("Saul", 2).with("Fahd", 1);
        let first = evaluate(&catalog, &team).unwrap();
        let second = evaluate(&catalog, &team).unwrap();
        assert_eq!(first, second);
    }
}
