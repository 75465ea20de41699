//! Head-to-head comparison of two teams

use std::fmt;

use crate::calc::evaluate::{evaluate, SkillModResult};
use crate::catalog::HeroCatalog;
use crate::core::error::Result;
use crate::team::TeamComposition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    TeamA,
    TeamB,
    Tie,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Winner::TeamA => "Team A",
            Winner::TeamB => "Team B",
            Winner::Tie => "Tie",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub team_a: SkillModResult,
    pub team_b: SkillModResult,
    pub winner: Winner,
    /// How much higher (positive) or lower Team B's SkillMod is, in percent of Team A's
    pub delta_pct: f64,
}

impl Comparison {
    pub fn from_results(team_a: SkillModResult, team_b: SkillModResult) -> Self {
        let (va, vb) = (team_a.skill_mod, team_b.skill_mod);
        let delta_pct = if va != 0.0 { (vb - va) / va * 100.0 } else { 0.0 };
        let winner = if vb > va {
            Winner::TeamB
        } else if va > vb {
            Winner::TeamA
        } else {
            Winner::Tie
        };
        Self {
            team_a,
            team_b,
            winner,
            delta_pct,
        }
    }
}

/// Evaluate both teams and decide which one has the higher SkillMod
pub fn compare(
    catalog: &HeroCatalog,
    team_a: &TeamComposition,
    team_b: &TeamComposition,
) -> Result<Comparison> {
    let a = evaluate(catalog, team_a)?;
    let b = evaluate(catalog, team_b)?;
    Ok(Comparison::from_results(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::aggregate::{CategoryFactors, EffectTotals};

    #[test]
    fn test_mixed_variants_beat_single_variant() {
        let catalog = HeroCatalog::builtin();
        let a = TeamComposition::new().with("Chenko", 4);
        let b = TeamComposition::new().with("Chenko", 2).with("Amane", 2);
        let cmp = compare(&catalog, &a, &b).unwrap();
        // 2.0 vs 2.25
        assert_eq!(cmp.winner, Winner::TeamB);
        assert!((cmp.delta_pct - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_identical_teams_tie() {
        let catalog = HeroCatalog::builtin();
        let team = TeamComposition::new().with("Hilde", 1);
        let cmp = compare(&catalog, &team, &team).unwrap();
        assert_eq!(cmp.winner, Winner::Tie);
        assert_eq!(cmp.delta_pct, 0.0);
    }

    #[test]
    fn test_zero_skillmod_delta_is_zero() {
        let zero = CategoryFactors {
            damage_up: 0.0,
            ..CategoryFactors::default()
        };
        let a = SkillModResult::from_factors(zero, EffectTotals::new());
        let cmp = Comparison::from_results(a, SkillModResult::neutral());
        assert_eq!(cmp.winner, Winner::TeamB);
        assert_eq!(cmp.delta_pct, 0.0);
    }
}
