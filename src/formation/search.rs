//! Brute-force formation search
//!
//! Enumerates every multiset of heroes up to the team size allowed by a
//! roster, evaluates each, and keeps the best per objective. Exponential in
//! roster diversity and team size; both stay small (12 heroes, 4 slots).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calc::evaluate;
use crate::catalog::HeroCatalog;
use crate::core::error::Result;
use crate::team::{parse_team, TeamComposition};

/// Heroes a player owns and how many copies of each
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    available: TeamComposition,
}

impl Roster {
    pub fn new(available: TeamComposition) -> Self {
        Self { available }
    }

    /// Every catalog hero, `copies` of each
    pub fn full(catalog: &HeroCatalog, copies: u32) -> Self {
        Self::new(catalog.names().map(|n| (n.to_string(), copies)).collect())
    }

    /// Parse `Chenko:3,Amane:2` style rosters
    pub fn parse(catalog: &HeroCatalog, raw: &str) -> Result<Self> {
        parse_team(catalog, raw).map(Self::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.available.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

/// One evaluated team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationCandidate {
    pub heroes: TeamComposition,
    pub skill_mod: f64,
    pub damage_pct: f64,
    pub taken_pct: f64,
}

/// Best picks for the two objectives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Highest damage dealt first
    pub best_attack: Vec<FormationCandidate>,
    /// Lowest damage taken first
    pub best_garrison: Vec<FormationCandidate>,
}

/// All non-empty multisets of at most `max_size` heroes within roster limits
pub fn enumerate_formations(roster: &Roster, max_size: u32) -> Vec<TeamComposition> {
    let heroes: Vec<(&str, u32)> = roster.iter().collect();
    let mut formations = Vec::new();
    let mut current = Vec::with_capacity(heroes.len());
    fill(&heroes, 0, max_size, &mut current, &mut formations);
    formations
}

/// Choose how many copies of `heroes[idx]` to take, then recurse
fn fill<'a>(
    heroes: &[(&'a str, u32)],
    idx: usize,
    remaining: u32,
    current: &mut Vec<(&'a str, u32)>,
    out: &mut Vec<TeamComposition>,
) {
    if idx == heroes.len() {
        if !current.is_empty() {
            out.push(current.iter().map(|&(name, count)| (name.to_string(), count)).collect());
        }
        return;
    }

    let (name, limit) = heroes[idx];
    for take in 0..=limit.min(remaining) {
        if take > 0 {
            current.push((name, take));
        }
        fill(heroes, idx + 1, remaining - take, current, out);
        if take > 0 {
            current.pop();
        }
    }
}

/// Evaluate every formation and keep the top `top_n` per objective
///
/// Ties are broken by the team itself so the output never depends on
/// evaluation order.
pub fn recommend(
    catalog: &HeroCatalog,
    roster: &Roster,
    max_size: u32,
    top_n: usize,
) -> Result<Recommendation> {
    let formations = enumerate_formations(roster, max_size);

    let candidates = formations
        .into_par_iter()
        .map(|heroes| -> Result<FormationCandidate> {
            let result = evaluate(catalog, &heroes)?;
            Ok(FormationCandidate {
                heroes,
                skill_mod: result.skill_mod,
                damage_pct: result.damage_percent_increase,
                taken_pct: result.damage_taken_percent_change,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Evaluated {} formations (max size {})", candidates.len(), max_size);

    let mut attack = candidates.clone();
    attack.sort_by(|a, b| {
        b.damage_pct
            .total_cmp(&a.damage_pct)
            .then_with(|| a.heroes.cmp(&b.heroes))
    });
    attack.truncate(top_n);

    let mut garrison = candidates;
    garrison.sort_by(|a, b| {
        a.taken_pct
            .total_cmp(&b.taken_pct)
            .then_with(|| a.heroes.cmp(&b.heroes))
    });
    garrison.truncate(top_n);

    Ok(Recommendation {
        best_attack: attack,
        best_garrison: garrison,
    })
}
