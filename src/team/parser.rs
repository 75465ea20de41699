//! Parse team descriptions into compositions
//!
//! Accepted forms:
//! - `Chenko:4,Amane:2` (comma separated, spaces around items allowed)
//! - `Chenko:4 Amane:2` (whitespace separated)
//! - `Chenko 4 Amane 2` (name/count pairs)
//!
//! Names resolve case-insensitively to the catalog spelling. Counts of zero
//! or below are dropped, wherever they come from. Repeated heroes sum.

use crate::catalog::HeroCatalog;
use crate::core::error::{Result, SkillModError};
use crate::team::composition::TeamComposition;

/// Parse a compact team string
pub fn parse_team(catalog: &HeroCatalog, raw: &str) -> Result<TeamComposition> {
    let mut team = TeamComposition::new();
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(team);
    }

    if raw.contains(',') {
        for fragment in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            let (name, count) = split_fragment(fragment)?;
            push(catalog, &mut team, name, count)?;
        }
    } else {
        let mut tokens = raw.split_whitespace();
        while let Some(token) = tokens.next() {
            if token.contains(':') {
                let (name, count) = split_fragment(token)?;
                push(catalog, &mut team, name, count)?;
                continue;
            }
            let count_token = tokens.next().ok_or_else(|| {
                SkillModError::parse(token, "expected Name:count or Name count")
            })?;
            let fragment = format!("{} {}", token, count_token);
            let count = parse_count(count_token, &fragment)?;
            push(catalog, &mut team, token, count)?;
        }
    }

    tracing::debug!("Parsed team '{}' -> {}", raw, team);
    Ok(team)
}

/// Normalize slash-command hero/count slots; empty slots are skipped
pub fn parse_slots<I, S>(catalog: &HeroCatalog, slots: I) -> Result<TeamComposition>
where
    I: IntoIterator<Item = (Option<S>, i64)>,
    S: AsRef<str>,
{
    let mut team = TeamComposition::new();
    for (name, count) in slots {
        let Some(name) = name else { continue };
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        push(catalog, &mut team, name, count)?;
    }
    Ok(team)
}

/// Canonical string form, the inverse of `parse_team`
pub fn format_team(team: &TeamComposition) -> String {
    team.to_string()
}

/// Split one `Name:count` or `Name count` fragment
fn split_fragment(fragment: &str) -> Result<(&str, i64)> {
    let (name, count) = match fragment.split_once(':') {
        Some(pair) => pair,
        None => {
            let mut parts = fragment.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(name), Some(count), None) => (name, count),
                _ => {
                    return Err(SkillModError::parse(
                        fragment,
                        "expected Name:count or Name count",
                    ))
                }
            }
        }
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(SkillModError::parse(fragment, "missing hero name"));
    }
    Ok((name, parse_count(count, fragment)?))
}

fn parse_count(count: &str, fragment: &str) -> Result<i64> {
    count
        .trim()
        .parse::<i64>()
        .map_err(|_| SkillModError::parse(fragment, "count must be a whole number"))
}

/// Resolve the name, then add the count if it is positive
fn push(catalog: &HeroCatalog, team: &mut TeamComposition, name: &str, count: i64) -> Result<()> {
    let hero = catalog.resolve(name)?;
    if count <= 0 {
        tracing::debug!("Dropping {} with non-positive count {}", hero.name, count);
        return Ok(());
    }
    let count = u32::try_from(count)
        .map_err(|_| SkillModError::parse(format!("{}:{}", name, count), "count too large"))?;
    team.add(hero.name.clone(), count);
    Ok(())
}
