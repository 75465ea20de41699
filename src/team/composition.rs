//! Team composition - a multiset of heroes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Hero name -> strictly positive copy count
///
/// Keys are canonical catalog names. Iteration order is by name, so two
/// compositions built in different orders compare and format identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamComposition {
    counts: BTreeMap<String, u32>,
}

impl TeamComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add copies of a hero; zero counts are ignored
    pub fn add(&mut self, hero: impl Into<String>, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.counts.entry(hero.into()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Builder form of `add`
    pub fn with(mut self, hero: impl Into<String>, count: u32) -> Self {
        self.add(hero, count);
        self
    }

    pub fn count(&self, hero: &str) -> u32 {
        self.counts.get(hero).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(name, &count)| (name.as_str(), count))
    }

    /// Number of distinct heroes
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total copies across all heroes
    pub fn total_heroes(&self) -> u32 {
        self.counts.values().sum()
    }
}

impl FromIterator<(String, u32)> for TeamComposition {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        let mut team = TeamComposition::new();
        for (hero, count) in iter {
            team.add(hero, count);
        }
        team
    }
}

/// Compact `Name:count,Name:count` form, accepted back by `parse_team`
impl fmt::Display for TeamComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", name, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_counts_ignored() {
        let team = TeamComposition::new().with("Chenko", 0);
        assert!(team.is_empty());
    }

    #[test]
    fn test_repeated_adds_sum() {
        let team = TeamComposition::new().with("Chenko", 2).with("Chenko", 1);
        assert_eq!(team.count("Chenko"), 3);
        assert_eq!(team.len(), 1);
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let a = TeamComposition::new().with("Amane", 1).with("Chenko", 2);
        let b = TeamComposition::new().with("Chenko", 2).with("Amane", 1);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Amane:1,Chenko:2");
    }

    #[test]
    fn test_total_heroes() {
        let team = TeamComposition::new().with("Amane", 1).with("Chenko", 3);
        assert_eq!(team.total_heroes(), 4);
    }

    #[test]
    fn test_empty_formats_as_empty_string() {
        assert_eq!(TeamComposition::new().to_string(), "");
    }
}
