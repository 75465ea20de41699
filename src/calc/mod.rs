//! SkillMod arithmetic: per-variant sums, category factors, final ratios

pub mod aggregate;
pub mod compare;
pub mod evaluate;

pub use aggregate::{aggregate, CategoryFactors, EffectTotals};
pub use compare::{compare, Comparison, Winner};
pub use evaluate::{evaluate, SkillModResult};
