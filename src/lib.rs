//! SkillMod - joiner hero lineup calculator

pub mod bot;
pub mod calc;
pub mod catalog;
pub mod core;
pub mod formation;
pub mod presets;
pub mod team;
