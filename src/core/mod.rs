pub mod config;
pub mod error;
pub mod types;

pub use config::BotConfig;
pub use error::{Result, SkillModError};
pub use types::{Effect, EffectCategory, VariantId};
