use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillModError {
    #[error("Unknown hero: {0}")]
    UnknownHero(String),

    #[error("Parse error near '{fragment}': {reason}")]
    ParseError { fragment: String, reason: String },

    #[error("No heroes with a positive count were supplied")]
    EmptyComposition,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl SkillModError {
    pub fn parse(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillModError>;
