// Risk engine error types
use thiserror::Error;

use crate::config::validator::ValidationError;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Unknown engine type: {engine_type}")]
    UnknownEngineType { engine_type: String },

    #[error("{engine_type} risk engine is not implemented yet")]
    NotImplemented { engine_type: String },

    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(#[from] ValidationError),

    #[error("Failed to load lexicon from {path}: {message}")]
    LexiconLoad { path: String, message: String },

    #[error("Invalid evidence pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl RiskError {
    /// Configuration mistakes as opposed to bad lexicon data
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RiskError::UnknownEngineType { .. } | RiskError::NotImplemented { .. }
        )
    }
}
