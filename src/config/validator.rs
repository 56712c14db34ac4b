use std::collections::HashSet;
use thiserror::Error;

use crate::config::Settings;
use crate::models::{RiskCategory, TimeHorizon};
use crate::risk::{EngineType, Lexicon};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Invalid format: {field} - {message}")]
    InvalidFormat { field: String, message: String },
    #[error("Duplicate entry in {field}: '{entry}'")]
    DuplicateEntry { field: String, entry: String },
    #[error("Invalid band thresholds: watch={watch}, high={high}, critical={critical}")]
    InvalidBands { watch: u8, high: u8, critical: u8 },
    #[error("Missing triggers for risk category {0}")]
    MissingCategory(RiskCategory),
    #[error("Missing triggers for time horizon {0}")]
    MissingHorizon(TimeHorizon),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];

fn validate_phrases(field: &str, phrases: &[String], required: bool) -> ValidationResult<()> {
    if required && phrases.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }

    let mut seen = HashSet::new();
    for phrase in phrases {
        if phrase.trim().is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: field.to_string(),
                message: "blank phrase".to_string(),
            });
        }
        if !seen.insert(phrase.as_str()) {
            return Err(ValidationError::DuplicateEntry {
                field: field.to_string(),
                entry: phrase.clone(),
            });
        }
    }
    Ok(())
}

/// Check a lexicon before it is handed to an engine
pub fn validate_lexicon(lexicon: &Lexicon) -> ValidationResult<()> {
    validate_phrases("context_words", &lexicon.context_words, true)?;
    validate_phrases("component_families", &lexicon.component_families, true)?;
    validate_phrases("procurement_terms", &lexicon.procurement_terms, true)?;
    validate_phrases("capacity_terms", &lexicon.capacity_terms, true)?;
    validate_phrases("official_indicators", &lexicon.official_indicators, false)?;
    validate_phrases("credible_sources", &lexicon.credible_sources, false)?;
    validate_phrases("vague_indicators", &lexicon.vague_indicators, false)?;

    for category in RiskCategory::ALL {
        let triggers = lexicon
            .category_triggers
            .get(&category)
            .ok_or(ValidationError::MissingCategory(category))?;
        validate_phrases(&format!("category_triggers.{}.strong", category), &triggers.strong, false)?;
        validate_phrases(&format!("category_triggers.{}.medium", category), &triggers.medium, false)?;
        if triggers.strong.is_empty() && triggers.medium.is_empty() {
            return Err(ValidationError::MissingCategory(category));
        }
    }

    for horizon in TimeHorizon::PRIORITY {
        let triggers = lexicon
            .horizon_triggers
            .get(&horizon)
            .ok_or(ValidationError::MissingHorizon(horizon))?;
        validate_phrases(&format!("horizon_triggers.{}", horizon), triggers, false)?;
    }

    let bands = lexicon.bands;
    if !(0 < bands.watch && bands.watch < bands.high && bands.high < bands.critical && bands.critical <= 100) {
        return Err(ValidationError::InvalidBands {
            watch: bands.watch,
            high: bands.high,
            critical: bands.critical,
        });
    }

    Ok(())
}

/// Check settings for values the binary cannot act on
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    settings
        .engine
        .engine_type
        .parse::<EngineType>()
        .map_err(|e| ValidationError::InvalidFormat {
            field: "engine.engine_type".to_string(),
            message: e.to_string(),
        })?;

    if let Some(path) = &settings.engine.lexicon_path {
        if path.trim().is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "engine.lexicon_path".to_string(),
                message: "path is blank".to_string(),
            });
        }
    }

    let level = settings.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ValidationError::InvalidFormat {
            field: "logging.level".to_string(),
            message: format!("expected one of {:?}, got '{}'", LOG_LEVELS, settings.logging.level),
        });
    }

    if !LOG_FORMATS.contains(&settings.logging.format.as_str()) {
        return Err(ValidationError::InvalidFormat {
            field: "logging.format".to_string(),
            message: format!("expected one of {:?}, got '{}'", LOG_FORMATS, settings.logging.format),
        });
    }

    Ok(())
}
