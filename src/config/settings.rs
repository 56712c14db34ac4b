use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::validator::{validate_settings, ValidationResult};

pub const ENV_PREFIX: &str = "SUPPLY_RISK";
pub const DEFAULT_CONFIG_FILE: &str = "config/supply-risk";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    pub engine_type: String,
    pub lexicon_path: Option<String>,
    pub parallel_batch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            engine_type: "rule_based".to_string(),
            lexicon_path: None,
            parallel_batch: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    let defaults = Settings::default();
    config::Config::builder()
        .set_default("engine.engine_type", defaults.engine.engine_type)?
        .set_default("engine.parallel_batch", defaults.engine.parallel_batch)?
        .set_default("logging.level", defaults.logging.level)?
        .set_default("logging.format", defaults.logging.format)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Defaults, then `config/supply-risk.*` if present, then `SUPPLY_RISK__*` variables
    pub fn new() -> Result<Self, config::ConfigError> {
        builder_with_defaults()?
            .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Defaults overlaid with a single configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        builder_with_defaults()?
            .add_source(config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_settings(self)
    }
}
