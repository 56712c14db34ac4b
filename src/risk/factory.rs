// Engine selection by configured type name
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::config::EngineSettings;
use crate::risk::{ExplainableRiskEngine, Lexicon, RiskEngine, RiskError, RuleBasedRiskEngine};
use crate::utils::time::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineType {
    RuleBased,
    /// Reserved; requesting it fails with `NotImplemented`
    Ml,
}

impl EngineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineType::RuleBased => "rule_based",
            EngineType::Ml => "ml",
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rule_based" => Ok(EngineType::RuleBased),
            "ml" => Ok(EngineType::Ml),
            other => Err(RiskError::UnknownEngineType {
                engine_type: other.to_string(),
            }),
        }
    }
}

/// Builds risk engines from a type name or from settings
pub struct RiskEngineFactory;

impl RiskEngineFactory {
    /// Engine with the built-in lexicon and the system clock
    pub fn get_engine(engine_type: &str) -> Result<Box<dyn RiskEngine>, RiskError> {
        let engine = Self::build(engine_type.parse::<EngineType>()?, Lexicon::default(), Arc::new(SystemClock))?;
        Ok(Box::new(engine))
    }

    pub fn get_explainable_engine(engine_type: &str) -> Result<Box<dyn ExplainableRiskEngine>, RiskError> {
        let engine = Self::build(engine_type.parse::<EngineType>()?, Lexicon::default(), Arc::new(SystemClock))?;
        Ok(Box::new(engine))
    }

    pub fn create(
        engine_type: EngineType,
        lexicon: Lexicon,
        clock: Arc<dyn Clock>,
    ) -> Result<Box<dyn RiskEngine>, RiskError> {
        Ok(Box::new(Self::build(engine_type, lexicon, clock)?))
    }

    pub fn create_explainable(
        engine_type: EngineType,
        lexicon: Lexicon,
        clock: Arc<dyn Clock>,
    ) -> Result<Box<dyn ExplainableRiskEngine>, RiskError> {
        Ok(Box::new(Self::build(engine_type, lexicon, clock)?))
    }

    /// Engine described by `[engine]` settings, loading a custom lexicon when a path is set
    pub fn from_settings(settings: &EngineSettings) -> Result<Arc<dyn RiskEngine>, RiskError> {
        let engine_type: EngineType = settings.engine_type.parse()?;
        let lexicon = match &settings.lexicon_path {
            Some(path) => Lexicon::from_file(path)?,
            None => Lexicon::default(),
        };
        Ok(Arc::new(Self::build(engine_type, lexicon, Arc::new(SystemClock))?))
    }

    fn build(
        engine_type: EngineType,
        lexicon: Lexicon,
        clock: Arc<dyn Clock>,
    ) -> Result<RuleBasedRiskEngine, RiskError> {
        match engine_type {
            EngineType::RuleBased => {
                let engine = RuleBasedRiskEngine::with_lexicon(lexicon)?.with_clock(clock);
                info!(engine = %engine_type, "Created risk engine");
                Ok(engine)
            }
            EngineType::Ml => Err(RiskError::NotImplemented {
                engine_type: engine_type.to_string(),
            }),
        }
    }
}
