// Risk engine traits and core interfaces
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Article, RiskAnalysis, RiskCategory, ScoreComponents};

/// Core trait every article risk engine implements.
///
/// `analyze` is infallible: malformed articles degrade to conservative
/// defaults instead of erroring.
pub trait RiskEngine: Send + Sync {
    /// Produce a risk verdict for one article
    fn analyze(&self, article: &Article) -> RiskAnalysis;

    /// Identifier used in configuration (`rule_based`, `ml`)
    fn engine_name(&self) -> &'static str;

    /// Version of the scoring rules, for tracking changes in stored verdicts
    fn version(&self) -> &'static str {
        crate::risk::VERSION
    }

    /// Analyze each article independently, preserving input order
    fn analyze_batch(&self, articles: &[Article]) -> Vec<RiskAnalysis> {
        articles.iter().map(|article| self.analyze(article)).collect()
    }

    fn get_config(&self) -> serde_json::Value {
        serde_json::json!({
            "engine": self.engine_name(),
            "version": self.version(),
        })
    }
}

/// Engines that can show how a verdict was reached
pub trait ExplainableRiskEngine: RiskEngine {
    fn explain(&self, article: &Article) -> RiskExplanation;
}

/// Verdict plus the evidence behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskExplanation {
    pub analysis: RiskAnalysis,
    pub components: ScoreComponents,
    pub electronics_context: bool,
    /// True when the off-topic override capped the score and cleared categories
    pub suppressed: bool,
    pub matched_triggers: BTreeMap<RiskCategory, Vec<String>>,
    pub horizon_trigger: Option<String>,
    pub summary: String,
}
