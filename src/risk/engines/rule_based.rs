// Rule-based risk engine for electronics supply chain articles
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use crate::models::{Article, RiskAnalysis, RiskBand, RiskCategory, ScoreComponents};
use crate::risk::detection::{detect_categories, extract_time_horizon, has_electronics_context, strengths};
use crate::risk::scoring::{
    calculate_confidence, calculate_immediacy, calculate_procurement_relevance, calculate_severity,
    calculate_specificity, EvidencePatterns,
};
use crate::risk::{ExplainableRiskEngine, Lexicon, RiskEngine, RiskError, RiskExplanation};
use crate::utils::time::{Clock, SystemClock};

/// Off-topic articles are capped at this score
pub const SUPPRESSED_SCORE_CAP: u8 = 25;
/// Procurement relevance below this, without electronics context, triggers suppression
pub const SUPPRESSION_RELEVANCE_FLOOR: u8 = 10;

/// Deterministic lexicon-driven scorer.
///
/// The lexicon sits behind a lock as a whole `Arc`; every analysis works on
/// one snapshot, and `replace_lexicon` swaps the full table in one step.
#[derive(Debug)]
pub struct RuleBasedRiskEngine {
    lexicon: RwLock<Arc<Lexicon>>,
    patterns: EvidencePatterns,
    clock: Arc<dyn Clock>,
}

impl RuleBasedRiskEngine {
    /// Engine with the built-in lexicon and the system clock
    pub fn new() -> Result<Self, RiskError> {
        Self::with_lexicon(Lexicon::default())
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Result<Self, RiskError> {
        let lexicon = lexicon.into_validated()?;
        Ok(Self {
            lexicon: RwLock::new(Arc::new(lexicon)),
            patterns: EvidencePatterns::compile()?,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current rule set
    pub fn lexicon(&self) -> Arc<Lexicon> {
        match self.lexicon.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Validate and atomically install a new rule set
    pub fn replace_lexicon(&self, lexicon: Lexicon) -> Result<(), RiskError> {
        let lexicon = Arc::new(lexicon.into_validated()?);
        let mut guard = match self.lexicon.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = lexicon;
        info!(engine = self.engine_name(), "Replaced risk lexicon");
        Ok(())
    }

    fn evaluate(&self, article: &Article) -> RiskExplanation {
        let lexicon = self.lexicon();
        let text = article.normalized_text();
        let source_name = article.source_name().to_lowercase();

        let electronics_context = has_electronics_context(&text, &lexicon);
        let category_matches = detect_categories(&text, &lexicon, electronics_context);
        let categories: Vec<RiskCategory> = category_matches.iter().map(|m| m.category).collect();
        let (time_horizon, horizon_trigger) = extract_time_horizon(&text, &lexicon);

        let confidence = calculate_confidence(&text, &categories, &source_name, &lexicon, &self.patterns);

        let components = ScoreComponents {
            severity: calculate_severity(&categories),
            immediacy: calculate_immediacy(time_horizon, article.published_at(), self.clock.now()),
            procurement_relevance: calculate_procurement_relevance(&text, &lexicon),
            specificity: calculate_specificity(&text, &source_name, &lexicon, &self.patterns),
        };

        let mut risk_score = components.total();
        let mut risk_band = lexicon.bands.band_for(risk_score);
        let mut risk_categories = categories;
        let mut category_strength = strengths(&category_matches);
        let mut matched_triggers: BTreeMap<RiskCategory, Vec<String>> = category_matches
            .iter()
            .map(|m| (m.category, m.triggers()))
            .collect();

        let suppressed =
            !electronics_context && components.procurement_relevance < SUPPRESSION_RELEVANCE_FLOOR;
        if suppressed {
            risk_score = risk_score.min(SUPPRESSED_SCORE_CAP);
            risk_band = RiskBand::Low;
            risk_categories.clear();
            category_strength.clear();
            matched_triggers.clear();
        }

        let analysis = RiskAnalysis {
            risk_score,
            risk_band,
            risk_categories,
            confidence,
            time_horizon,
            category_strength,
        };

        debug!(
            engine = self.engine_name(),
            risk_score = analysis.risk_score,
            risk_band = %analysis.risk_band,
            categories = analysis.risk_categories.len(),
            confidence = analysis.confidence,
            suppressed,
            "Analyzed article"
        );

        let summary = summarize(&analysis, &components, suppressed);

        RiskExplanation {
            analysis,
            components,
            electronics_context,
            suppressed,
            matched_triggers,
            horizon_trigger: horizon_trigger.map(String::from),
            summary,
        }
    }
}

fn summarize(analysis: &RiskAnalysis, components: &ScoreComponents, suppressed: bool) -> String {
    let categories = if analysis.risk_categories.is_empty() {
        "no categories".to_string()
    } else {
        analysis
            .risk_categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut summary = format!(
        "Score {} ({}): severity {}, immediacy {}, procurement relevance {}, specificity {}; {}; horizon {}",
        analysis.risk_score,
        analysis.risk_band,
        components.severity,
        components.immediacy,
        components.procurement_relevance,
        components.specificity,
        categories,
        analysis.time_horizon,
    );
    if suppressed {
        summary.push_str("; suppressed: no electronics context");
    }
    summary
}

impl RiskEngine for RuleBasedRiskEngine {
    fn analyze(&self, article: &Article) -> RiskAnalysis {
        self.evaluate(article).analysis
    }

    fn engine_name(&self) -> &'static str {
        "rule_based"
    }

    fn get_config(&self) -> serde_json::Value {
        let lexicon = self.lexicon();
        serde_json::json!({
            "engine": self.engine_name(),
            "version": self.version(),
            "categories": lexicon.category_triggers.len(),
            "context_words": lexicon.context_words.len(),
            "bands": lexicon.bands,
        })
    }
}

impl ExplainableRiskEngine for RuleBasedRiskEngine {
    fn explain(&self, article: &Article) -> RiskExplanation {
        self.evaluate(article)
    }
}
