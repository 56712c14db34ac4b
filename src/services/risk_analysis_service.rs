use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::models::{Article, RiskAnalysis, RiskBand, RiskCategory};
use crate::risk::{RiskEngine, RiskEngineFactory, RiskError};

/// Analyze one article with a freshly built engine of the given type
pub fn analyze_article(article: &Article, engine_type: &str) -> Result<RiskAnalysis, RiskError> {
    let engine = RiskEngineFactory::get_engine(engine_type)?;
    Ok(engine.analyze(article))
}

/// Analyze articles in order with one engine of the given type
pub fn analyze_articles_batch(articles: &[Article], engine_type: &str) -> Result<Vec<RiskAnalysis>, RiskError> {
    let engine = RiskEngineFactory::get_engine(engine_type)?;
    Ok(engine.analyze_batch(articles))
}

/// Shared entry point for scoring article feeds
#[derive(Clone)]
pub struct RiskAnalysisService {
    engine: Arc<dyn RiskEngine>,
}

impl RiskAnalysisService {
    pub fn new(engine: Arc<dyn RiskEngine>) -> Self {
        Self { engine }
    }

    pub fn from_engine_type(engine_type: &str) -> Result<Self, RiskError> {
        let engine: Arc<dyn RiskEngine> = Arc::from(RiskEngineFactory::get_engine(engine_type)?);
        Ok(Self::new(engine))
    }

    pub fn engine(&self) -> &dyn RiskEngine {
        self.engine.as_ref()
    }

    pub fn analyze(&self, article: &Article) -> RiskAnalysis {
        self.engine.analyze(article)
    }

    pub fn analyze_batch(&self, articles: &[Article]) -> Vec<RiskAnalysis> {
        let analyses = self.engine.analyze_batch(articles);
        info!(
            engine = self.engine.engine_name(),
            articles = articles.len(),
            "Analyzed article batch"
        );
        analyses
    }

    /// Same results as `analyze_batch`, spread across the rayon pool
    pub fn analyze_batch_parallel(&self, articles: &[Article]) -> Vec<RiskAnalysis> {
        let analyses: Vec<RiskAnalysis> = articles
            .par_iter()
            .map(|article| self.engine.analyze(article))
            .collect();
        info!(
            engine = self.engine.engine_name(),
            articles = articles.len(),
            parallel = true,
            "Analyzed article batch"
        );
        analyses
    }
}

/// Aggregate view over a batch of verdicts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRiskSummary {
    pub total: usize,
    pub by_band: BTreeMap<RiskBand, usize>,
    pub by_category: BTreeMap<RiskCategory, usize>,
    pub mean_score: f64,
    pub max_score: u8,
}

impl BatchRiskSummary {
    pub fn from_analyses(analyses: &[RiskAnalysis]) -> Self {
        if analyses.is_empty() {
            return Self::default();
        }

        let mut by_band = BTreeMap::new();
        let mut by_category = BTreeMap::new();
        let mut score_sum = 0u64;
        let mut max_score = 0u8;

        for analysis in analyses {
            *by_band.entry(analysis.risk_band).or_insert(0) += 1;
            for category in &analysis.risk_categories {
                *by_category.entry(*category).or_insert(0) += 1;
            }
            score_sum += u64::from(analysis.risk_score);
            max_score = max_score.max(analysis.risk_score);
        }

        Self {
            total: analyses.len(),
            by_band,
            by_category,
            mean_score: score_sum as f64 / analyses.len() as f64,
            max_score,
        }
    }

    /// Articles in HIGH or CRITICAL
    pub fn elevated(&self) -> usize {
        [RiskBand::High, RiskBand::Critical]
            .iter()
            .filter_map(|band| self.by_band.get(band))
            .sum()
    }
}
