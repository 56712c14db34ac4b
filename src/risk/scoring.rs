// Score components and confidence for the rule-based engine
use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;

use crate::models::{RiskCategory, TimeHorizon};
use crate::risk::detection::{contains_any, matching_phrases};
use crate::risk::{Lexicon, RiskError};
use crate::utils::time::{is_within_hours_of, parse_iso_timestamp};

pub const BASE_CONFIDENCE: i32 = 50;
pub const MAX_VAGUE_PENALTY: i32 = 15;
pub const RECENCY_WINDOW_HOURS: i64 = 48;
pub const RECENCY_BONUS: u8 = 3;
pub const MAX_IMMEDIACY: u8 = 20;
pub const MAX_PROCUREMENT_RELEVANCE: u8 = 25;

const HIGH_SEVERITY: [RiskCategory; 3] = [
    RiskCategory::FactoryFabOutage,
    RiskCategory::ExportControlsSanctions,
    RiskCategory::GeopoliticalConflict,
];

const MEDIUM_SEVERITY: [RiskCategory; 3] = [
    RiskCategory::SupplyShortage,
    RiskCategory::TariffTradePolicy,
    RiskCategory::EolLifecycle,
];

/// Regex detectors for hard evidence in the text
#[derive(Debug, Clone)]
pub struct EvidencePatterns {
    year: Regex,
    percentage: Regex,
    dollar_amount: Regex,
    number: Regex,
    company: Regex,
}

impl EvidencePatterns {
    pub fn compile() -> Result<Self, RiskError> {
        Ok(Self {
            year: Regex::new(r"\b\d{4}\b")?,
            percentage: Regex::new(r"\b\d+%")?,
            dollar_amount: Regex::new(r"\$[\d,]+")?,
            number: Regex::new(r"\b\d+")?,
            company: Regex::new(r"(?i)\b[a-z][a-z]+\s+(inc|corp|ltd|co|llc)\b")?,
        })
    }

    pub fn has_year(&self, text: &str) -> bool {
        self.year.is_match(text)
    }

    pub fn has_percentage(&self, text: &str) -> bool {
        self.percentage.is_match(text)
    }

    pub fn has_dollar_amount(&self, text: &str) -> bool {
        self.dollar_amount.is_match(text)
    }

    pub fn has_number(&self, text: &str) -> bool {
        self.number.is_match(text)
    }

    /// "Acme Corp", "Foundry Ltd" and similar
    pub fn has_company(&self, text: &str) -> bool {
        self.company.is_match(text)
    }
}

fn clamp_percent(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Evidentiary quality of the article (0-100), independent of severity
pub fn calculate_confidence(
    text: &str,
    categories: &[RiskCategory],
    source_name: &str,
    lexicon: &Lexicon,
    patterns: &EvidencePatterns,
) -> u8 {
    let mut confidence = BASE_CONFIDENCE;

    let strong_evidence = categories.iter().any(|category| {
        lexicon
            .triggers_for(*category)
            .map(|triggers| contains_any(text, &triggers.strong))
            .unwrap_or(false)
    });
    if strong_evidence {
        confidence += 15;
    }

    if patterns.has_year(text) {
        confidence += 5;
    }
    if patterns.has_percentage(text) {
        confidence += 5;
    }
    if patterns.has_dollar_amount(text) {
        confidence += 5;
    }

    if contains_any(text, &lexicon.official_indicators) {
        confidence += 10;
    }

    if is_credible_source(source_name, lexicon) {
        confidence += 10;
    }

    let vague_count = matching_phrases(text, &lexicon.vague_indicators).len() as i32;
    confidence -= (vague_count * 5).min(MAX_VAGUE_PENALTY);

    clamp_percent(confidence)
}

pub fn is_credible_source(source_name: &str, lexicon: &Lexicon) -> bool {
    let source = source_name.to_lowercase();
    !source.is_empty() && contains_any(&source, &lexicon.credible_sources)
}

/// Severity tier of the worst matched category (0-35)
pub fn calculate_severity(categories: &[RiskCategory]) -> u8 {
    if categories.iter().any(|c| HIGH_SEVERITY.contains(c)) {
        35
    } else if categories.iter().any(|c| MEDIUM_SEVERITY.contains(c)) {
        25
    } else if !categories.is_empty() {
        15
    } else {
        5
    }
}

/// Horizon points plus a bonus for articles published within the last 48h (0-20)
pub fn calculate_immediacy(horizon: TimeHorizon, published_at: Option<&str>, now: DateTime<Utc>) -> u8 {
    let score = horizon.base_immediacy();

    let Some(raw) = published_at else {
        return score;
    };

    match parse_iso_timestamp(raw) {
        Some(published) if is_within_hours_of(published, now, RECENCY_WINDOW_HOURS) => {
            (score + RECENCY_BONUS).min(MAX_IMMEDIACY)
        }
        Some(_) => score,
        None => {
            debug!(timestamp = %raw, "Ignoring unparseable publication timestamp");
            score
        }
    }
}

/// Component family, procurement and capacity language (0-25)
pub fn calculate_procurement_relevance(text: &str, lexicon: &Lexicon) -> u8 {
    let mut score = 0u8;

    if contains_any(text, &lexicon.component_families) {
        score += 10;
    }
    if contains_any(text, &lexicon.procurement_terms) {
        score += 8;
    }
    if contains_any(text, &lexicon.capacity_terms) {
        score += 7;
    }

    score.min(MAX_PROCUREMENT_RELEVANCE)
}

/// First matching rule wins (0-20)
pub fn calculate_specificity(
    text: &str,
    source_name: &str,
    lexicon: &Lexicon,
    patterns: &EvidencePatterns,
) -> u8 {
    let has_official = contains_any(text, &lexicon.official_indicators);
    let has_hard_detail = patterns.has_number(text) || patterns.has_company(text);

    if has_official && has_hard_detail {
        20
    } else if is_credible_source(source_name, lexicon) {
        14
    } else if has_hard_detail {
        8
    } else {
        4
    }
}
