//! Context gating, category detection and time-horizon extraction.
//!
//! Matching is plain substring containment on lower-cased text: no
//! tokenization and no word boundaries, so "war" also fires inside "software".

use std::collections::BTreeMap;

use crate::models::{RiskCategory, TimeHorizon, MEDIUM_MATCH_STRENGTH, STRONG_MATCH_STRENGTH};
use crate::risk::Lexicon;

/// Medium-trigger hits needed to qualify a category without a strong trigger
pub const MEDIUM_TRIGGER_THRESHOLD: usize = 2;

pub fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase.as_str()))
}

/// Distinct phrases from `phrases` found in `text`, in list order
pub fn matching_phrases<'a>(text: &str, phrases: &'a [String]) -> Vec<&'a str> {
    let mut found: Vec<&str> = Vec::new();
    for phrase in phrases {
        if text.contains(phrase.as_str()) && !found.contains(&phrase.as_str()) {
            found.push(phrase.as_str());
        }
    }
    found
}

/// True when the text mentions at least one electronics/procurement word
pub fn has_electronics_context(text: &str, lexicon: &Lexicon) -> bool {
    contains_any(text, &lexicon.context_words)
}

/// One qualified category and the evidence for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub category: RiskCategory,
    pub strength: u8,
    pub strong_hits: Vec<String>,
    pub medium_hits: Vec<String>,
}

impl CategoryMatch {
    pub fn triggers(&self) -> Vec<String> {
        self.strong_hits.iter().chain(self.medium_hits.iter()).cloned().collect()
    }
}

/// Evaluate every category in enumeration order.
///
/// A strong hit qualifies at full strength; otherwise two or more distinct
/// medium hits qualify at reduced strength. Nothing qualifies without context.
pub fn detect_categories(text: &str, lexicon: &Lexicon, has_context: bool) -> Vec<CategoryMatch> {
    if !has_context {
        return Vec::new();
    }

    RiskCategory::ALL
        .iter()
        .filter_map(|category| {
            let triggers = lexicon.triggers_for(*category)?;
            let strong_hits = matching_phrases(text, &triggers.strong);
            let medium_hits = matching_phrases(text, &triggers.medium);

            let strength = if !strong_hits.is_empty() {
                STRONG_MATCH_STRENGTH
            } else if medium_hits.len() >= MEDIUM_TRIGGER_THRESHOLD {
                MEDIUM_MATCH_STRENGTH
            } else {
                return None;
            };

            Some(CategoryMatch {
                category: *category,
                strength,
                strong_hits: strong_hits.into_iter().map(String::from).collect(),
                medium_hits: medium_hits.into_iter().map(String::from).collect(),
            })
        })
        .collect()
}

pub fn strengths(matches: &[CategoryMatch]) -> BTreeMap<RiskCategory, u8> {
    matches.iter().map(|m| (m.category, m.strength)).collect()
}

/// First horizon in priority order with a matching phrase, plus that phrase.
/// Falls back to `NEAR_2_8W` when nothing matches.
pub fn extract_time_horizon<'a>(text: &str, lexicon: &'a Lexicon) -> (TimeHorizon, Option<&'a str>) {
    for horizon in TimeHorizon::PRIORITY {
        let Some(triggers) = lexicon.horizon_triggers.get(&horizon) else {
            continue;
        };
        if let Some(trigger) = triggers.iter().find(|t| text.contains(t.as_str())) {
            return (horizon, Some(trigger.as_str()));
        }
    }
    (TimeHorizon::default(), None)
}
