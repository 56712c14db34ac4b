//! Property-based tests for the article risk engine
//! Articles are assembled from trigger phrases and filler to hit many rule paths

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::sync::Arc;
use supply_risk_monitor::{
    models::{Article, RiskBand, STRONG_MATCH_STRENGTH, MEDIUM_MATCH_STRENGTH},
    risk::{ExplainableRiskEngine, RiskEngine, RuleBasedRiskEngine},
    services::RiskAnalysisService,
    utils::FixedClock,
};

fn engine() -> RuleBasedRiskEngine {
    let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
    RuleBasedRiskEngine::new()
        .unwrap()
        .with_clock(Arc::new(FixedClock::new(now)))
}

// Phrases that exercise gating, categories, horizons and evidence
const PHRASES: &[&str] = &[
    "chip", "MLCC", "wafer fab", "shortage", "tight supply", "scarcity",
    "price increase", "export controls", "explosion", "field failure",
    "quality issue", "effective immediately", "next quarter", "2027",
    "announced", "may", "rumor", "up 12%", "$4,000", "Acme Corp",
    "lead time", "hotel", "weather",
];

fn phrase() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(PHRASES).prop_map(String::from),
        1 => "[a-z]{1,10}",
    ]
}

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(phrase(), 0..12).prop_map(|words| words.join(" "))
}

fn source() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Reuters".to_string())),
        Just(Some("DigiTimes".to_string())),
        Just(Some("Some Blog".to_string())),
    ]
}

fn article() -> impl Strategy<Value = Article> {
    (text(), text(), source(), prop::option::of(0i64..240)).prop_map(|(title, body, source, hours_ago)| {
        let mut article = Article::new(title).with_body(body);
        if let Some(source) = source {
            article = article.with_source(source);
        }
        if let Some(hours) = hours_ago {
            let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
            article = article.with_published_at((now - Duration::hours(hours)).to_rfc3339());
        }
        article
    })
}

proptest! {
    /// Score, confidence and band always stay consistent
    #[test]
    fn test_score_and_band_invariants(article in article()) {
        let analysis = engine().analyze(&article);

        prop_assert!(analysis.risk_score <= 100);
        prop_assert!(analysis.confidence <= 100);
        prop_assert_eq!(analysis.risk_band, RiskBand::from_score(analysis.risk_score));
    }

    /// Strength map keys are exactly the detected categories
    #[test]
    fn test_category_strength_matches_categories(article in article()) {
        let analysis = engine().analyze(&article);

        let keys: Vec<_> = analysis.category_strength.keys().copied().collect();
        prop_assert_eq!(&keys, &analysis.risk_categories);
        for strength in analysis.category_strength.values() {
            prop_assert!(*strength == STRONG_MATCH_STRENGTH || *strength == MEDIUM_MATCH_STRENGTH);
        }
    }

    /// Suppressed verdicts are capped LOW with no categories
    #[test]
    fn test_suppression_invariants(article in article()) {
        let explanation = engine().explain(&article);

        if explanation.suppressed {
            prop_assert!(explanation.analysis.risk_score <= 25);
            prop_assert_eq!(explanation.analysis.risk_band, RiskBand::Low);
            prop_assert!(explanation.analysis.risk_categories.is_empty());
        } else {
            prop_assert_eq!(explanation.analysis.risk_score, explanation.components.total());
        }
        if !explanation.electronics_context {
            prop_assert!(explanation.analysis.risk_categories.is_empty());
        }
    }

    /// Component ranges
    #[test]
    fn test_component_bounds(article in article()) {
        let components = engine().explain(&article).components;

        prop_assert!([5, 15, 25, 35].contains(&components.severity));
        prop_assert!(components.immediacy >= 2 && components.immediacy <= 20);
        prop_assert!(components.procurement_relevance <= 25);
        prop_assert!([4, 8, 14, 20].contains(&components.specificity));
    }

    /// Same engine, same clock, same article: same verdict
    #[test]
    fn test_analysis_is_deterministic(article in article()) {
        let engine = engine();
        prop_assert_eq!(engine.analyze(&article), engine.analyze(&article));
    }

    /// Parallel batches return the sequential results in input order
    #[test]
    fn test_parallel_batch_matches_sequential(articles in prop::collection::vec(article(), 0..16)) {
        let service = RiskAnalysisService::new(Arc::new(engine()));
        prop_assert_eq!(
            service.analyze_batch_parallel(&articles),
            service.analyze_batch(&articles)
        );
    }
}
