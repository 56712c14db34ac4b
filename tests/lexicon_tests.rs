use std::io::Write;
use std::sync::Arc;
use std::thread;
use supply_risk_monitor::{
    config::ValidationError,
    models::{Article, RiskBand, RiskCategory, TimeHorizon},
    risk::{BandThresholds, Lexicon, RiskEngine, RiskError, RuleBasedRiskEngine},
};

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_load_toml_lexicon_file() {
    let mut lexicon = Lexicon::default();
    lexicon.context_words.push("Quartz Crystal".to_string());

    let file = write_temp(".toml", &lexicon.to_toml_string().unwrap());
    let loaded = Lexicon::from_file(file.path()).unwrap();

    assert!(loaded.context_words.contains(&"quartz crystal".to_string()));
    assert_eq!(loaded.category_triggers.len(), RiskCategory::ALL.len());
}

#[test]
fn test_load_json_lexicon_file() {
    let json = serde_json::to_string(&Lexicon::default()).unwrap();
    let file = write_temp(".json", &json);

    let loaded = Lexicon::from_file(file.path()).unwrap();
    assert_eq!(loaded, Lexicon::default());
}

#[test]
fn test_missing_file_is_load_error() {
    let err = Lexicon::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, RiskError::LexiconLoad { .. }));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let file = write_temp(".toml", "context_words = [unterminated");
    let err = Lexicon::from_file(file.path()).unwrap_err();
    assert!(matches!(err, RiskError::TomlParse(_)));
}

#[test]
fn test_missing_category_is_rejected() {
    let mut lexicon = Lexicon::default();
    lexicon.category_triggers.remove(&RiskCategory::DemandShock);

    let err = RuleBasedRiskEngine::with_lexicon(lexicon).unwrap_err();
    assert!(matches!(
        err,
        RiskError::InvalidLexicon(ValidationError::MissingCategory(RiskCategory::DemandShock))
    ));
}

#[test]
fn test_missing_horizon_is_rejected() {
    let mut lexicon = Lexicon::default();
    lexicon.horizon_triggers.remove(&TimeHorizon::Medium);

    let err = RuleBasedRiskEngine::with_lexicon(lexicon).unwrap_err();
    assert!(matches!(
        err,
        RiskError::InvalidLexicon(ValidationError::MissingHorizon(TimeHorizon::Medium))
    ));
}

#[test]
fn test_duplicates_after_lowercasing_are_rejected() {
    let mut lexicon = Lexicon::default();
    lexicon.vague_indicators.push("MAY".to_string());

    let err = lexicon.into_validated().unwrap_err();
    assert!(matches!(
        err,
        RiskError::InvalidLexicon(ValidationError::DuplicateEntry { .. })
    ));
}

#[test]
fn test_unordered_bands_are_rejected() {
    let mut lexicon = Lexicon::default();
    lexicon.bands = BandThresholds {
        watch: 60,
        high: 50,
        critical: 90,
    };

    let err = lexicon.into_validated().unwrap_err();
    assert!(matches!(
        err,
        RiskError::InvalidLexicon(ValidationError::InvalidBands { .. })
    ));
}

#[test]
fn test_custom_band_thresholds_apply() {
    let mut lexicon = Lexicon::default();
    lexicon.bands = BandThresholds {
        watch: 10,
        high: 20,
        critical: 26,
    };
    let engine = RuleBasedRiskEngine::with_lexicon(lexicon).unwrap();

    let analysis = engine.analyze(&Article::new("MLCC allocation notice"));
    assert!(analysis.risk_score >= 26);
    assert_eq!(analysis.risk_band, RiskBand::Critical);
}

#[test]
fn test_custom_trigger_detected_after_injection() {
    let mut lexicon = Lexicon::default();
    if let Some(triggers) = lexicon.category_triggers.get_mut(&RiskCategory::CyberSecurityOperational) {
        triggers.strong.push("wiper malware".to_string());
    }
    let engine = RuleBasedRiskEngine::with_lexicon(lexicon).unwrap();

    let analysis = engine.analyze(&Article::new("Wiper malware stalls PCB assembly plant"));
    assert!(analysis.has_category(RiskCategory::CyberSecurityOperational));
}

#[test]
fn test_readers_see_whole_tables_during_swap() {
    let engine = Arc::new(RuleBasedRiskEngine::new().unwrap());
    let article = Article::new("Chip line hit by flux storm");

    let mut custom = Lexicon::default();
    if let Some(triggers) = custom.category_triggers.get_mut(&RiskCategory::FactoryFabOutage) {
        triggers.strong.push("flux storm".to_string());
    }

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let article = article.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let analysis = engine.analyze(&article);
                    let keys: Vec<_> = analysis.category_strength.keys().copied().collect();
                    assert_eq!(keys, analysis.risk_categories);
                }
            })
        })
        .collect();

    engine.replace_lexicon(custom).unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert!(engine.analyze(&article).has_category(RiskCategory::FactoryFabOutage));
}
