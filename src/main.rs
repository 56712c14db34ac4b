use std::io::Read;

use serde_json::Value;
use supply_risk_monitor::{
    config::Settings,
    models::Article,
    risk::RiskEngineFactory,
    services::{BatchRiskSummary, RiskAnalysisService},
    utils::{format_timestamp, init_logging, now_utc},
    AppError,
};
use tracing::{error, info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    settings.validate()?;
    init_logging(&settings.logging)?;
    info!(
        engine = %settings.engine.engine_type,
        started_at = %format_timestamp(now_utc()),
        "Starting supply risk monitor"
    );

    let engine = match RiskEngineFactory::from_settings(&settings.engine) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to create risk engine: {}", e);
            return Err(AppError::from(e).into());
        }
    };
    let service = RiskAnalysisService::new(engine);

    let input = read_input(std::env::args().nth(1))?;
    let articles = parse_articles(&input)?;
    if articles.is_empty() {
        warn!("Input contained no articles");
    }

    let analyses = if settings.engine.parallel_batch {
        service.analyze_batch_parallel(&articles)
    } else {
        service.analyze_batch(&articles)
    };

    let output = analyses
        .iter()
        .map(|analysis| analysis.to_value())
        .collect::<Result<Vec<_>, _>>()?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    let summary = BatchRiskSummary::from_analyses(&analyses);
    info!(
        total = summary.total,
        elevated = summary.elevated(),
        max_score = summary.max_score,
        mean_score = summary.mean_score,
        "Batch complete"
    );

    Ok(())
}

/// Read from the given path, or stdin when none is given or the path is `-`
fn read_input(path: Option<String>) -> Result<String, AppError> {
    match path.as_deref() {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// A JSON array of articles or a single article object
fn parse_articles(input: &str) -> Result<Vec<Article>, AppError> {
    match serde_json::from_str::<Value>(input)? {
        Value::Array(items) => Ok(items.into_iter().map(Article::from).collect()),
        object @ Value::Object(_) => Ok(vec![Article::from(object)]),
        other => Err(AppError::InputError(format!(
            "expected an article object or an array of articles, got {}",
            other
        ))),
    }
}
