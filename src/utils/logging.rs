use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;
use crate::error::AppError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when it is set. Output goes to
/// stderr so stdout stays reserved for verdicts.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), AppError> {
    let log_level = settings
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("supply_risk_monitor={}", log_level).into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match settings.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).try_init(),
        "pretty" => registry.with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr)).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr)).try_init(),
    };
    result.map_err(|e| AppError::InternalError(format!("Failed to initialize logging: {}", e)))?;

    info!(level = %settings.level, format = %settings.format, "Logging initialized");
    Ok(())
}
