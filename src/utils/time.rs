use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use std::fmt;

/// Source of "now" for recency scoring
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        now_utc()
    }
}

/// Clock pinned to a single instant, for deterministic evaluation
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Get current UTC timestamp
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Convert timestamp to human readable format
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

const OFFSET_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y%m%dT%H%M%S%.f%z",
    "%Y%m%dT%H%M%z",
];

// Reduced precision: hour plus offset, minute implied as 00
const HOUR_ONLY_FORMATS: [&str; 2] = ["%Y-%m-%dT%H%:z", "%Y-%m-%d %H%:z"];

fn parse_hour_only(input: &str, fmt: &str) -> Option<DateTime<FixedOffset>> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, input, StrftimeItems::new(fmt)).ok()?;
    parsed.set_minute(0).ok()?;
    parsed.to_datetime().ok()
}

/// Parse an ISO 8601 timestamp that pins an absolute instant.
///
/// Extended (`2025-06-10T08:00:00+00:00`), basic (`20250610T080000Z`) and
/// hour-only (`2025-06-10T08+00:00`) forms are accepted. A trailing `Z` or an
/// explicit offset is required; naive timestamps and bare dates return `None`.
pub fn parse_iso_timestamp(timestamp_str: &str) -> Option<DateTime<Utc>> {
    let trimmed = timestamp_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    let normalized = match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
        Some(rest) => format!("{}+00:00", rest),
        None => trimmed.to_string(),
    };

    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::<FixedOffset>::parse_from_str(&normalized, format).ok())
        .or_else(|| {
            HOUR_ONLY_FORMATS
                .iter()
                .find_map(|format| parse_hour_only(&normalized, format))
        })
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// True when `timestamp` is less than `hours` before `reference`.
/// Timestamps after `reference` count as recent.
pub fn is_within_hours_of(timestamp: DateTime<Utc>, reference: DateTime<Utc>, hours: i64) -> bool {
    reference - timestamp < Duration::hours(hours)
}
