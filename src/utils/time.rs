//! Time utilities and the cache freshness policy

use chrono::{DateTime, Duration, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Whether a record last written at `updated_at` may still be served
///
/// True iff `now - updated_at < threshold_seconds`.
pub fn is_fresh(updated_at: DateTime<Utc>, threshold_seconds: i64) -> bool {
    is_fresh_at(updated_at, now_utc(), threshold_seconds)
}

/// [`is_fresh`] evaluated against an explicit clock reading
pub fn is_fresh_at(updated_at: DateTime<Utc>, now: DateTime<Utc>, threshold_seconds: i64) -> bool {
    now - updated_at < Duration::seconds(threshold_seconds)
}

/// Format a duration as a human-readable string
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds();

    if total_seconds < 0 {
        return "0s".to_string();
    }

    let days = total_seconds / 86400;
    let hours = (total_seconds % 86400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut parts = Vec::new();

    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }

    parts.join(" ")
}

/// Human-readable age of a record
pub fn age_of(updated_at: DateTime<Utc>) -> String {
    format_duration(now_utc() - updated_at)
}
