//! Shared utility functions used across multiple modules.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::Timestamp;
use crate::{Error, Result};

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Truncate text to at most `max` characters, marking the cut with `...`.
pub fn truncate_text(value: &str, max: usize) -> String {
    let value = value.trim();
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Parse a user-entered date.
///
/// Accepts RFC 3339 (`2024-03-01T09:30:00Z`), `YYYY-MM-DD HH:MM` and a bare
/// `YYYY-MM-DD` (midnight). Values without an offset are taken as UTC.
pub fn parse_date_input(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Ok(parsed.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc())
        .ok_or_else(|| Error::InvalidInput(format!("Unrecognized date: {value}")))
}

/// Human-readable form of a stored timestamp; falls back to the raw text.
pub fn display_timestamp(value: &Timestamp) -> String {
    value.to_datetime().map_or_else(
        || value.as_str().to_string(),
        |parsed| parsed.format("%Y-%m-%d %H:%M").to_string(),
    )
}
