//! Internal helpers for record coercion.
//!
//! These utilities are **not** part of the public API. They centralize the
//! degradation policy for loosely typed store rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a stored timestamp, falling back to the Unix epoch.
///
/// The store delivers `created_at` as text: usually RFC 3339, sometimes a
/// naive datetime or a bare date. Unparsable values become the epoch so the
/// record sorts as oldest instead of failing the whole ledger.
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    let trimmed = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.with_timezone(&Utc);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.and_utc();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return parsed.and_utc();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        && let Some(midnight) = parsed.and_hms_opt(0, 0, 0)
    {
        return midnight.and_utc();
    }

    DateTime::UNIX_EPOCH
}
