//! User-data services: annotations, reading history, plans and progress.
//!
//! These share the storage adapter with the content tables and never touch
//! verse text.

pub mod bookmarks;
pub mod highlights;
pub mod history;
pub mod plans;
pub mod progress;
pub mod settings;

use chrono::{DateTime, SecondsFormat, Utc};

/// Stored timestamp format: RFC 3339, millisecond precision, `Z` suffix.
/// Every stored value begins with its `YYYY-MM-DD` calendar day.
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// `part / whole * 100`, rounded to two decimals; zero when `whole` is zero.
pub(crate) fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 10_000.0).round() / 100.0
}
