use alloc::string::String;
use chrono::{DateTime, Datelike, SecondsFormat};

/// Last year that still renders as four digits.
const MAX_YEAR: i32 = 9999;
use soroban_sdk::Env;

/// Renders unix seconds as fixed-width RFC 3339 UTC text, e.g.
/// `2026-10-17T09:30:00Z`. Fixed width keeps the strings sortable.
pub fn format_rfc3339(secs: u64) -> Option<String> {
    let secs = i64::try_from(secs).ok()?;
    let time = DateTime::from_timestamp(secs, 0)?;
    if time.year() > MAX_YEAR {
        return None;
    }
    Some(time.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Current ledger close time as record timestamp text.
pub fn now(env: &Env) -> Option<String> {
    format_rfc3339(env.ledger().timestamp())
}
