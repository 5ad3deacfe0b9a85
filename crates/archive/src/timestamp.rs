//! XEP-0082 date/time profile helpers.
//!
//! Archive timestamps travel as strings and stay strings inside the
//! entities; these helpers convert at the edges for callers that want a
//! concrete instant. The date/time profile is RFC 3339.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Parses a XEP-0082 date/time profile value.
pub fn parse_timestamp(value: &str) -> chrono::ParseResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
}

/// Formats an instant as a XEP-0082 date/time profile value in UTC.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}
