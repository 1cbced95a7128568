//! RFC 822 date handling for `<pubDate>` and `<lastBuildDate>`.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// An RSS date string that cannot be parsed under RFC 822 allowances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RssDateError {
    #[error("RSS date strings must be non-empty")]
    Empty,

    #[error("invalid RSS date string: \"{0}\"")]
    Invalid(String),
}

/// Parse an RFC 822 date-time string as used by RSS `<pubDate>` and
/// `<lastBuildDate>`.
///
/// Feeds frequently omit the zone; a zone-less date is taken as UTC.
pub fn parse_rfc822_date(value: &str) -> Result<DateTime<FixedOffset>, RssDateError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RssDateError::Empty);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(parsed);
    }
    // Zone-less date: retry with an explicit UTC offset.
    let assumed_utc = format!("{} +0000", trimmed);
    DateTime::parse_from_rfc2822(&assumed_utc)
        .map_err(|_| RssDateError::Invalid(value.to_string()))
}

/// Parse an optional RSS date string, passing `None` through.
pub fn parse_optional_rfc822_date(
    value: Option<&str>,
) -> Result<Option<DateTime<FixedOffset>>, RssDateError> {
    value.map(parse_rfc822_date).transpose()
}
