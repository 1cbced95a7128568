//! RSS 2.0 document model, parser, and date handling.

pub mod datetime;
pub mod parser;
pub mod types;

pub use datetime::{parse_optional_rfc822_date, parse_rfc822_date, RssDateError};
pub use parser::{parse_rss, RssParseError};
pub use types::*;
