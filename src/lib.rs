//! Feedcraft: RSS 2.0 feed parsing.
//!
//! Strict channel models, lenient recovery for malformed optional elements,
//! RFC 822 date handling.

pub mod cli;
pub mod rss;
