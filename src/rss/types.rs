//! All types of the RSS 2.0 document model.
//!
//! One struct per RSS element, each with a `validate()` method where the
//! format imposes constraints. Numeric fields a document can populate with
//! out-of-range values stay signed; `validate()` rejects them after
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A model constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RssValidationError {
    /// `<item>` carries neither a title nor a description.
    #[error("RSS items require at least a title or a description")]
    ItemMissingContent,

    /// `<enclosure length>` is negative.
    #[error("enclosure length must be a non-negative byte count, got {0}")]
    NegativeEnclosureLength(i64),

    /// `<cloud protocol>` names an unsupported protocol.
    #[error("cloud protocol must be one of HTTP-POST, XML-RPC, or SOAP 1.1, got \"{0}\"")]
    UnsupportedCloudProtocol(String),

    /// `<image><width>` exceeds the format maximum.
    #[error("image width must not exceed 144 pixels, got {0}")]
    ImageTooWide(u32),

    /// `<image><height>` exceeds the format maximum.
    #[error("image height must not exceed 400 pixels, got {0}")]
    ImageTooTall(u32),

    /// `<skipHours>` lists more than 24 hours.
    #[error("skipHours may contain at most 24 entries, got {0}")]
    TooManySkipHours(usize),

    /// A skip hour is outside 0–23.
    #[error("each skip hour must be between 0 and 23 inclusive, got {0}")]
    SkipHourOutOfRange(u8),

    /// `<skipDays>` lists more than the seven days of the week.
    #[error("skipDays may contain at most the seven days of the week, got {0}")]
    TooManySkipDays(usize),

    /// `<ttl>` is negative.
    #[error("ttl must be a non-negative number of minutes, got {0}")]
    NegativeTtl(i64),

    /// `<rss version>` is not "2.0".
    #[error("RSS 2.0 documents must declare version \"2.0\", got \"{0}\"")]
    UnsupportedVersion(String),
}

// ============================================================================
// Taxonomy and identity elements
// ============================================================================

/// Taxonomy element, as described for channel- and item-level `<category>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Forward-slash-separated string identifying a hierarchic location in the
    /// indicated taxonomy.
    pub value: String,

    /// Categorization taxonomy associated with this category.
    #[serde(default)]
    pub domain: Option<String>,
}

/// Globally unique identifier for an item, following `<guid>` semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guid {
    /// String that uniquely identifies the item; aggregators may use it to
    /// detect new entries.
    pub value: String,

    /// When true, the guid is a permalink to the item. Defaults to true.
    #[serde(default = "default_true")]
    pub is_perma_link: bool,
}

fn default_true() -> bool {
    true
}

/// Media object attached to an item via the `<enclosure>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    /// HTTP URL where the enclosure is located.
    pub url: String,

    /// Size of the enclosure in bytes.
    pub length: i64,

    /// Standard MIME type indicating the nature of the enclosure.
    pub media_type: String,
}

impl Enclosure {
    pub fn validate(&self) -> Result<(), RssValidationError> {
        if self.length < 0 {
            return Err(RssValidationError::NegativeEnclosureLength(self.length));
        }
        Ok(())
    }
}

/// Channel an item originated from, mirroring the `<source>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Human-readable name of the source channel, derived from its `<title>`.
    pub name: String,

    /// URL that links to the XMLization of the source channel.
    pub url: String,
}

// ============================================================================
// Channel sub-elements
// ============================================================================

/// `<cloud>` element advertising an rssCloud-compatible notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloud {
    /// Domain name of the web service providing rssCloud notifications.
    pub domain: String,

    /// TCP port on which the cloud service listens for subscription requests.
    pub port: u16,

    /// Request path to invoke when registering for updates.
    pub path: String,

    /// Procedure name to call when requesting notification.
    pub register_procedure: String,

    /// Protocol supported by the cloud service (HTTP-POST, XML-RPC, or
    /// SOAP 1.1).
    pub protocol: String,
}

impl Cloud {
    pub fn validate(&self) -> Result<(), RssValidationError> {
        const ALLOWED: [&str; 6] = [
            "HTTP-POST",
            "http-post",
            "XML-RPC",
            "xml-rpc",
            "SOAP 1.1",
            "soap",
        ];
        if !ALLOWED.contains(&self.protocol.as_str()) {
            return Err(RssValidationError::UnsupportedCloudProtocol(
                self.protocol.clone(),
            ));
        }
        Ok(())
    }
}

/// `<image>` element that visually brands the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// URL of a GIF, JPEG, or PNG image that represents the channel.
    pub url: String,

    /// Descriptive text for the image, used as the ALT attribute when the
    /// channel is rendered in HTML.
    pub title: String,

    /// URL of the site; the image links to it when rendered.
    pub link: String,

    /// Image width in pixels. Defaults to 88, must not exceed 144.
    #[serde(default = "default_image_width")]
    pub width: u32,

    /// Image height in pixels. Defaults to 31, must not exceed 400.
    #[serde(default = "default_image_height")]
    pub height: u32,

    /// Text for the TITLE attribute of the link formed around the image.
    #[serde(default)]
    pub description: Option<String>,
}

pub(crate) fn default_image_width() -> u32 {
    88
}

pub(crate) fn default_image_height() -> u32 {
    31
}

impl Image {
    pub fn validate(&self) -> Result<(), RssValidationError> {
        if self.width > 144 {
            return Err(RssValidationError::ImageTooWide(self.width));
        }
        if self.height > 400 {
            return Err(RssValidationError::ImageTooTall(self.height));
        }
        Ok(())
    }
}

/// `<textInput>` element describing a text submission interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    /// Label for the Submit button in the text input area.
    pub title: String,

    /// Purpose of the text input area.
    pub description: String,

    /// Name of the text object in the input area.
    pub name: String,

    /// URL of the CGI script that processes text input requests.
    pub link: String,
}

/// Day name used by `<skipDays>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monday => write!(f, "Monday"),
            Self::Tuesday => write!(f, "Tuesday"),
            Self::Wednesday => write!(f, "Wednesday"),
            Self::Thursday => write!(f, "Thursday"),
            Self::Friday => write!(f, "Friday"),
            Self::Saturday => write!(f, "Saturday"),
            Self::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Unrecognized `<skipDays>` day name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized weekday name")]
pub struct UnknownWeekdayError;

impl FromStr for Weekday {
    type Err = UnknownWeekdayError;

    /// Case-insensitive; feeds in the wild emit `monday` and `MONDAY` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            "sunday" => Ok(Self::Sunday),
            _ => Err(UnknownWeekdayError),
        }
    }
}

// ============================================================================
// Items
// ============================================================================

/// An `<item>`: a story, synopsis, or complete piece of content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Title of the item. At least one of title or description must be
    /// present.
    #[serde(default)]
    pub title: Option<String>,

    /// URL of the item; may be omitted when the item is complete in itself.
    #[serde(default)]
    pub link: Option<String>,

    /// Synopsis or full content of the item; entity-encoded HTML is
    /// permitted.
    #[serde(default)]
    pub description: Option<String>,

    /// Email address of the author of the item.
    #[serde(default)]
    pub author: Option<String>,

    /// Categories that classify the item.
    #[serde(default)]
    pub categories: Vec<Category>,

    /// URL of the comments page for the item.
    #[serde(default)]
    pub comments: Option<String>,

    /// Media object attached to the item.
    #[serde(default)]
    pub enclosure: Option<Enclosure>,

    /// Globally unique identifier helping aggregators avoid repeats.
    #[serde(default)]
    pub guid: Option<Guid>,

    /// Publication date as an RFC 822 date-time string.
    #[serde(default)]
    pub pub_date: Option<String>,

    /// Channel from which the item originated.
    #[serde(default)]
    pub source: Option<Source>,
}

impl Item {
    pub fn validate(&self) -> Result<(), RssValidationError> {
        if self.title.is_none() && self.description.is_none() {
            return Err(RssValidationError::ItemMissingContent);
        }
        Ok(())
    }
}

// ============================================================================
// Channel
// ============================================================================

/// Required metadata and content elements of an RSS `<channel>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Name of the channel; should match the title of the corresponding
    /// website.
    pub title: String,

    /// URL of the HTML website corresponding to the channel.
    pub link: String,

    /// Phrase or sentence describing the channel's content.
    pub description: String,

    /// Language code of the channel.
    #[serde(default)]
    pub language: Option<String>,

    /// Copyright notice covering the content in the channel.
    #[serde(default)]
    pub copyright: Option<String>,

    /// Email address of the person responsible for editorial content.
    #[serde(default)]
    pub managing_editor: Option<String>,

    /// Email address of the person responsible for technical issues.
    #[serde(default)]
    pub web_master: Option<String>,

    /// Publication date for the channel content, as an RFC 822 string.
    #[serde(default)]
    pub pub_date: Option<String>,

    /// Date the channel content last changed, as an RFC 822 string.
    #[serde(default)]
    pub last_build_date: Option<String>,

    /// Categories to which the channel belongs.
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Program used to generate the channel.
    #[serde(default)]
    pub generator: Option<String>,

    /// URL of documentation for the format used in the RSS file.
    #[serde(default)]
    pub docs: Option<String>,

    /// rssCloud registration endpoint for lightweight publish-subscribe
    /// updates.
    #[serde(default)]
    pub cloud: Option<Cloud>,

    /// Time to live in minutes: how long the channel may be cached before
    /// refresh.
    #[serde(default)]
    pub ttl: Option<i64>,

    /// Image displayed alongside the feed.
    #[serde(default)]
    pub image: Option<Image>,

    /// PICS rating string for the channel.
    #[serde(default)]
    pub rating: Option<String>,

    /// Text input box that aggregators may render with the channel.
    #[serde(default)]
    pub text_input: Option<TextInput>,

    /// Up to 24 GMT hours (0–23) during which aggregators may skip reading
    /// the channel.
    #[serde(default)]
    pub skip_hours: Vec<u8>,

    /// Up to seven named days during which aggregators may skip reading the
    /// channel.
    #[serde(default)]
    pub skip_days: Vec<Weekday>,

    /// Ordered collection of items contained in the channel.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Channel {
    pub fn validate(&self) -> Result<(), RssValidationError> {
        if self.skip_hours.len() > 24 {
            return Err(RssValidationError::TooManySkipHours(self.skip_hours.len()));
        }
        if let Some(&hour) = self.skip_hours.iter().find(|&&h| h > 23) {
            return Err(RssValidationError::SkipHourOutOfRange(hour));
        }
        if self.skip_days.len() > 7 {
            return Err(RssValidationError::TooManySkipDays(self.skip_days.len()));
        }
        if let Some(ttl) = self.ttl {
            if ttl < 0 {
                return Err(RssValidationError::NegativeTtl(ttl));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Document root
// ============================================================================

/// Top-level representation of an RSS 2.0 document: the `<rss>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssFeed {
    /// The single `<channel>` element containing metadata and content
    /// entries.
    pub channel: Channel,

    /// Version attribute of the `<rss>` element; must be "2.0".
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "2.0".to_string()
}

impl RssFeed {
    pub fn validate(&self) -> Result<(), RssValidationError> {
        if self.version != "2.0" {
            return Err(RssValidationError::UnsupportedVersion(self.version.clone()));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
