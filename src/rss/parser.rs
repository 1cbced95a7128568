//! RSS document parsing and validation.
//!
//! Parses an RSS 2.0 document into the typed model and enforces the split the
//! format calls for:
//! - missing root, missing channel, or missing required channel fields are
//!   fatal;
//! - a malformed optional sub-element (cloud, image, enclosure, guid, source,
//!   textInput) is dropped, never fatal;
//! - items carrying neither title nor description are skipped;
//! - payloads declaring a DOCTYPE or custom entities are refused outright.

use super::types::*;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// An RSS document that cannot be parsed into the expected 2.0 structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RssParseError {
    #[error("empty RSS payload provided")]
    EmptyPayload,

    #[error("refusing to process RSS feeds that declare a document type")]
    DoctypeDeclared,

    #[error("refusing to process RSS feeds that declare custom entities")]
    EntityDeclared,

    #[error("unable to parse RSS XML document: {0}")]
    MalformedXml(String),

    #[error("missing <rss> root element")]
    MissingRoot,

    #[error("missing <channel> element inside <rss>")]
    MissingChannel,

    #[error("missing required <{0}> element in RSS channel")]
    MissingChannelField(&'static str),

    #[error(transparent)]
    Validation(#[from] RssValidationError),
}

/// Parse an RSS 2.0 document.
pub fn parse_rss(rss: &str) -> Result<RssFeed, RssParseError> {
    if rss.trim_start().is_empty() {
        return Err(RssParseError::EmptyPayload);
    }

    // Entity-expansion defense: refuse before any XML processing.
    let upper = rss.to_uppercase();
    if upper.contains("<!DOCTYPE") {
        return Err(RssParseError::DoctypeDeclared);
    }
    if upper.contains("<!ENTITY") {
        return Err(RssParseError::EntityDeclared);
    }

    let root = build_tree(rss)?.ok_or(RssParseError::MissingRoot)?;
    let rss_tag = find_named(&root, "rss").ok_or(RssParseError::MissingRoot)?;

    let version = match rss_tag.attr("version") {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "2.0".to_string(),
    };

    let channel_tag = rss_tag
        .child("channel")
        .ok_or(RssParseError::MissingChannel)?;

    let channel = Channel {
        title: require_text(channel_tag, "title")?,
        link: require_text(channel_tag, "link")?,
        description: require_text(channel_tag, "description")?,
        language: optional_text(channel_tag, "language"),
        copyright: optional_text(channel_tag, "copyright"),
        managing_editor: optional_text(channel_tag, "managingEditor"),
        web_master: optional_text(channel_tag, "webMaster"),
        pub_date: optional_text(channel_tag, "pubDate"),
        last_build_date: optional_text(channel_tag, "lastBuildDate"),
        categories: parse_categories(channel_tag),
        generator: optional_text(channel_tag, "generator"),
        docs: optional_text(channel_tag, "docs"),
        cloud: parse_cloud(channel_tag),
        ttl: optional_text(channel_tag, "ttl").and_then(|t| t.trim().parse::<i64>().ok()),
        image: parse_image(channel_tag),
        rating: optional_text(channel_tag, "rating"),
        text_input: parse_text_input(channel_tag),
        skip_hours: parse_skip_hours(channel_tag),
        skip_days: parse_skip_days(channel_tag),
        items: parse_items(channel_tag),
    };

    let feed = RssFeed { channel, version };
    feed.channel.validate()?;
    for item in &feed.channel.items {
        item.validate()?;
    }
    feed.validate()?;
    Ok(feed)
}

// ============================================================================
// Element tree
// ============================================================================

/// A parsed element: local name, attributes keyed by local name, direct
/// character data, direct children. Namespace prefixes are stripped on both
/// element and attribute names.
#[derive(Debug, Clone)]
struct XmlNode {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// First direct child with the given local name.
    fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given local name, in document order.
    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed character data; `None` when empty.
    fn text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Trimmed attribute value by local name; `None` when absent.
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
    }
}

fn local_name_of(bytes: &[u8]) -> String {
    let local = match bytes.iter().rposition(|&b| b == b':') {
        Some(pos) => &bytes[pos + 1..],
        None => bytes,
    };
    String::from_utf8_lossy(local).into_owned()
}

fn node_from_start(e: &quick_xml::events::BytesStart<'_>) -> XmlNode {
    let mut attrs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = local_name_of(attr.key.as_ref());
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        attrs.push((key, value));
    }
    XmlNode {
        name: local_name_of(e.name().as_ref()),
        attrs,
        text: String::new(),
        children: Vec::new(),
    }
}

/// Resolve a general entity reference to text. Predefined and numeric
/// references decode; anything else degrades to its raw `&name;` spelling.
fn resolve_reference(name: &[u8]) -> String {
    match name {
        b"amp" => "&".to_string(),
        b"lt" => "<".to_string(),
        b"gt" => ">".to_string(),
        b"quot" => "\"".to_string(),
        b"apos" => "'".to_string(),
        _ => {
            if let Some(ch) = resolve_char_reference(name) {
                ch.to_string()
            } else {
                format!("&{};", String::from_utf8_lossy(name))
            }
        }
    }
}

/// Decode `#NNN` / `#xHH` character references.
fn resolve_char_reference(name: &[u8]) -> Option<char> {
    let digits = name.strip_prefix(b"#")?;
    let code = if let Some(hex) = digits.strip_prefix(b"x").or_else(|| digits.strip_prefix(b"X")) {
        u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?
    } else {
        std::str::from_utf8(digits).ok()?.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Build the element tree for a document. Returns the first root element, or
/// `None` for a document with no elements at all.
fn build_tree(xml: &str) -> Result<Option<XmlNode>, RssParseError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(node_from_start(&e));
            }
            Ok(Event::Empty(e)) => {
                let node = node_from_start(&e);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => {
                        if root.is_none() {
                            root = Some(node);
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| RssParseError::MalformedXml("unmatched end tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => {
                        if root.is_none() {
                            root = Some(node);
                        }
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(top) = stack.last_mut() {
                    match t.decode() {
                        Ok(text) => top.text.push_str(&text),
                        Err(_) => top.text.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::GeneralRef(r)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&resolve_reference(&r));
                }
            }
            Ok(Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => return Err(RssParseError::MalformedXml(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(RssParseError::MalformedXml(
            "unexpected end of document".to_string(),
        ));
    }
    Ok(root)
}

/// Depth-first search for the first element with the given local name.
fn find_named<'a>(node: &'a XmlNode, name: &str) -> Option<&'a XmlNode> {
    if node.name == name {
        return Some(node);
    }
    node.children.iter().find_map(|c| find_named(c, name))
}

// ============================================================================
// Channel and item field extraction
// ============================================================================

fn require_text(parent: &XmlNode, name: &'static str) -> Result<String, RssParseError> {
    parent
        .child(name)
        .and_then(|c| c.text())
        .map(str::to_string)
        .ok_or(RssParseError::MissingChannelField(name))
}

fn optional_text(parent: &XmlNode, name: &str) -> Option<String> {
    parent.child(name).and_then(|c| c.text()).map(str::to_string)
}

fn parse_categories(parent: &XmlNode) -> Vec<Category> {
    parent
        .children_named("category")
        .filter_map(|cat| {
            let value = cat.text()?.to_string();
            let domain = cat.attr("domain").map(str::to_string);
            Some(Category { value, domain })
        })
        .collect()
}

fn parse_cloud(parent: &XmlNode) -> Option<Cloud> {
    let tag = parent.child("cloud")?;
    let cloud = Cloud {
        domain: tag.attr("domain")?.to_string(),
        port: tag.attr("port")?.parse::<u16>().ok()?,
        path: tag.attr("path")?.to_string(),
        register_procedure: tag.attr("registerProcedure")?.to_string(),
        protocol: tag.attr("protocol")?.to_string(),
    };
    cloud.validate().ok()?;
    Some(cloud)
}

fn parse_image(parent: &XmlNode) -> Option<Image> {
    let tag = parent.child("image")?;
    let image = Image {
        url: optional_text(tag, "url")?,
        title: optional_text(tag, "title")?,
        link: optional_text(tag, "link")?,
        width: optional_text(tag, "width")
            .and_then(|w| w.trim().parse::<u32>().ok())
            .unwrap_or_else(default_image_width),
        height: optional_text(tag, "height")
            .and_then(|h| h.trim().parse::<u32>().ok())
            .unwrap_or_else(default_image_height),
        description: optional_text(tag, "description"),
    };
    image.validate().ok()?;
    Some(image)
}

fn parse_text_input(parent: &XmlNode) -> Option<TextInput> {
    let tag = parent.child("textInput")?;
    Some(TextInput {
        title: optional_text(tag, "title")?,
        description: optional_text(tag, "description")?,
        name: optional_text(tag, "name")?,
        link: optional_text(tag, "link")?,
    })
}

fn parse_skip_hours(parent: &XmlNode) -> Vec<u8> {
    let Some(tag) = parent.child("skipHours") else {
        return Vec::new();
    };
    tag.children_named("hour")
        .filter_map(|h| h.text()?.parse::<u8>().ok())
        .filter(|&h| h <= 23)
        .collect()
}

fn parse_skip_days(parent: &XmlNode) -> Vec<Weekday> {
    let Some(tag) = parent.child("skipDays") else {
        return Vec::new();
    };
    tag.children_named("day")
        .filter_map(|d| d.text()?.parse::<Weekday>().ok())
        .collect()
}

fn parse_guid(parent: &XmlNode) -> Option<Guid> {
    let tag = parent.child("guid")?;
    let value = tag.text()?.to_string();
    let is_perma_link = match tag.attr("isPermaLink") {
        Some(attr) => match attr.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            // Unknown spellings keep the format's default.
            _ => true,
        },
        None => true,
    };
    Some(Guid {
        value,
        is_perma_link,
    })
}

fn parse_enclosure(parent: &XmlNode) -> Option<Enclosure> {
    let tag = parent.child("enclosure")?;
    let enclosure = Enclosure {
        url: tag.attr("url")?.to_string(),
        length: tag.attr("length")?.parse::<i64>().ok()?,
        media_type: tag.attr("type")?.to_string(),
    };
    enclosure.validate().ok()?;
    Some(enclosure)
}

fn parse_source(parent: &XmlNode) -> Option<Source> {
    let tag = parent.child("source")?;
    Some(Source {
        name: tag.text()?.to_string(),
        url: tag.attr("url").filter(|u| !u.is_empty())?.to_string(),
    })
}

fn parse_items(parent: &XmlNode) -> Vec<Item> {
    parent
        .children_named("item")
        .filter_map(|tag| {
            let title = optional_text(tag, "title");
            let description = optional_text(tag, "description");
            if title.is_none() && description.is_none() {
                return None;
            }
            Some(Item {
                title,
                link: optional_text(tag, "link"),
                description,
                author: optional_text(tag, "author"),
                categories: parse_categories(tag),
                comments: optional_text(tag, "comments"),
                enclosure: parse_enclosure(tag),
                guid: parse_guid(tag),
                pub_date: optional_text(tag, "pubDate"),
                source: parse_source(tag),
            })
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
