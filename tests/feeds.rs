//! Fixture suite over RSS 2.0 feeds.
//!
//! `just download_testdata` populates testdata/feeds with the downloaded
//! corpus; when the directory is absent the corpus loop has nothing to visit
//! and only the embedded fixtures run.

use feedcraft::rss::{parse_optional_rfc822_date, parse_rss, Weekday};
use std::path::PathBuf;

fn testdata_feeds_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("feeds")
}

fn is_feed_rss_20(feed: &str) -> bool {
    feed.contains("<rss") && feed.contains("version=\"2.0\"")
}

#[test]
fn test_downloaded_rss_20_feeds_parse() {
    let dir = testdata_feeds_dir();
    if !dir.is_dir() {
        return;
    }

    let mut checked = 0usize;
    for entry in std::fs::read_dir(&dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) != Some("xml") {
            continue;
        }
        let content = std::fs::read_to_string(&path).unwrap();
        if !is_feed_rss_20(&content) {
            continue;
        }
        let feed = parse_rss(&content)
            .unwrap_or_else(|e| panic!("failed to parse RSS 2.0 feed {}: {}", path.display(), e));
        assert!(
            !feed.channel.title.is_empty(),
            "empty channel title in {}",
            path.display()
        );
        checked += 1;
    }
    eprintln!("parsed {} downloaded RSS 2.0 feeds", checked);
}

const HARNESS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Liftoff News</title>
    <link>http://liftoff.msfc.nasa.gov/</link>
    <description>Liftoff to Space Exploration.</description>
    <language>en-us</language>
    <pubDate>Tue, 10 Jun 2003 04:00:00 GMT</pubDate>
    <lastBuildDate>Tue, 10 Jun 2003 09:41:01 GMT</lastBuildDate>
    <docs>http://blogs.law.harvard.edu/tech/rss</docs>
    <generator>Weblog Editor 2.0</generator>
    <managingEditor>editor@example.com</managingEditor>
    <webMaster>webmaster@example.com</webMaster>
    <ttl>5</ttl>
    <skipDays><day>Saturday</day><day>Sunday</day></skipDays>
    <item>
      <title>Star City</title>
      <link>http://liftoff.msfc.nasa.gov/news/2003/news-starcity.asp</link>
      <description>How do Americans get ready to work with Russians aboard the
        International Space Station? They take a crash course in culture,
        language and protocol at Russia's &lt;a href="http://howe.iki.rssi.ru/GCTC/gctc_e.htm"&gt;Star City&lt;/a&gt;.</description>
      <pubDate>Tue, 03 Jun 2003 09:39:21 GMT</pubDate>
      <guid>http://liftoff.msfc.nasa.gov/2003/06/03.html#item573</guid>
    </item>
    <item>
      <description>Sky watchers in Europe, Asia, and parts of Alaska and Canada
        will experience a partial eclipse of the Sun on Saturday, May 31st.</description>
      <pubDate>Fri, 30 May 2003 11:06:42 GMT</pubDate>
      <guid>http://liftoff.msfc.nasa.gov/2003/05/30.html#item572</guid>
    </item>
    <item>
      <title>The Engine That Does More</title>
      <link>http://liftoff.msfc.nasa.gov/news/2003/news-VASIMR.asp</link>
      <description>Before man travels to Mars, NASA hopes to design new engines
        that will let us fly through the Solar System more quickly.</description>
      <pubDate>Tue, 27 May 2003 08:37:32 GMT</pubDate>
      <guid>http://liftoff.msfc.nasa.gov/2003/05/27.html#item571</guid>
    </item>
  </channel>
</rss>"#;

#[test]
fn test_harness_feed_extraction() {
    let feed = parse_rss(HARNESS_FEED).unwrap();
    assert_eq!(feed.version, "2.0");

    let ch = &feed.channel;
    assert_eq!(ch.title, "Liftoff News");
    assert_eq!(ch.link, "http://liftoff.msfc.nasa.gov/");
    assert_eq!(ch.language.as_deref(), Some("en-us"));
    assert_eq!(ch.generator.as_deref(), Some("Weblog Editor 2.0"));
    assert_eq!(ch.ttl, Some(5));
    assert_eq!(ch.skip_days, vec![Weekday::Saturday, Weekday::Sunday]);
    assert_eq!(ch.items.len(), 3);

    let first = &ch.items[0];
    assert_eq!(first.title.as_deref(), Some("Star City"));
    assert!(first
        .description
        .as_deref()
        .unwrap()
        .contains(r#"<a href="http://howe.iki.rssi.ru/GCTC/gctc_e.htm">Star City</a>"#));
    let guid = first.guid.as_ref().unwrap();
    assert!(guid.is_perma_link);

    // Titleless item survives on its description alone.
    assert!(ch.items[1].title.is_none());
    assert!(ch.items[1].description.is_some());
}

#[test]
fn test_harness_feed_dates_parse() {
    use chrono::{Datelike, Timelike};

    let feed = parse_rss(HARNESS_FEED).unwrap();
    let built = parse_optional_rfc822_date(feed.channel.last_build_date.as_deref())
        .unwrap()
        .unwrap();
    assert_eq!((built.year(), built.month(), built.day()), (2003, 6, 10));
    assert_eq!((built.hour(), built.minute(), built.second()), (9, 41, 1));

    for item in &feed.channel.items {
        let parsed = parse_optional_rfc822_date(item.pub_date.as_deref()).unwrap();
        assert!(parsed.is_some());
    }
}

#[test]
fn test_non_rss_20_fixture_is_sniffed_out() {
    let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>x</title></feed>"#;
    assert!(!is_feed_rss_20(atom));
    let rss_091 = r#"<rss version="0.91"><channel></channel></rss>"#;
    assert!(!is_feed_rss_20(rss_091));
}
