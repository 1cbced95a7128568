//! CLI subcommands: parse, parse-dir.

use crate::rss::{parse_rss, RssFeed};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an RSS feed and print the titles of its items
    Parse {
        /// Path to the feed file
        feed_path: PathBuf,

        /// Print the parsed feed as JSON instead of the item listing
        #[arg(long)]
        json: bool,
    },

    /// Parse every RSS feed in a directory
    ParseDir {
        /// Directory containing feed files
        feed_dir_path: PathBuf,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Parse { feed_path, json } => cmd_parse(&feed_path, json),
        Commands::ParseDir { feed_dir_path } => cmd_parse_dir(&feed_dir_path),
    }
}

/// Cheap sniff to reject obvious non-RSS input before full parsing.
fn is_feed_any_rss(feed: &str) -> bool {
    feed.contains("<rss")
}

fn cmd_parse(feed_path: &Path, json: bool) -> Result<(), String> {
    let content = std::fs::read_to_string(feed_path)
        .map_err(|e| format!("cannot read {}: {}", feed_path.display(), e))?;

    if !is_feed_any_rss(&content) {
        return Err(format!(
            "{} does not appear to be a valid RSS feed",
            feed_path.display()
        ));
    }

    let feed = parse_rss(&content)
        .map_err(|e| format!("cannot parse {}: {}", feed_path.display(), e))?;

    if json {
        let rendered = serde_json::to_string_pretty(&feed)
            .map_err(|e| format!("serialize error: {}", e))?;
        println!("{}", rendered);
    } else {
        print_feed(&feed, None);
    }
    Ok(())
}

fn cmd_parse_dir(feed_dir_path: &Path) -> Result<(), String> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(feed_dir_path)
        .map_err(|e| format!("cannot read {}: {}", feed_dir_path.display(), e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    for (i, path) in paths.iter().enumerate() {
        let index = i + 1;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("[{}] cannot read {}: {}", index, name, e);
                continue;
            }
        };

        if !is_feed_any_rss(&content) {
            eprintln!("[{}] {}: not a valid RSS feed", index, name);
            continue;
        }

        match parse_rss(&content) {
            Ok(feed) => {
                println!("\n\n-------\n");
                println!("[{}]", index);
                print_feed(&feed, Some(&name));
            }
            Err(e) => eprintln!("[{}] error parsing {}: {}", index, name, e),
        }
    }
    Ok(())
}

/// Display a feed's title and items to stdout.
fn print_feed(feed: &RssFeed, origin: Option<&str>) {
    match origin {
        Some(name) => println!("Feed Title: {} (from {})", feed.channel.title, name),
        None => println!("Feed Title: {}", feed.channel.title),
    }
    println!("Items:");
    for item in &feed.channel.items {
        println!(
            "- {}: {}",
            item.pub_date.as_deref().unwrap_or("(no date)"),
            item.title.as_deref().unwrap_or("(untitled)")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<rss version="2.0">
  <channel>
    <title>CLI Test</title>
    <link>https://example.org/</link>
    <description>d</description>
    <item>
      <title>First</title>
      <pubDate>Tue, 10 Jun 2003 04:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_cmd_parse_valid_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        std::fs::write(&path, FEED).unwrap();
        assert!(cmd_parse(&path, false).is_ok());
        assert!(cmd_parse(&path, true).is_ok());
    }

    #[test]
    fn test_cmd_parse_rejects_non_rss() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<html><body>not a feed</body></html>").unwrap();
        let err = cmd_parse(&path, false).unwrap_err();
        assert!(err.contains("does not appear to be a valid RSS feed"));
    }

    #[test]
    fn test_cmd_parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_parse(&dir.path().join("absent.xml"), false).unwrap_err();
        assert!(err.contains("cannot read"));
    }

    #[test]
    fn test_cmd_parse_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, "<rss version=\"2.0\"></rss>").unwrap();
        let err = cmd_parse(&path, false).unwrap_err();
        assert!(err.contains("cannot parse"));
    }

    #[test]
    fn test_cmd_parse_dir_continues_past_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_good.xml"), FEED).unwrap();
        std::fs::write(dir.path().join("b_not_rss.txt"), "plain text").unwrap();
        std::fs::write(dir.path().join("c_broken.xml"), "<rss version=\"2.0\">").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();
        assert!(cmd_parse_dir(dir.path()).is_ok());
    }

    #[test]
    fn test_cmd_parse_dir_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_parse_dir(&dir.path().join("absent")).unwrap_err();
        assert!(err.contains("cannot read"));
    }

    #[test]
    fn test_rss_sniff() {
        assert!(is_feed_any_rss("<rss version=\"2.0\">"));
        assert!(is_feed_any_rss("  \n<rss>"));
        assert!(!is_feed_any_rss(
            "<feed xmlns=\"http://www.w3.org/2005/Atom\">"
        ));
    }
}
