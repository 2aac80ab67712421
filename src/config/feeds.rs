// src/config/feeds.rs
//! Feed list loading and startup validation.

use anyhow::{anyhow, ensure, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BriefError;

const ENV_PATH: &str = "FEEDS_PATH";
const FALLBACK_PATHS: &[&str] = &["config/feeds.toml", "config/feeds.json"];

/// Built-in list used when no feeds file is configured.
pub const DEFAULT_FEEDS: &[&str] = &[
    "https://wiadomosci.onet.pl/.feed",
    "https://feeds.feedburner.com/niebezpiecznik/",
    "https://techcrunch.com/feed/",
    "https://feeds.macrumors.com/MacRumors-Mac",
    "https://naekranie.pl/feed/news.xml",
];

/// A feed endpoint that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUrl(String);

impl FeedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Load raw feed entries from an explicit path; the extension picks the format.
pub fn load_feeds_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

/// Resolve the feed list: `$FEEDS_PATH` when set (it must exist), else the
/// first of `FALLBACK_PATHS` on disk, else `DEFAULT_FEEDS`.
pub fn load_feeds_default() -> Result<Vec<String>> {
    if let Some(raw) = std::env::var_os(ENV_PATH) {
        let path = PathBuf::from(raw);
        ensure!(path.exists(), "{ENV_PATH} points to missing file {}", path.display());
        return load_feeds_from(&path);
    }
    match FALLBACK_PATHS.iter().map(Path::new).find(|p| p.exists()) {
        Some(path) => load_feeds_from(path),
        None => Ok(DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()),
    }
}

fn parse_feeds(s: &str, ext: &str) -> Result<Vec<String>> {
    match ext {
        "toml" => parse_toml(s),
        "json" => parse_json(s),
        other => Err(anyhow!("unsupported feed list extension {other:?} (expected .toml or .json)")),
    }
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TomlFeeds {
        feeds: Vec<String>,
    }
    let v: TomlFeeds = toml::from_str(s)?;
    Ok(clean_list(v.feeds))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

/// Trims and drops empty entries. Order is significant, so unlike a
/// whitelist this must not sort.
fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|it| it.trim().to_string())
        .filter(|it| !it.is_empty())
        .collect()
}

/// Validate every entry; the first malformed one fails the whole list.
pub fn validate_feed_urls<S: AsRef<str>>(raw: &[S]) -> Result<Vec<FeedUrl>, BriefError> {
    if raw.is_empty() {
        return Err(BriefError::config("feed list is empty"));
    }
    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            validate_one(s.as_ref())
                .map_err(|why| BriefError::config(format!("feed #{i} {:?}: {why}", s.as_ref())))
        })
        .collect()
}

fn validate_one(s: &str) -> std::result::Result<FeedUrl, String> {
    if let Some(c) = s
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || is_invisible_format_char(*c))
    {
        return Err(format!("contains invisible or whitespace character U+{:04X}", c as u32));
    }
    let schemes = s.matches("://").count();
    if schemes != 1 {
        return Err(format!(
            "expected exactly one scheme separator, found {schemes} (missing comma between entries?)"
        ));
    }
    let url = reqwest::Url::parse(s).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(FeedUrl(s.to_string()))
}

// Soft hyphen, zero-width space/joiners, BOM.
fn is_invisible_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_and_json_keep_order_and_trim() {
        let toml = r#"feeds = [" https://b.example/rss ", "", "https://a.example/rss"]"#;
        let json = r#"["https://z.example/feed", "  https://y.example/feed  ", ""]"#;
        assert_eq!(
            parse_toml(toml).unwrap(),
            vec!["https://b.example/rss".to_string(), "https://a.example/rss".to_string()]
        );
        assert_eq!(
            parse_json(json).unwrap(),
            vec!["https://z.example/feed".to_string(), "https://y.example/feed".to_string()]
        );
    }

    #[test]
    fn format_follows_extension_only() {
        let json = r#"["https://feeds.example/rss"]"#;
        assert!(parse_feeds(json, "toml").is_err());
        assert_eq!(parse_feeds(json, "json").unwrap().len(), 1);
        let err = parse_feeds("feeds = []", "txt").unwrap_err().to_string();
        assert!(err.contains("txt"), "{err}");
    }

    #[test]
    fn default_list_is_valid() {
        let v = validate_feed_urls(DEFAULT_FEEDS).unwrap();
        assert_eq!(v.len(), DEFAULT_FEEDS.len());
        assert_eq!(v[0].as_str(), "https://wiadomosci.onet.pl/.feed");
    }

    #[test]
    fn concatenated_entries_fail_loudly() {
        let raw = [
            "https://techcrunch.com/feed/",
            "https://feeds.macrumors.com/MacRumors\u{AD}-Machttps://naekranie.pl/feed/news.xml",
        ];
        let err = validate_feed_urls(&raw).unwrap_err().to_string();
        assert!(err.contains("feed #1"), "{err}");
    }

    #[test]
    fn concatenation_without_invisible_chars_is_caught_too() {
        let raw = ["https://a.example/rsshttps://b.example/rss"];
        let err = validate_feed_urls(&raw).unwrap_err().to_string();
        assert!(err.contains("scheme separator"), "{err}");
    }

    #[test]
    fn non_http_schemes_are_rejected() {
        assert!(validate_feed_urls(&["ftp://example.com/feed"]).is_err());
        assert!(validate_feed_urls(&["not a url"]).is_err());
    }

    #[test]
    fn empty_list_is_rejected() {
        let raw: [&str; 0] = [];
        assert!(validate_feed_urls(&raw).is_err());
    }
}
