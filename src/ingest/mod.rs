// src/ingest/mod.rs
pub mod parse;
pub mod providers;
pub mod types;

use crate::ingest::types::{FeedEntry, FeedSource, NewsItem};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

/// Entries taken from the top of each feed. The window is applied before
/// entries without a title or link are dropped.
pub const MAX_ITEMS_PER_FEED: usize = 4;
/// Stand-in for entries that carry no description.
pub const NO_DESCRIPTION: &str = "Brak opisu";
/// Record tag that starts every news entry in the combined text.
pub const TITLE_TAG: &str = "TYTUŁ:";

const DESCRIPTION_MAX_CHARS: usize = 500;

/// One-time metrics registration (so series carry descriptions when a recorder exists).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("news_feed_items_total", "Feed items kept for the digest.");
        describe_counter!("news_feed_errors_total", "Feed fetch/parse errors.");
        describe_counter!("news_feed_bytes_total", "Feed bytes downloaded.");
        describe_histogram!("news_feed_parse_ms", "Feed parse time in milliseconds.");
    });
}

/// Clean a feed description: decode entities, strip tags, collapse whitespace, cap length.
pub fn normalize_description(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > DESCRIPTION_MAX_CHARS {
        out = out.chars().take(DESCRIPTION_MAX_CHARS).collect();
        out.push('…');
    }
    out
}

/// Fixed-format record for one item.
pub fn format_record(item: &NewsItem) -> String {
    let description = item
        .description
        .as_deref()
        .map(normalize_description)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    format!(
        "{TITLE_TAG} {}\nOPIS: {}\nLINK: {}\n---\n",
        item.title, description, item.link
    )
}

/// Fetch every source in order and merge up to `MAX_ITEMS_PER_FEED` items of each
/// into one text block. A failing source is logged and skipped; never fails.
pub async fn collect_news(sources: &[Box<dyn FeedSource>]) -> String {
    ensure_metrics_described();
    info!(feeds = sources.len(), "fetching news from RSS");

    let mut results = Vec::with_capacity(sources.len());
    for src in sources {
        results.push((src.endpoint(), src.fetch_items().await));
    }

    let per_feed: Vec<Vec<FeedEntry>> = results
        .into_iter()
        .filter_map(|(endpoint, res)| match res {
            Ok(items) => Some(items),
            Err(e) => {
                warn!(error = ?e, feed = endpoint, "feed skipped");
                counter!("news_feed_errors_total").increment(1);
                None
            }
        })
        .collect();
    let feeds_ok = per_feed.len();

    let text: String = per_feed
        .into_iter()
        .flat_map(top_items)
        .map(|item| format_record(&item))
        .collect();

    let kept = count_records(&text);
    counter!("news_feed_items_total").increment(kept as u64);
    info!(
        feeds_ok,
        feeds_failed = sources.len() - feeds_ok,
        items = kept,
        "news collected"
    );
    text
}

/// The first `MAX_ITEMS_PER_FEED` entries, minus those without a title or link.
fn top_items(entries: Vec<FeedEntry>) -> Vec<NewsItem> {
    entries
        .into_iter()
        .take(MAX_ITEMS_PER_FEED)
        .filter_map(|entry| {
            let item = entry.into_item();
            if item.is_none() {
                debug!("skipping feed entry without title or link");
            }
            item
        })
        .collect()
}

/// Number of records in a combined news text.
pub fn count_records(text: &str) -> usize {
    text.lines().filter(|l| l.starts_with(TITLE_TAG)).count()
}
