use anyhow::Result;

/// One feed entry, only ever used to build the combined news text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
}

/// An entry as it appears in the feed; title and link may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}

impl FeedEntry {
    /// `None` when the entry has no title or no link.
    pub fn into_item(self) -> Option<NewsItem> {
        Some(NewsItem {
            title: self.title?,
            link: self.link?,
            description: self.description,
        })
    }
}

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed. Entries are returned in feed order.
    async fn fetch_items(&self) -> Result<Vec<FeedEntry>>;
    /// Endpoint identifier used in logs.
    fn endpoint(&self) -> &str;
}
