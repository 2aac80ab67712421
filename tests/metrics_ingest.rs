// tests/metrics_ingest.rs
use daily_brief::ingest::collect_news;
use daily_brief::ingest::providers::RssFeedProvider;
use daily_brief::ingest::types::FeedSource;
use metrics_exporter_prometheus::PrometheusBuilder;

#[tokio::test]
async fn metrics_exposed_after_collect() {
    // Install a local recorder for the test
    let handle = PrometheusBuilder::new().install_recorder().expect("recorder");

    let good = std::fs::read_to_string("tests/fixtures/techcrunch_two.xml").expect("fixture");
    let bad = std::fs::read_to_string("tests/fixtures/broken_feed.xml").expect("fixture");
    let sources: Vec<Box<dyn FeedSource>> = vec![
        Box::new(RssFeedProvider::from_fixture_str("https://techcrunch.com/feed/", &good)),
        Box::new(RssFeedProvider::from_fixture_str("https://bad.example/feed", &bad)),
    ];
    let _ = collect_news(&sources).await;

    let out = handle.render();
    assert!(out.contains("news_feed_items_total 2"), "{out}");
    assert!(out.contains("news_feed_errors_total 1"), "{out}");
    assert!(out.contains("news_feed_parse_ms"));
}
