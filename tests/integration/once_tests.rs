//! Integration tests for single-round mode, starting from a config file

use crate::common::mount_page;
use price_ripple::config::load_config;
use price_ripple::scrape::scrape_once;
use price_ripple::storage::load_dataset;
use price_ripple::{ChannelSink, PersistOutcome};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::MockServer;

fn write_config(dir: &TempDir, server: &MockServer, targets: &str) -> std::path::PathBuf {
    let dataset = dir.path().join("prices.csv");
    let config_path = dir.path().join("config.toml");
    let content = format!(
        r#"
[scraper]
request-timeout-secs = 5

[output]
dataset-path = "{}"

[input]
targets-file = "targets.txt"
"#,
        dataset.display()
    );
    std::fs::write(&config_path, content).expect("write config");
    std::fs::write(
        dir.path().join("targets.txt"),
        targets.replace("{base}", &server.uri()),
    )
    .expect("write targets");
    config_path
}

#[tokio::test]
async fn test_once_from_targets_file() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/one", r#"<span class="cost">9.95</span>"#).await;
    mount_page(&mock_server, "/two", r#"<div class="item-price">4</div>"#).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &dir,
        &mock_server,
        "# watched pages\n{base}/one .cost\n\n{base}/two\n",
    );
    let config = load_config(&config_path).expect("Failed to load config");

    let (sink, mut rx) = ChannelSink::new();
    let outcome = scrape_once(&config, Arc::new(sink))
        .await
        .expect("Round failed");

    assert_eq!(
        outcome,
        PersistOutcome::Appended {
            appended: 2,
            total: 2
        }
    );

    let records = load_dataset(&dir.path().join("prices.csv")).expect("load");
    assert_eq!(records[0].price, "9.95");
    assert_eq!(records[1].price, "4");

    let mut last = String::new();
    while let Ok(line) = rx.try_recv() {
        last = line;
    }
    assert!(last.starts_with("Data saved to "));
}

#[tokio::test]
async fn test_once_with_nothing_found_skips_write() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/empty", "<p>out of stock</p>").await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&dir, &mock_server, "{base}/empty\n");
    let config = load_config(&config_path).expect("Failed to load config");

    let (sink, _rx) = ChannelSink::new();
    let outcome = scrape_once(&config, Arc::new(sink))
        .await
        .expect("Round failed");

    assert_eq!(outcome, PersistOutcome::Skipped);
    assert!(!dir.path().join("prices.csv").exists());
}
