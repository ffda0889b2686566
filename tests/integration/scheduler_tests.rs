//! Integration tests for the scrape cycle
//!
//! These tests use wiremock to create mock HTTP servers and drive the
//! scheduler end-to-end against a temporary dataset file.

use crate::common::{lines_until, mount_page, scheduler};
use price_ripple::storage::load_dataset;
use price_ripple::{SchedulerState, Target};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn one_minute() -> NonZeroU32 {
    NonZeroU32::new(1).expect("non-zero")
}

#[tokio::test]
async fn test_full_cycle_persists_successes_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/widget",
        r#"<html><body><span class="price"> $12.99 </span></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/gadget",
        r#"<html><body><div id="price">19.99</div></body></html>"#,
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let dataset = dir.path().join("prices.csv");
    let (scheduler, mut rx) = scheduler(&dataset, Duration::from_millis(50));

    let targets = vec![
        Target::new(format!("{}/widget", base_url), Some(".price")),
        Target::new(format!("{}/missing", base_url), None),
        Target::new(format!("{}/gadget", base_url), None),
    ];
    assert!(scheduler.start(targets, one_minute()));

    let lines = lines_until(&mut rx, |l| l.starts_with("Sleeping")).await;

    assert_eq!(
        lines,
        vec![
            "Bot started.".to_string(),
            "Starting scraping round...".to_string(),
            format!("Scraping {}/widget ...", base_url),
            "Price found: $12.99".to_string(),
            format!("Scraping {}/missing ...", base_url),
            format!("Error scraping {}/missing: HTTP status 404", base_url),
            format!("Scraping {}/gadget ...", base_url),
            "Price found: 19.99".to_string(),
            format!("Data saved to {}", dataset.display()),
            "Sleeping for 1 minutes...".to_string(),
        ]
    );

    scheduler.stop();
    scheduler.join().await;

    let records = load_dataset(&dataset).expect("Failed to load dataset");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, format!("{}/widget", base_url));
    assert_eq!(records[0].price, "$12.99");
    assert_eq!(records[1].url, format!("{}/gadget", base_url));
    assert_eq!(records[1].price, "19.99");
}

#[tokio::test]
async fn test_stop_during_sleep_returns_to_idle_within_one_slice() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", r#"<span class="price">1</span>"#).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let slice = Duration::from_secs(1);
    let (scheduler, mut rx) = scheduler(&dir.path().join("prices.csv"), slice);

    scheduler.start(vec![Target::new(mock_server.uri(), None)], one_minute());
    lines_until(&mut rx, |l| l.starts_with("Sleeping")).await;
    assert_eq!(scheduler.state(), SchedulerState::Running);

    let stop_requested = Instant::now();
    assert!(scheduler.stop());
    scheduler.join().await;

    assert!(
        stop_requested.elapsed() < slice,
        "Stop took {:?}, expected less than one slice",
        stop_requested.elapsed()
    );
    assert_eq!(scheduler.state(), SchedulerState::Idle);

    let tail = lines_until(&mut rx, |l| l == "Bot stopped.").await;
    assert_eq!(tail, vec!["Stopping bot...", "Bot stopped."]);
}

#[tokio::test]
async fn test_double_start_runs_single_cycle() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<b class="price">7</b>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let dataset = dir.path().join("prices.csv");
    let (scheduler, mut rx) = scheduler(&dataset, Duration::from_millis(50));

    let targets = vec![Target::new(format!("{}/item", mock_server.uri()), None)];
    assert!(scheduler.start(targets.clone(), one_minute()));
    assert!(!scheduler.start(targets, one_minute()));

    let lines = lines_until(&mut rx, |l| l.starts_with("Sleeping")).await;
    scheduler.stop();
    scheduler.join().await;

    assert_eq!(lines.iter().filter(|l| *l == "Bot started.").count(), 1);
    assert_eq!(
        lines
            .iter()
            .filter(|l| *l == "Starting scraping round...")
            .count(),
        1
    );
    assert_eq!(load_dataset(&dataset).expect("load").len(), 1);
}

#[tokio::test]
async fn test_history_survives_restart() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/a", r#"<span class="price">A1</span>"#).await;
    mount_page(&mock_server, "/b", r#"<span class="price">B1</span>"#).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let dataset = dir.path().join("prices.csv");
    let targets = vec![
        Target::new(format!("{}/a", mock_server.uri()), None),
        Target::new(format!("{}/b", mock_server.uri()), None),
    ];

    // First "process"
    {
        let (scheduler, mut rx) = scheduler(&dataset, Duration::from_millis(50));
        scheduler.start(targets.clone(), one_minute());
        lines_until(&mut rx, |l| l.starts_with("Sleeping")).await;
        scheduler.stop();
        scheduler.join().await;
    }
    let first_run = load_dataset(&dataset).expect("load");
    assert_eq!(first_run.len(), 2);

    // Second "process" appends after the first run's rows
    {
        let (scheduler, mut rx) = scheduler(&dataset, Duration::from_millis(50));
        scheduler.start(targets, one_minute());
        lines_until(&mut rx, |l| l.starts_with("Sleeping")).await;
        scheduler.stop();
        scheduler.join().await;
    }
    let records = load_dataset(&dataset).expect("load");
    assert_eq!(records.len(), 4);
    assert_eq!(&records[..2], &first_run[..]);
    assert_eq!(records[2].price, "A1");
    assert_eq!(records[3].price, "B1");
}

#[tokio::test]
async fn test_stop_mid_round_persists_partial_result() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<span class="price">42</span>"#)
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/never"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let dataset = dir.path().join("prices.csv");
    let (scheduler, mut rx) = scheduler(&dataset, Duration::from_millis(50));

    let targets = vec![
        Target::new(format!("{}/slow", mock_server.uri()), None),
        Target::new(format!("{}/never", mock_server.uri()), None),
    ];
    scheduler.start(targets, one_minute());

    lines_until(&mut rx, |l| l.ends_with("/slow ...")).await;
    scheduler.stop();
    scheduler.join().await;

    let tail = lines_until(&mut rx, |l| l == "Bot stopped.").await;
    assert!(tail.contains(&"Price found: 42".to_string()));
    assert!(tail.contains(&format!("Data saved to {}", dataset.display())));
    assert!(!tail.iter().any(|l| l.starts_with("Sleeping")));

    let records = load_dataset(&dataset).expect("load");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, "42");
}

#[tokio::test]
async fn test_all_targets_failing_leaves_dataset_untouched() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/plain", "<p>no price here</p>").await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let dataset = dir.path().join("prices.csv");
    std::fs::write(
        &dataset,
        "url,price,timestamp\nhttps://old.example,5,2024-01-01 00:00:00.000000\n",
    )
    .expect("seed dataset");
    let before = std::fs::read(&dataset).expect("read");

    let (scheduler, mut rx) = scheduler(&dataset, Duration::from_millis(50));
    scheduler.start(
        vec![Target::new(format!("{}/plain", mock_server.uri()), None)],
        one_minute(),
    );

    let lines = lines_until(&mut rx, |l| l.starts_with("Sleeping")).await;
    scheduler.stop();
    scheduler.join().await;

    assert!(lines.contains(&format!(
        "Error scraping {}/plain: Price element not found with default selectors",
        mock_server.uri()
    )));
    assert!(lines.contains(&"No data scraped this round.".to_string()));
    assert_eq!(std::fs::read(&dataset).expect("read"), before);
}
