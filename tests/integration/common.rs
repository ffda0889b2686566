use price_ripple::config::DEFAULT_USER_AGENT;
use price_ripple::scrape::{build_http_client, Fetcher, Scheduler};
use price_ripple::{ChannelSink, CsvStore};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a scheduler writing to `dataset` and the receiver of its status lines
pub fn scheduler(dataset: &Path, slice: Duration) -> (Scheduler, UnboundedReceiver<String>) {
    let client = build_http_client(DEFAULT_USER_AGENT, Duration::from_secs(5))
        .expect("Failed to build client");
    let (sink, rx) = ChannelSink::new();
    let scheduler = Scheduler::new(
        Fetcher::new(client),
        Arc::new(CsvStore::new(dataset)),
        Arc::new(sink),
        slice,
    );
    (scheduler, rx)
}

/// Serves `body` with status 200 at `route`
pub async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Collects status lines up to and including the first one matching `until`
pub async fn lines_until(
    rx: &mut UnboundedReceiver<String>,
    until: impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    loop {
        let line = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("Timed out waiting for status line")
            .expect("Status channel closed");
        let done = until(&line);
        lines.push(line);
        if done {
            return lines;
        }
    }
}
