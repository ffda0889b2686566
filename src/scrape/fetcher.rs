//! HTTP fetcher implementation
//!
//! This module issues the single GET request made for each target, including:
//! - Building the HTTP client with a browser-like user agent and a fixed timeout
//! - Classifying failures as HTTP status or transport errors
//! - Parsing successful responses into a `Document`

use crate::config::ScraperConfig;
use crate::scrape::Document;
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;

/// Fetches target pages
///
/// One attempt per call: no retries, no caching. Cloning is cheap and shares
/// the connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Wraps an existing HTTP client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the scraper configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the user agent and request timeout
    ///
    /// # Returns
    ///
    /// * `Ok(Fetcher)` - Successfully built fetcher
    /// * `Err(reqwest::Error)` - Failed to build the HTTP client
    pub fn from_config(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::new(client))
    }

    /// Fetches a URL and parses the response body
    ///
    /// # Arguments
    ///
    /// * `url` - The page to fetch
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The parsed page
    /// * `Err(FetchError::HttpStatus)` - The server answered with a non-2xx status
    /// * `Err(FetchError::Transport)` - DNS, connection, timeout or body read failure
    pub async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_error)?;
        tracing::trace!(%url, bytes = body.len(), "Fetched page");

        Ok(Document::parse(&body))
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header
/// * `timeout` - Total time allowed for one request
///
/// # Example
///
/// ```
/// use price_ripple::config::DEFAULT_USER_AGENT;
/// use price_ripple::scrape::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(DEFAULT_USER_AGENT, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Maps a reqwest error to a transport failure with a short description
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Transport("request timed out".to_string())
    } else if e.is_connect() {
        FetchError::Transport(format!("connection failed: {}", e))
    } else {
        FetchError::Transport(e.to_string())
    }
}
