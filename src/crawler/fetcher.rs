//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for landing and listing pages
//! - Retry logic for transient failures
//! - Error classification

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Failed to read body from {url}: {message}")]
    Body { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    /// Returns true if the failure may succeed on another attempt
    ///
    /// Timeouts, connection failures and 5xx responses are transient.
    /// Client errors (4xx) and body decoding failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connect { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Body { .. } | Self::Request { .. } => false,
        }
    }
}

/// Retry behavior for a single page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub max_retries: u32,

    /// Fixed pause between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }
}

impl From<&HttpConfig> for RetryPolicy {
    fn from(config: &HttpConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration (user agent and timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body, retrying transient failures
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx | Return body |
/// | 5xx | Retry up to `max_retries` times |
/// | Timeout | Retry up to `max_retries` times |
/// | Connection failure | Retry up to `max_retries` times |
/// | 4xx / other | Fail immediately |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `retry` - How often and how long to wait between attempts
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    retry: &RetryPolicy,
) -> Result<String, FetchError> {
    let mut attempt = 0;

    loop {
        match fetch_once(client, url).await {
            Ok(body) => return Ok(body),
            Err(e) if e.is_transient() && attempt < retry.max_retries => {
                attempt += 1;
                tracing::warn!(
                    "Fetch failed ({}), retry {}/{} in {:?}",
                    e,
                    attempt,
                    retry.max_retries,
                    retry.delay
                );
                if !retry.delay.is_zero() {
                    tokio::time::sleep(retry.delay).await;
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// Performs a single GET request and checks the status code
async fn fetch_once(client: &Client, url: &Url) -> Result<String, FetchError> {
    tracing::trace!("GET {}", url);

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Body {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Maps a reqwest send error onto a FetchError
fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
