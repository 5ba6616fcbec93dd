// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page fetching with timeouts
//!
//! Retrieves the listing page that items are extracted from. Every call
//! performs a fresh request; nothing is cached between calls.

use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::config::{FetchConfig, MAX_RETRIES};

/// Raw HTML retrieved from the source
#[derive(Debug, Clone)]
pub struct Document {
    pub url: String,
    pub html: String,
    pub status: u16,
    pub fetched_at: DateTime<Utc>,
}

impl Document {
    /// Wrap HTML that did not come from the network (files, fixtures)
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            status: 200,
            fetched_at: Utc::now(),
        }
    }
}

/// Page fetch error types
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// URL could not be parsed or is not http(s)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Request did not finish within the configured timeout
    #[error("Timeout after {timeout_ms}ms fetching: {url}")]
    Timeout { url: String, timeout_ms: u64 },
    /// Network-level failure (DNS, connection refused, TLS, ...)
    #[error("HTTP error fetching {url}: {message}")]
    Http { url: String, message: String },
    /// Server answered with a non-2xx status
    #[error("HTTP {status} for: {url}")]
    Status { status: u16, url: String },
    /// Response body could not be read as text
    #[error("Failed to read body from {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Http { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidUrl(_) | Self::Body { .. } => false,
        }
    }
}

/// Page fetcher bound to one configuration
pub struct PageFetcher {
    client: Client,
    config: FetchConfig,
}

impl PageFetcher {
    /// Create a new page fetcher; `max_retries` is capped at [`MAX_RETRIES`]
    pub fn new(mut config: FetchConfig) -> Result<Self, FetchError> {
        if config.max_retries > MAX_RETRIES {
            warn!(
                "max_retries {} exceeds {}, capping",
                config.max_retries, MAX_RETRIES
            );
            config.max_retries = MAX_RETRIES;
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Http {
                url: config.source_url.clone(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// Fetch the configured source page
    pub async fn fetch_source(&self) -> Result<Document, FetchError> {
        self.fetch(&self.config.source_url).await
    }

    /// Fetch a page, retrying retryable failures up to `max_retries` times
    pub async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let mut attempt = 0u32;
        loop {
            match self.fetch_once(url).await {
                Ok(doc) => return Ok(doc),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let backoff = self.config.backoff(attempt);
                    warn!(
                        "Fetch failed for {} (attempt {}/{}): {}, backing off {:.1}s",
                        url,
                        attempt + 1,
                        self.config.max_retries + 1,
                        e,
                        backoff.as_secs_f64()
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<Document, FetchError> {
        let parsed = Self::validate_url(url)?;

        debug!("Fetching page: {}", url);
        let start = Instant::now();

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error(url)
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        info!(
            "Fetched {} bytes from {} in {}ms",
            html.len(),
            url,
            start.elapsed().as_millis()
        );

        Ok(Document {
            url: url.to_string(),
            html,
            status: status.as_u16(),
            fetched_at: Utc::now(),
        })
    }

    /// Only absolute http/https URLs are fetched
    pub fn validate_url(url: &str) -> Result<Url, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !["http", "https"].contains(&parsed.scheme()) {
            return Err(FetchError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                url,
                parsed.scheme()
            )));
        }
        Ok(parsed)
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            self.timeout_error(url)
        } else {
            FetchError::Http {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }

    fn timeout_error(&self, url: &str) -> FetchError {
        FetchError::Timeout {
            url: url.to_string(),
            timeout_ms: self.config.timeout_ms,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http() {
        assert!(PageFetcher::validate_url("http://books.toscrape.com/").is_ok());
        assert!(PageFetcher::validate_url("https://quotes.toscrape.com/").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_relative_and_other_schemes() {
        assert!(matches!(
            PageFetcher::validate_url("/catalogue/page-2.html"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            PageFetcher::validate_url("ftp://example.com/file"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_status_error_carries_status() {
        let err = FetchError::Status {
            status: 404,
            url: "http://example.com".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "HTTP 404 for: http://example.com");
    }

    #[test]
    fn test_retryable_classification() {
        let server_error = FetchError::Status {
            status: 503,
            url: "u".to_string(),
        };
        let rate_limited = FetchError::Status {
            status: 429,
            url: "u".to_string(),
        };
        let timeout = FetchError::Timeout {
            url: "u".to_string(),
            timeout_ms: 10,
        };
        assert!(server_error.is_retryable());
        assert!(rate_limited.is_retryable());
        assert!(timeout.is_retryable());
        assert!(timeout.status().is_none());
        assert!(!FetchError::InvalidUrl("x".to_string()).is_retryable());
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_network() {
        let fetcher = PageFetcher::new(FetchConfig::default()).unwrap();
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_new_caps_retries() {
        let fetcher = PageFetcher::new(FetchConfig {
            max_retries: u32::MAX,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(fetcher.config().max_retries, MAX_RETRIES);
    }

    #[test]
    fn test_document_from_html() {
        let doc = Document::from_html("file://fixture", "<html></html>");
        assert_eq!(doc.status, 200);
        assert_eq!(doc.html, "<html></html>");
    }
}
