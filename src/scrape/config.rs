// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for page fetching
//!
//! Defines the source URL, timeout and the (opt-in) retry policy.

use std::env;
use std::time::Duration;

use super::schema::SchemaKind;

/// Upper bound on extra fetch attempts
pub const MAX_RETRIES: u32 = 5;

/// Listing page scraped by default
pub const DEFAULT_SOURCE_URL: &str = "http://books.toscrape.com/";

/// Configuration for page fetching
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Page to scrape (default: books.toscrape.com)
    pub source_url: String,
    /// Timeout for a single request in milliseconds (default: 10000)
    pub timeout_ms: u64,
    /// Extra attempts after a failed one (default: 0, a single attempt)
    pub max_retries: u32,
    /// Backoff before the first retry, doubled per attempt (default: 500)
    pub retry_backoff_ms: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl FetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            source_url: env::var("SOURCE_URL").unwrap_or(defaults.source_url),
            timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
            max_retries: env::var("FETCH_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries)
                .min(MAX_RETRIES),
            retry_backoff_ms: env::var("FETCH_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retry_backoff_ms),
            user_agent: env::var("FETCH_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Like `from_env`, but an unset `SOURCE_URL` falls back to the page
    /// `kind` was written for
    pub fn from_env_for(kind: SchemaKind) -> Self {
        let mut config = Self::from_env();
        if env::var("SOURCE_URL").is_err() {
            config.source_url = kind.default_url().to_string();
        }
        config
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.source_url.trim().is_empty() {
            return Err("source_url cannot be empty".to_string());
        }
        if self.retry_backoff_ms > 60_000 {
            return Err("retry_backoff_ms cannot exceed 60000".to_string());
        }
        Ok(())
    }

    /// Backoff before retry number `attempt` (0-based), doubling each time
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            timeout_ms: 10_000,
            max_retries: 0,
            retry_backoff_ms: 500,
            user_agent: format!(
                "Mozilla/5.0 (compatible; toscrape-wordcloud/{})",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}
