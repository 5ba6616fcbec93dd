// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use toscrape_wordcloud::scrape::{FetchConfig, FetchError, PageFetcher};

use crate::common::{fetch_config, serve_flaky, serve_hanging, serve_html, serve_status, BOOKS_HTML};

#[tokio::test]
async fn test_fetch_returns_document() {
    let url = serve_html(BOOKS_HTML).await;
    let fetcher = PageFetcher::new(fetch_config(&url)).unwrap();
    let doc = fetcher.fetch_source().await.unwrap();
    assert_eq!(doc.status, 200);
    assert_eq!(doc.url, url);
    assert!(doc.html.contains("product_pod"));
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let url = serve_status(StatusCode::NOT_FOUND).await;
    let fetcher = PageFetcher::new(fetch_config(&url)).unwrap();
    let error = fetcher.fetch_source().await.unwrap_err();
    assert_eq!(error.status(), Some(404));
}

#[tokio::test]
async fn test_single_attempt_by_default() {
    let (url, hits) = serve_flaky(1, BOOKS_HTML).await;
    let fetcher = PageFetcher::new(fetch_config(&url)).unwrap();
    let error = fetcher.fetch_source().await.unwrap_err();
    assert!(matches!(error, FetchError::Status { status: 503, .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_opt_in_retry_recovers() {
    let (url, hits) = serve_flaky(2, BOOKS_HTML).await;
    let fetcher = PageFetcher::new(FetchConfig {
        max_retries: 2,
        retry_backoff_ms: 10,
        ..fetch_config(&url)
    })
    .unwrap();
    let doc = fetcher.fetch_source().await.unwrap();
    assert!(doc.html.contains("Tipping the Velvet"));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let url = serve_status(StatusCode::NOT_FOUND).await;
    let fetcher = PageFetcher::new(FetchConfig {
        max_retries: 3,
        retry_backoff_ms: 10,
        ..fetch_config(&url)
    })
    .unwrap();
    let started = Instant::now();
    assert!(fetcher.fetch_source().await.is_err());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_zero_timeout_fails_immediately() {
    let url = serve_html(BOOKS_HTML).await;
    let fetcher = PageFetcher::new(FetchConfig {
        timeout_ms: 0,
        ..fetch_config(&url)
    })
    .unwrap();

    let started = Instant::now();
    let error = fetcher.fetch_source().await.unwrap_err();
    assert!(matches!(error, FetchError::Timeout { timeout_ms: 0, .. }));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_timeout_fires_within_bound() {
    let url = serve_hanging().await;
    let fetcher = PageFetcher::new(FetchConfig {
        timeout_ms: 200,
        ..fetch_config(&url)
    })
    .unwrap();

    let started = Instant::now();
    let error = fetcher.fetch_source().await.unwrap_err();
    assert!(matches!(error, FetchError::Timeout { timeout_ms: 200, .. }));
    assert!(started.elapsed() < Duration::from_secs(3));
}
