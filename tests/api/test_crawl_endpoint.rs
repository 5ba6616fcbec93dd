// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use serde_json::json;
use toscrape_wordcloud::scrape::SchemaKind;

use crate::common::{
    app_for, get_json, pipeline, serve_html, serve_status, BOOKS_HTML, EMPTY_HTML, QUOTES_HTML,
};

#[tokio::test]
async fn test_crawl_books_with_lemmatized_titles() {
    let url = serve_html(BOOKS_HTML).await;
    let (status, json) = get_json(app_for(pipeline(&url, SchemaKind::Books)), "/crawl").await;

    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(
        items[0],
        json!({
            "title": "A Light in the Attic",
            "price": "£51.77",
            "lemmatized_title": "light attic"
        })
    );
    assert_eq!(items[1]["title"], "Tipping the Velvet");
    assert_eq!(items[2]["price"], "Price not found");
}

#[tokio::test]
async fn test_crawl_quotes() {
    let url = serve_html(QUOTES_HTML).await;
    let (status, json) = get_json(app_for(pipeline(&url, SchemaKind::Quotes)), "/crawl").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json[0],
        json!({
            "quote": "The only way to do great work is to love what you do.",
            "author": "Steve Jobs",
            "lemmatized_quote": "way great work love"
        })
    );
}

#[tokio::test]
async fn test_crawl_empty_page_returns_empty_array() {
    let url = serve_html(EMPTY_HTML).await;
    let (status, json) = get_json(app_for(pipeline(&url, SchemaKind::Books)), "/crawl").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_crawl_upstream_error_is_503() {
    let url = serve_status(StatusCode::INTERNAL_SERVER_ERROR).await;
    let (status, json) = get_json(app_for(pipeline(&url, SchemaKind::Books)), "/crawl").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error_type"], "service_unavailable");
    assert!(json["message"].as_str().unwrap().contains("HTTP 500"));
}

#[tokio::test]
async fn test_crawl_connection_refused_is_503() {
    let app = app_for(pipeline("http://127.0.0.1:9/", SchemaKind::Books));
    let (status, _) = get_json(app, "/crawl").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
