// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use toscrape_wordcloud::{scrape::SchemaKind, version};

use crate::common::{app_for, get_json, pipeline};

#[tokio::test]
async fn test_health_reports_version_and_schema() {
    // health never touches the source page
    let app = app_for(pipeline("http://127.0.0.1:9/", SchemaKind::Quotes));
    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], version::VERSION_NUMBER);
    assert_eq!(json["schema"], "quotes");
    assert_eq!(json["source_url"], "http://127.0.0.1:9/");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = app_for(pipeline("http://127.0.0.1:9/", SchemaKind::Books));
    let (status, _) = get_json(app, "/wordclouds").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
