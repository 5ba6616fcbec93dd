// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::{Duration, Instant};
use toscrape_wordcloud::{cloud::CloudConfig, scrape::SchemaKind};

use crate::common::{
    app_for, fetch_config, get_json, pipeline, pipeline_with, serve_hanging, serve_html,
    BOOKS_HTML, EMPTY_HTML, QUOTES_HTML,
};

fn decode_png(encoded: &serde_json::Value) -> image::DynamicImage {
    let bytes = STANDARD.decode(encoded.as_str().unwrap()).unwrap();
    image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap()
}

#[tokio::test]
async fn test_wordcloud_for_one_book() {
    let url = serve_html(BOOKS_HTML).await;
    let (status, json) = get_json(app_for(pipeline(&url, SchemaKind::Books)), "/wordcloud/0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "A Light in the Attic");
    let image = decode_png(&json["wordcloud"]);
    assert_eq!((image.width(), image.height()), (800, 400));
}

#[tokio::test]
async fn test_wordcloud_for_quote_uses_author_as_title() {
    let url = serve_html(QUOTES_HTML).await;
    let (status, json) =
        get_json(app_for(pipeline(&url, SchemaKind::Quotes)), "/wordcloud/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Anonymous");
}

#[tokio::test]
async fn test_index_equal_to_item_count_is_404() {
    let url = serve_html(BOOKS_HTML).await;
    let (status, json) = get_json(app_for(pipeline(&url, SchemaKind::Books)), "/wordcloud/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_type"], "not_found");
    assert_eq!(json["details"]["item_count"], 3);
}

#[tokio::test]
async fn test_negative_index_is_404_and_garbage_is_400() {
    let url = serve_html(BOOKS_HTML).await;
    let (status, _) = get_json(app_for(pipeline(&url, SchemaKind::Books)), "/wordcloud/-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) =
        get_json(app_for(pipeline(&url, SchemaKind::Books)), "/wordcloud/first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_wordcloud_all_in_item_order() {
    let url = serve_html(BOOKS_HTML).await;
    let cloud = CloudConfig {
        width: 200,
        height: 100,
        max_font_size: 40,
        ..Default::default()
    };
    let app = app_for(pipeline_with(fetch_config(&url), SchemaKind::Books, cloud));
    let (status, json) = get_json(app, "/wordcloud/all").await;

    assert_eq!(status, StatusCode::OK);
    let clouds = json.as_array().unwrap();
    assert_eq!(clouds.len(), 3);
    for (i, cloud) in clouds.iter().enumerate() {
        assert_eq!(cloud["index"], i);
        assert_eq!(decode_png(&cloud["wordcloud"]).width(), 200);
    }
    assert_eq!(clouds[2]["title"], "Soumission");
}

#[tokio::test]
async fn test_empty_page_is_404_for_render_routes() {
    let url = serve_html(EMPTY_HTML).await;
    for uri in ["/wordcloud/0", "/wordcloud/all"] {
        let (status, json) = get_json(app_for(pipeline(&url, SchemaKind::Books)), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(json["error_type"], "not_found");
    }
}

#[tokio::test]
async fn test_fetch_timeout_is_503_within_bound() {
    let url = serve_hanging().await;
    let mut fetch = fetch_config(&url);
    fetch.timeout_ms = 300;
    let app = app_for(pipeline_with(fetch, SchemaKind::Books, CloudConfig::default()));

    let started = Instant::now();
    let (status, json) = tokio::time::timeout(Duration::from_secs(10), get_json(app, "/wordcloud/0"))
        .await
        .expect("request hung past the fetch timeout");

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["message"].as_str().unwrap().contains("Timeout"));
    assert!(started.elapsed() < Duration::from_secs(5));
}
