// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures: in-process listing sites and pipeline builders
#![allow(dead_code)]

use axum::{http::StatusCode, response::Html, routing::get, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use toscrape_wordcloud::{
    cloud::{CloudConfig, WordCloud},
    nlp::Normalizer,
    pipeline::Pipeline,
    scrape::{FetchConfig, FieldSelectorSet, PageFetcher, SchemaKind},
};

pub const BOOKS_HTML: &str = r#"<!DOCTYPE html>
<html><head><title>All products | Books to Scrape</title></head><body>
<section><ol class="row">
  <li><article class="product_pod">
    <h3><a href="catalogue/a-light-in-the-attic_1000/index.html" title="A Light in the Attic">A Light in the ...</a></h3>
    <div class="product_price"><p class="price_color">£51.77</p></div>
  </article></li>
  <li><article class="product_pod">
    <h3><a href="catalogue/tipping-the-velvet_999/index.html" title="Tipping the Velvet">Tipping the Velvet</a></h3>
    <div class="product_price"><p class="price_color">£53.74</p></div>
  </article></li>
  <li><article class="product_pod">
    <h3><a href="catalogue/soumission_998/index.html" title="Soumission">Soumission</a></h3>
  </article></li>
</ol></section>
</body></html>"#;

pub const QUOTES_HTML: &str = r#"<!DOCTYPE html>
<html><body><div class="col-md-8">
  <div class="quote">
    <span class="text">The only way to do great work is to love what you do.</span>
    <span>by <small class="author">Steve Jobs</small></span>
  </div>
  <div class="quote">
    <span class="text">Great work and great love make a great life.</span>
    <span>by <small class="author">Anonymous</small></span>
  </div>
</div></body></html>"#;

pub const EMPTY_HTML: &str = "<html><body><p>No products today.</p></body></html>";

/// Serve `router` on an ephemeral localhost port and return its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}/", addr)
}

pub async fn serve_html(html: &'static str) -> String {
    serve(Router::new().route("/", get(move || async move { Html(html) }))).await
}

pub async fn serve_status(status: StatusCode) -> String {
    serve(Router::new().route("/", get(move || async move { (status, "unavailable") }))).await
}

/// Answers 503 for the first `failures` requests, then `html`; returns the
/// URL and the request counter
pub async fn serve_flaky(failures: usize, html: &'static str) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let router = Router::new().route(
        "/",
        get(move || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < failures {
                    Err((StatusCode::SERVICE_UNAVAILABLE, "try again"))
                } else {
                    Ok(Html(html))
                }
            }
        }),
    );
    (serve(router).await, hits)
}

/// Accepts connections and never answers
pub async fn serve_hanging() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}/", addr)
}

pub fn fetch_config(url: &str) -> FetchConfig {
    FetchConfig {
        source_url: url.to_string(),
        timeout_ms: 5_000,
        ..Default::default()
    }
}

pub fn pipeline_with(fetch: FetchConfig, kind: SchemaKind, cloud: CloudConfig) -> Pipeline {
    Pipeline::new(
        PageFetcher::new(fetch).unwrap(),
        FieldSelectorSet::for_kind(kind),
        Normalizer::default(),
        WordCloud::new(cloud).unwrap(),
    )
}

pub fn pipeline(url: &str, kind: SchemaKind) -> Pipeline {
    pipeline_with(fetch_config(url), kind, CloudConfig::default())
}

/// Drive one GET request through `app` and decode the JSON body
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn app_for(pipeline: Pipeline) -> Router {
    toscrape_wordcloud::api::create_app(Arc::new(toscrape_wordcloud::api::AppState::new(pipeline)))
}
