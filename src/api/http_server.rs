// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::ApiConfig;
use super::handlers::{crawl_handler, health_handler, wordcloud_all_handler, wordcloud_handler};
use crate::pipeline::Pipeline;

/// Shared by all handlers; holds no per-request state
pub struct AppState {
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/crawl", get(crawl_handler))
        // static segment wins over the parameter, so "all" is never an index
        .route("/wordcloud/all", get(wordcloud_all_handler))
        .route("/wordcloud/:index", get(wordcloud_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(config: &ApiConfig, state: AppState) -> anyhow::Result<()> {
    let addr = config.socket_addr().map_err(anyhow::Error::msg)?;
    let app = create_app(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
