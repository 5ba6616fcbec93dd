// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Route handlers
//!
//! Every handler runs the pipeline from scratch; concurrent requests each
//! fetch the source page on their own.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::errors::ApiError;
use super::http_server::AppState;
use crate::pipeline::{CrawledItem, ItemCloud};
use crate::version;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub build: String,
    pub features: Vec<String>,
    pub schema: String,
    pub source_url: String,
}

/// Body of `GET /wordcloud/{index}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudResponse {
    pub title: String,
    /// Base64 PNG
    pub wordcloud: String,
}

impl From<ItemCloud> for WordCloudResponse {
    fn from(cloud: ItemCloud) -> Self {
        Self {
            title: cloud.title,
            wordcloud: cloud.wordcloud,
        }
    }
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let pipeline = &state.pipeline;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        build: version::VERSION.to_string(),
        features: version::FEATURES.iter().map(|f| f.to_string()).collect(),
        schema: pipeline.schema().kind.to_string(),
        source_url: pipeline.fetcher().config().source_url.clone(),
    })
}

/// GET /crawl - Extracted items with their lemmatized primary field
///
/// # Errors
/// - 503 Service Unavailable: source page could not be fetched
pub async fn crawl_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CrawledItem>>, ApiError> {
    let items = state.pipeline.crawl().await?;
    if items.is_empty() {
        info!("Crawl found no items");
    } else {
        info!("Crawl extracted {} items", items.len());
    }
    Ok(Json(items))
}

/// GET /wordcloud/{index} - Word cloud of one item
///
/// # Errors
/// - 400 Bad Request: index is not an integer
/// - 404 Not Found: no items, index out of range, or nothing to render
/// - 503 Service Unavailable: source page could not be fetched
pub async fn wordcloud_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_index): Path<String>,
) -> Result<Json<WordCloudResponse>, ApiError> {
    let index = parse_index(&raw_index)?;
    debug!("Word cloud requested for item {}", index);
    let cloud = state.pipeline.render_item(index).await?;
    Ok(Json(cloud.into()))
}

/// GET /wordcloud/all - Word clouds of every item
///
/// # Errors
/// - 404 Not Found: no items, or an item has nothing to render
/// - 503 Service Unavailable: source page could not be fetched
pub async fn wordcloud_all_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemCloud>>, ApiError> {
    let clouds = state.pipeline.render_all().await?;
    info!("Rendered {} word clouds", clouds.len());
    Ok(Json(clouds))
}

/// Integers that cannot index an item (negative or too large) are "not
/// found"; anything else that is not an integer is a bad request
fn parse_index(raw: &str) -> Result<usize, ApiError> {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::InvalidRequest(format!(
            "item index must be an integer, got '{}'",
            raw
        )));
    }
    if raw.starts_with('-') && digits.chars().any(|c| c != '0') {
        return Err(ApiError::IndexOutOfRange {
            index: raw.to_string(),
            len: None,
        });
    }
    digits.parse::<usize>().map_err(|_| ApiError::IndexOutOfRange {
        index: raw.to_string(),
        len: None,
    })
}
