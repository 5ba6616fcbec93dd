// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pipeline results, stages and errors

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::cloud::RenderError;
use crate::nlp::TokenSequence;
use crate::scrape::{FetchError, ListedItem, SchemaError};

/// Where a pipeline call is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Fetching,
    Extracting,
    Normalizing,
    Rendering,
    Done,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Fetching => "fetching",
            PipelineStage::Extracting => "extracting",
            PipelineStage::Normalizing => "normalizing",
            PipelineStage::Rendering => "rendering",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Errors that end a pipeline call
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Render(RenderError),

    /// The page had no item containers
    #[error("No items found on {url}")]
    NoItems { url: String },

    #[error("Item index {index} out of range ({len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Normalized text of an item (or the corpus) has nothing to draw
    #[error("Nothing to render for {subject}: no terms left after filtering")]
    EmptyCorpus { subject: String },

    /// Blocking render task panicked or was cancelled
    #[error("Render task failed: {0}")]
    Task(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Errors reported to callers as "not found" rather than as failures
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PipelineError::NoItems { .. }
                | PipelineError::IndexOutOfRange { .. }
                | PipelineError::EmptyCorpus { .. }
        )
    }

    pub(crate) fn from_render(error: RenderError, subject: impl Into<String>) -> Self {
        match error {
            RenderError::EmptyCorpus => PipelineError::EmptyCorpus {
                subject: subject.into(),
            },
            RenderError::Io(e) => PipelineError::Io(e),
            other => PipelineError::Render(other),
        }
    }
}

impl From<RenderError> for PipelineError {
    fn from(error: RenderError) -> Self {
        Self::from_render(error, "corpus")
    }
}

/// An extracted item plus the normalized form of its primary field
#[derive(Debug, Clone)]
pub struct CrawledItem {
    pub item: ListedItem,
    pub primary_field: String,
    pub lemmas: TokenSequence,
}

impl CrawledItem {
    /// Key of the normalized field, e.g. `lemmatized_title`
    pub fn lemmatized_key(&self) -> String {
        format!("lemmatized_{}", self.primary_field)
    }
}

impl Serialize for CrawledItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.item.fields();
        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        for (name, value) in fields {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(&self.lemmatized_key(), &self.lemmas.to_text())?;
        map.end()
    }
}

/// Rendered word cloud of one item
#[derive(Debug, Clone, Serialize)]
pub struct ItemCloud {
    pub index: usize,
    pub title: String,
    /// Base64 PNG
    pub wordcloud: String,
}
