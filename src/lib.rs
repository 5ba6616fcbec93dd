// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod cloud;
pub mod nlp;
pub mod pipeline;
pub mod scrape;
pub mod utils;
pub mod version;

pub use cloud::{CloudConfig, CloudInput, RenderError, RenderedImage, WordCloud};
pub use nlp::{LinguisticResources, Normalizer, TokenSequence};
pub use pipeline::{CrawledItem, ItemCloud, Pipeline, PipelineError, PipelineStage};
pub use scrape::{
    extract, Document, FetchConfig, FetchError, FieldSelectorSet, ListedItem, PageFetcher,
    SchemaKind,
};
