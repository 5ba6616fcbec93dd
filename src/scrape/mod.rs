// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Listing page scraping
//!
//! ## Architecture
//!
//! ```text
//! source URL → PageFetcher → Document (HTML) → extract(schema) → ListedItem*
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let fetcher = PageFetcher::new(FetchConfig::from_env())?;
//! let doc = fetcher.fetch_source().await?;
//! let items = extract_items(&doc, &FieldSelectorSet::books())?;
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod schema;

pub use config::{FetchConfig, DEFAULT_SOURCE_URL, MAX_RETRIES};
pub use extractor::{
    extract, extract_items, ExtractionWarning, ItemExtraction, ListedItem, SchemaError,
    WarningReason,
};
pub use fetcher::{Document, FetchError, PageFetcher};
pub use schema::{FieldSelector, FieldSelectorSet, FieldSource, Locator, SchemaKind};
