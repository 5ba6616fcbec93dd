// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Listed item extraction
//!
//! Pulls one record per item container out of a fetched page using the
//! selectors declared by a [`FieldSelectorSet`]. A field that cannot be read
//! gets its sentinel value and a warning; it never aborts the item or the page.

use scraper::{ElementRef, Html, Selector};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::fetcher::Document;
use super::schema::{FieldSelectorSet, FieldSource};

/// One extracted record, fields kept in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedItem {
    fields: Vec<(String, String)>,
}

impl ListedItem {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl Serialize for ListedItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Why a field fell back to its sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningReason {
    NoMatch,
    MissingAttribute(String),
    EmptyValue,
}

/// A field of one item that could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionWarning {
    pub item_index: usize,
    pub field: String,
    pub reason: WarningReason,
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match &self.reason {
            WarningReason::NoMatch => "locator matched nothing".to_string(),
            WarningReason::MissingAttribute(attr) => format!("attribute '{}' missing", attr),
            WarningReason::EmptyValue => "value is empty".to_string(),
        };
        write!(f, "item {} field '{}': {}", self.item_index, self.field, reason)
    }
}

/// Result of extracting one item container
#[derive(Debug, Clone)]
pub struct ItemExtraction {
    pub item: ListedItem,
    pub warnings: Vec<ExtractionWarning>,
}

impl ItemExtraction {
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Schema selectors that do not compile
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

struct CompiledField<'a> {
    name: &'a str,
    selector: Selector,
    source: &'a FieldSource,
    sentinel: &'a str,
}

fn compile(css: &str) -> Result<Selector, SchemaError> {
    Selector::parse(css).map_err(|e| SchemaError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Extract every item container in document order
pub fn extract(
    doc: &Document,
    schema: &FieldSelectorSet,
) -> Result<Vec<ItemExtraction>, SchemaError> {
    let container = compile(&schema.container.css())?;
    let fields = schema
        .fields
        .iter()
        .map(|f| {
            Ok(CompiledField {
                name: &f.name,
                selector: compile(&f.css())?,
                source: &f.source,
                sentinel: &f.sentinel,
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    let document = Html::parse_document(&doc.html);
    let extractions: Vec<ItemExtraction> = document
        .select(&container)
        .enumerate()
        .map(|(index, element)| extract_item(index, &element, &fields))
        .collect();

    if extractions.is_empty() {
        info!(
            "No '{}' containers found on {}",
            schema.container.css(),
            doc.url
        );
    } else {
        let incomplete = extractions.iter().filter(|e| !e.is_complete()).count();
        info!(
            "Extracted {} {} items from {} ({} incomplete)",
            extractions.len(),
            schema.kind,
            doc.url,
            incomplete
        );
    }

    Ok(extractions)
}

/// Extract items, logging and discarding the per-field warnings
pub fn extract_items(
    doc: &Document,
    schema: &FieldSelectorSet,
) -> Result<Vec<ListedItem>, SchemaError> {
    Ok(extract(doc, schema)?
        .into_iter()
        .map(|extraction| {
            for warning in &extraction.warnings {
                warn!("Extraction warning: {}", warning);
            }
            extraction.item
        })
        .collect())
}

fn extract_item(index: usize, element: &ElementRef, fields: &[CompiledField]) -> ItemExtraction {
    let mut values = Vec::with_capacity(fields.len());
    let mut warnings = Vec::new();

    for field in fields {
        let value = match read_field(element, field) {
            Ok(value) => value,
            Err(reason) => {
                debug!("Field '{}' of item {} falls back to sentinel", field.name, index);
                warnings.push(ExtractionWarning {
                    item_index: index,
                    field: field.name.to_string(),
                    reason,
                });
                field.sentinel.to_string()
            }
        };
        values.push((field.name.to_string(), value));
    }

    ItemExtraction {
        item: ListedItem::new(values),
        warnings,
    }
}

fn read_field(element: &ElementRef, field: &CompiledField) -> Result<String, WarningReason> {
    let target = element
        .select(&field.selector)
        .next()
        .ok_or(WarningReason::NoMatch)?;

    let raw = match field.source {
        FieldSource::Text => target.text().collect::<String>(),
        FieldSource::Attribute(attr) => target
            .value()
            .attr(attr)
            .ok_or_else(|| WarningReason::MissingAttribute(attr.clone()))?
            .to_string(),
    };

    let cleaned = clean_text(&raw);
    if cleaned.is_empty() {
        return Err(WarningReason::EmptyValue);
    }
    Ok(cleaned)
}

/// Collapse runs of whitespace and trim
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
