// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Field selector schemas
//!
//! A schema names the element wrapping one listed item and, for every field,
//! where inside that element the value lives.

use std::fmt;
use std::str::FromStr;

/// Element tag plus optional class name, e.g. `article.product_pod`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub tag: String,
    pub class: Option<String>,
}

impl Locator {
    pub fn new(tag: &str, class: Option<&str>) -> Self {
        Self {
            tag: tag.to_string(),
            class: class.map(str::to_string),
        }
    }

    /// CSS form of the locator
    pub fn css(&self) -> String {
        match &self.class {
            Some(class) => format!("{}.{}", self.tag, class),
            None => self.tag.clone(),
        }
    }
}

/// What to read from the located element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// Concatenated text content
    Text,
    /// Value of the named attribute
    Attribute(String),
}

/// Where one field lives inside an item container
#[derive(Debug, Clone)]
pub struct FieldSelector {
    pub name: String,
    /// Nested path below the container; each step is a descendant of the previous
    pub path: Vec<Locator>,
    pub source: FieldSource,
    /// Value stored when the locator does not match
    pub sentinel: String,
}

impl FieldSelector {
    pub fn new(name: &str, path: Vec<Locator>, source: FieldSource, sentinel: &str) -> Self {
        Self {
            name: name.to_string(),
            path,
            source,
            sentinel: sentinel.to_string(),
        }
    }

    /// CSS selector relative to the container
    pub fn css(&self) -> String {
        self.path
            .iter()
            .map(Locator::css)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Complete description of the items on a listing page
#[derive(Debug, Clone)]
pub struct FieldSelectorSet {
    pub kind: SchemaKind,
    pub container: Locator,
    pub fields: Vec<FieldSelector>,
    /// Field whose text feeds the word cloud
    pub primary_field: String,
    /// Field shown as the item's title in rendered responses
    pub display_field: String,
}

impl FieldSelectorSet {
    /// Book listings on books.toscrape.com
    pub fn books() -> Self {
        Self {
            kind: SchemaKind::Books,
            container: Locator::new("article", Some("product_pod")),
            fields: vec![
                FieldSelector::new(
                    "title",
                    vec![Locator::new("h3", None), Locator::new("a", None)],
                    FieldSource::Attribute("title".to_string()),
                    "Title not found",
                ),
                FieldSelector::new(
                    "price",
                    vec![Locator::new("p", Some("price_color"))],
                    FieldSource::Text,
                    "Price not found",
                ),
            ],
            primary_field: "title".to_string(),
            display_field: "title".to_string(),
        }
    }

    /// Quote listings on quotes.toscrape.com
    pub fn quotes() -> Self {
        Self {
            kind: SchemaKind::Quotes,
            container: Locator::new("div", Some("quote")),
            fields: vec![
                FieldSelector::new(
                    "quote",
                    vec![Locator::new("span", Some("text"))],
                    FieldSource::Text,
                    "Quote not found",
                ),
                FieldSelector::new(
                    "author",
                    vec![Locator::new("small", Some("author"))],
                    FieldSource::Text,
                    "Author not found",
                ),
            ],
            primary_field: "quote".to_string(),
            display_field: "author".to_string(),
        }
    }

    pub fn for_kind(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::Books => Self::books(),
            SchemaKind::Quotes => Self::quotes(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSelector> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Built-in schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Books,
    Quotes,
}

impl SchemaKind {
    /// Source page the schema was written for
    pub fn default_url(&self) -> &'static str {
        match self {
            SchemaKind::Books => "http://books.toscrape.com/",
            SchemaKind::Quotes => "https://quotes.toscrape.com/",
        }
    }
}

impl FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "books" | "book" => Ok(SchemaKind::Books),
            "quotes" | "quote" => Ok(SchemaKind::Quotes),
            other => Err(format!(
                "Unknown schema '{}' (expected 'books' or 'quotes')",
                other
            )),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Books => write!(f, "books"),
            SchemaKind::Quotes => write!(f, "quotes"),
        }
    }
}
