// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use toscrape_wordcloud::scrape::{extract, extract_items, Document, FieldSelectorSet, WarningReason};

use crate::common::{BOOKS_HTML, EMPTY_HTML, QUOTES_HTML};

fn doc(html: &str) -> Document {
    Document::from_html("http://fixture.test/", html)
}

#[test]
fn test_single_quote_scenario() {
    let html = r#"<div class="quote">
        <span class="text">The only way to do great work is to love what you do.</span>
        <small class="author">Steve Jobs</small>
    </div>"#;
    let items = extract_items(&doc(html), &FieldSelectorSet::quotes()).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].get("quote"),
        Some("The only way to do great work is to love what you do.")
    );
    assert_eq!(items[0].get("author"), Some("Steve Jobs"));
}

#[test]
fn test_every_schema_field_has_a_value() {
    for (html, schema) in [
        (BOOKS_HTML, FieldSelectorSet::books()),
        (QUOTES_HTML, FieldSelectorSet::quotes()),
    ] {
        for item in extract_items(&doc(html), &schema).unwrap() {
            for field in &schema.fields {
                let value = item.get(&field.name).unwrap();
                assert!(!value.is_empty());
            }
        }
    }
}

#[test]
fn test_missing_price_is_recovered_with_warning() {
    let extractions = extract(&doc(BOOKS_HTML), &FieldSelectorSet::books()).unwrap();
    assert_eq!(extractions.len(), 3);
    assert!(extractions[0].is_complete());
    assert!(extractions[1].is_complete());

    let broken = &extractions[2];
    assert_eq!(broken.item.get("title"), Some("Soumission"));
    assert_eq!(broken.item.get("price"), Some("Price not found"));
    assert_eq!(broken.warnings.len(), 1);
    assert_eq!(broken.warnings[0].item_index, 2);
    assert_eq!(broken.warnings[0].reason, WarningReason::NoMatch);
}

#[test]
fn test_wrong_schema_finds_nothing() {
    assert!(extract(&doc(BOOKS_HTML), &FieldSelectorSet::quotes())
        .unwrap()
        .is_empty());
    assert!(extract(&doc(EMPTY_HTML), &FieldSelectorSet::books())
        .unwrap()
        .is_empty());
}
