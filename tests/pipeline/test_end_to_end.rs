// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use toscrape_wordcloud::{
    cloud::CloudConfig,
    pipeline::PipelineError,
    scrape::SchemaKind,
};

use crate::common::{fetch_config, pipeline, pipeline_with, serve_html, BOOKS_HTML, EMPTY_HTML, QUOTES_HTML};

#[tokio::test]
async fn test_corpus_joins_primary_fields_with_spaces() {
    let url = serve_html(QUOTES_HTML).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotes.txt");

    let corpus = pipeline(&url, SchemaKind::Quotes)
        .write_corpus(&path)
        .await
        .unwrap();

    let expected = "The only way to do great work is to love what you do. \
                    Great work and great love make a great life.";
    assert_eq!(corpus, expected);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
}

#[tokio::test]
async fn test_empty_page_writes_no_corpus() {
    let url = serve_html(EMPTY_HTML).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.txt");

    let result = pipeline(&url, SchemaKind::Quotes).write_corpus(&path).await;
    assert!(matches!(result, Err(PipelineError::NoItems { .. })));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_scrape_then_render_corpus() {
    let url = serve_html(QUOTES_HTML).await;
    let pipeline = pipeline_with(fetch_config(&url), SchemaKind::Quotes, CloudConfig::standalone());

    let corpus = pipeline.corpus().await.unwrap();
    let rendered = pipeline.render_text(corpus).await.unwrap();

    // "great" occurs four times, more than any other word
    assert_eq!(rendered.words[0].term, "great");
    assert_eq!(rendered.words[0].count, 4);
    assert!(rendered.words.iter().all(|w| w.term != "the" && w.term != "to"));
}

#[tokio::test]
async fn test_every_call_fetches_again() {
    let (url, hits) = crate::common::serve_flaky(0, BOOKS_HTML).await;
    let pipeline = pipeline(&url, SchemaKind::Books);

    pipeline.crawl().await.unwrap();
    pipeline.crawl().await.unwrap();
    pipeline.render_item(1).await.unwrap();
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_render_item_out_of_range() {
    let url = serve_html(BOOKS_HTML).await;
    let result = pipeline(&url, SchemaKind::Books).render_item(3).await;
    match result {
        Err(PipelineError::IndexOutOfRange { index, len }) => {
            assert_eq!((index, len), (3, 3));
        }
        other => panic!("expected IndexOutOfRange, got {:?}", other.map(|c| c.index)),
    }
}
