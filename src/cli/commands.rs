// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use tracing::info;

use super::args::{CloudArgs, CorpusArgs, ImageArgs, SourceArgs};
use crate::cloud::{CloudInput, WordCloud};
use crate::nlp::Normalizer;
use crate::pipeline::Pipeline;
use crate::scrape::{FieldSelectorSet, PageFetcher};

fn build_pipeline(source: &SourceArgs, cloud: &CloudArgs) -> Result<Pipeline> {
    let fetcher = PageFetcher::new(source.fetch_config()?)?;
    let renderer = WordCloud::new(cloud.cloud_config())?;
    Ok(Pipeline::new(
        fetcher,
        FieldSelectorSet::for_kind(source.schema),
        Normalizer::default(),
        renderer,
    ))
}

/// Print crawled items as pretty JSON on stdout
pub async fn items(source: &SourceArgs) -> Result<()> {
    let pipeline = build_pipeline(source, &CloudArgs::default())?;
    let items = pipeline.crawl().await?;
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

pub async fn scrape(source: &SourceArgs, corpus: &CorpusArgs) -> Result<()> {
    let pipeline = build_pipeline(source, &CloudArgs::default())?;
    let text = pipeline.write_corpus(&corpus.corpus).await?;
    println!(
        "✅ Wrote {} characters to {}",
        text.chars().count(),
        corpus.corpus.display()
    );
    Ok(())
}

pub async fn render(corpus: &CorpusArgs, image: &ImageArgs, cloud: &CloudArgs) -> Result<()> {
    let text = tokio::fs::read_to_string(&corpus.corpus)
        .await
        .with_context(|| format!("Failed to read corpus {}", corpus.corpus.display()))?;
    let renderer = WordCloud::new(cloud.cloud_config())?;
    let output = image.output.clone();

    let placed = tokio::task::spawn_blocking(move || -> Result<usize> {
        let rendered = renderer.render(CloudInput::Text(&text))?;
        rendered.save(&output)?;
        Ok(rendered.words.len())
    })
    .await??;

    info!("Rendered {} terms from {}", placed, corpus.corpus.display());
    println!("✅ Word cloud saved to {}", image.output.display());
    Ok(())
}

pub async fn run(
    source: &SourceArgs,
    corpus: &CorpusArgs,
    image: &ImageArgs,
    cloud: &CloudArgs,
) -> Result<()> {
    let pipeline = build_pipeline(source, cloud)?;
    let text = pipeline.write_corpus(&corpus.corpus).await?;
    println!("✅ Corpus saved to {}", corpus.corpus.display());

    let rendered = pipeline.render_text(text).await?;
    let placed = rendered.words.len();
    let output = image.output.clone();
    tokio::task::spawn_blocking(move || rendered.save(&output)).await??;
    println!(
        "✅ Word cloud of {} terms saved to {}",
        placed,
        image.output.display()
    );
    Ok(())
}
