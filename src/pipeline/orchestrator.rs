// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fetch → extract → normalize → render, rebuilt from scratch on every call

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::types::{CrawledItem, ItemCloud, PipelineError, PipelineStage};
use crate::cloud::{CloudInput, RenderedImage, WordCloud};
use crate::nlp::Normalizer;
use crate::scrape::{extract_items, FieldSelectorSet, ListedItem, PageFetcher};
use crate::utils::write_atomically;

/// Stage bookkeeping for one call
struct StageLog {
    operation: &'static str,
    stage: PipelineStage,
    started: Instant,
}

impl StageLog {
    fn start(operation: &'static str) -> Self {
        debug!("{}: {}", operation, PipelineStage::Idle);
        Self {
            operation,
            stage: PipelineStage::Idle,
            started: Instant::now(),
        }
    }

    fn enter(&mut self, stage: PipelineStage) {
        debug!("{}: {} -> {}", self.operation, self.stage, stage);
        self.stage = stage;
    }

    fn finish<T>(mut self, result: Result<T, PipelineError>) -> Result<T, PipelineError> {
        let elapsed = self.started.elapsed().as_millis();
        match &result {
            Ok(_) => {
                self.enter(PipelineStage::Done);
                info!("{} finished in {}ms", self.operation, elapsed);
            }
            Err(e) => {
                warn!(
                    "{} failed while {} after {}ms: {}",
                    self.operation, self.stage, elapsed, e
                );
                self.enter(PipelineStage::Failed);
            }
        }
        result
    }
}

/// One item's normalized primary text, ready to render
struct RenderJob {
    index: usize,
    title: String,
    tokens: Vec<String>,
}

/// The scrape-to-image pipeline for one schema
pub struct Pipeline {
    fetcher: PageFetcher,
    schema: FieldSelectorSet,
    normalizer: Normalizer,
    cloud: Arc<WordCloud>,
}

impl Pipeline {
    pub fn new(
        fetcher: PageFetcher,
        schema: FieldSelectorSet,
        normalizer: Normalizer,
        cloud: WordCloud,
    ) -> Self {
        Self {
            fetcher,
            schema,
            normalizer,
            cloud: Arc::new(cloud),
        }
    }

    pub fn schema(&self) -> &FieldSelectorSet {
        &self.schema
    }

    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }

    pub fn cloud(&self) -> &WordCloud {
        &self.cloud
    }

    /// Extracted items without normalization
    pub async fn items(&self) -> Result<Vec<ListedItem>, PipelineError> {
        let mut run = StageLog::start("items");
        let result = self.fetch_items(&mut run).await;
        run.finish(result)
    }

    /// Extracted items with the normalized primary field attached.
    /// An empty page yields an empty list.
    pub async fn crawl(&self) -> Result<Vec<CrawledItem>, PipelineError> {
        let mut run = StageLog::start("crawl");
        let result = self.crawl_inner(&mut run).await;
        run.finish(result)
    }

    async fn crawl_inner(&self, run: &mut StageLog) -> Result<Vec<CrawledItem>, PipelineError> {
        let items = self.fetch_items(run).await?;
        run.enter(PipelineStage::Normalizing);
        let primary = &self.schema.primary_field;
        Ok(items
            .into_iter()
            .map(|item| {
                let lemmas = self.normalizer.normalize(item.get(primary).unwrap_or_default());
                CrawledItem {
                    item,
                    primary_field: primary.clone(),
                    lemmas,
                }
            })
            .collect())
    }

    /// Word cloud of the item at `index`
    pub async fn render_item(&self, index: usize) -> Result<ItemCloud, PipelineError> {
        let mut run = StageLog::start("render_item");
        let result = self.render_item_inner(index, &mut run).await;
        run.finish(result)
    }

    async fn render_item_inner(
        &self,
        index: usize,
        run: &mut StageLog,
    ) -> Result<ItemCloud, PipelineError> {
        let items = self.require_items(run).await?;
        let item = items.get(index).ok_or(PipelineError::IndexOutOfRange {
            index,
            len: items.len(),
        })?;

        run.enter(PipelineStage::Normalizing);
        let job = self.prepare(index, item);

        run.enter(PipelineStage::Rendering);
        self.render_blocking(move |cloud| render_job(cloud, job)).await
    }

    /// Word clouds of every item, in item order
    pub async fn render_all(&self) -> Result<Vec<ItemCloud>, PipelineError> {
        let mut run = StageLog::start("render_all");
        let result = self.render_all_inner(&mut run).await;
        run.finish(result)
    }

    async fn render_all_inner(&self, run: &mut StageLog) -> Result<Vec<ItemCloud>, PipelineError> {
        let items = self.require_items(run).await?;

        run.enter(PipelineStage::Normalizing);
        let jobs: Vec<RenderJob> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.prepare(index, item))
            .collect();

        run.enter(PipelineStage::Rendering);
        self.render_blocking(move |cloud| {
            jobs.into_iter()
                .map(|job| render_job(cloud, job))
                .collect::<Result<Vec<_>, _>>()
        })
        .await
    }

    /// Primary fields of all items joined by single spaces
    pub async fn corpus(&self) -> Result<String, PipelineError> {
        let mut run = StageLog::start("corpus");
        let result = self.corpus_inner(&mut run).await;
        run.finish(result)
    }

    async fn corpus_inner(&self, run: &mut StageLog) -> Result<String, PipelineError> {
        let items = self.require_items(run).await?;
        let primary = &self.schema.primary_field;
        Ok(items
            .iter()
            .map(|item| item.get(primary).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Scrape the corpus and write it to `path` as UTF-8.
    /// Nothing is written when any stage fails.
    pub async fn write_corpus(&self, path: &Path) -> Result<String, PipelineError> {
        let corpus = self.corpus().await?;
        write_atomically(path, corpus.as_bytes())?;
        info!("Wrote {} bytes of corpus to {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Render free text (e.g. a corpus file) with this pipeline's renderer
    pub async fn render_text(&self, text: String) -> Result<RenderedImage, PipelineError> {
        let mut run = StageLog::start("render_text");
        run.enter(PipelineStage::Rendering);
        let result = self
            .render_blocking(move |cloud| {
                cloud
                    .render(CloudInput::Text(&text))
                    .map_err(PipelineError::from)
            })
            .await;
        run.finish(result)
    }

    async fn fetch_items(&self, run: &mut StageLog) -> Result<Vec<ListedItem>, PipelineError> {
        run.enter(PipelineStage::Fetching);
        let doc = self.fetcher.fetch_source().await?;

        run.enter(PipelineStage::Extracting);
        Ok(extract_items(&doc, &self.schema)?)
    }

    /// Like `fetch_items`, but an empty page is an error
    async fn require_items(&self, run: &mut StageLog) -> Result<Vec<ListedItem>, PipelineError> {
        let items = self.fetch_items(run).await?;
        if items.is_empty() {
            return Err(PipelineError::NoItems {
                url: self.fetcher.config().source_url.clone(),
            });
        }
        Ok(items)
    }

    fn prepare(&self, index: usize, item: &ListedItem) -> RenderJob {
        let text = item.get(&self.schema.primary_field).unwrap_or_default();
        let tokens = self.normalizer.normalize(text).into_vec();
        debug!("Item {} normalized into {} tokens", index, tokens.len());
        RenderJob {
            index,
            title: item
                .get(&self.schema.display_field)
                .unwrap_or_default()
                .to_string(),
            tokens,
        }
    }

    /// Run CPU-bound rendering off the async workers
    async fn render_blocking<T, F>(&self, job: F) -> Result<T, PipelineError>
    where
        T: Send + 'static,
        F: FnOnce(&WordCloud) -> Result<T, PipelineError> + Send + 'static,
    {
        let cloud = Arc::clone(&self.cloud);
        tokio::task::spawn_blocking(move || job(&*cloud))
            .await
            .map_err(|e| PipelineError::Task(e.to_string()))?
    }
}

fn render_job(cloud: &WordCloud, job: RenderJob) -> Result<ItemCloud, PipelineError> {
    let subject = || format!("item {}", job.index);
    let rendered = cloud
        .render(CloudInput::Tokens(&job.tokens))
        .map_err(|e| PipelineError::from_render(e, subject()))?;
    let wordcloud = rendered
        .to_base64_png()
        .map_err(|e| PipelineError::from_render(e, subject()))?;
    Ok(ItemCloud {
        index: job.index,
        title: job.title,
        wordcloud,
    })
}
