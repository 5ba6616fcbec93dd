// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cloud::{CloudConfig, Color, FontScale};
use crate::scrape::{FetchConfig, SchemaKind, MAX_RETRIES};

/// Where to scrape from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Item schema (books/quotes)
    #[arg(long, env = "SCHEMA", default_value = "quotes")]
    pub schema: SchemaKind,

    /// Listing page URL (defaults to the schema's site)
    #[arg(long, env = "SOURCE_URL")]
    pub url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, env = "FETCH_TIMEOUT_MS", default_value = "10000")]
    pub timeout_ms: u64,

    /// Extra attempts for network errors and 429/5xx responses
    #[arg(long, env = "FETCH_MAX_RETRIES", default_value = "0")]
    pub retries: u32,
}

impl SourceArgs {
    pub fn fetch_config(&self) -> Result<FetchConfig> {
        let config = FetchConfig {
            source_url: self
                .url
                .clone()
                .unwrap_or_else(|| self.schema.default_url().to_string()),
            timeout_ms: self.timeout_ms,
            max_retries: self.retries.min(MAX_RETRIES),
            ..FetchConfig::from_env()
        };
        config.validate().map_err(|e| anyhow!(e))?;
        Ok(config)
    }
}

/// Word cloud appearance; unset options keep the standalone defaults
#[derive(Args, Debug, Clone, Default)]
pub struct CloudArgs {
    /// Canvas width in pixels
    #[arg(long, env = "CLOUD_WIDTH")]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long, env = "CLOUD_HEIGHT")]
    pub height: Option<u32>,

    /// Background color (name, #rrggbb or #rgb)
    #[arg(long, env = "CLOUD_BACKGROUND")]
    pub background: Option<Color>,

    /// Maximum number of terms drawn
    #[arg(long, env = "CLOUD_MAX_WORDS")]
    pub max_words: Option<usize>,

    /// Smallest glyph size in pixels
    #[arg(long, env = "CLOUD_MIN_FONT_SIZE")]
    pub min_font_size: Option<u32>,

    /// Largest glyph size in pixels
    #[arg(long, env = "CLOUD_MAX_FONT_SIZE")]
    pub max_font_size: Option<u32>,

    /// Probability of drawing a term horizontally (0-1)
    #[arg(long, env = "CLOUD_PREFER_HORIZONTAL")]
    pub prefer_horizontal: Option<f64>,

    /// Treat frequent word pairs as single terms
    #[arg(long, env = "CLOUD_COLLOCATIONS")]
    pub collocations: bool,

    /// Frequency to size mapping (linear/log)
    #[arg(long, env = "CLOUD_FONT_SCALE")]
    pub font_scale: Option<FontScale>,

    /// Layout seed
    #[arg(long, env = "CLOUD_SEED")]
    pub seed: Option<u64>,

    /// Comma-separated extra stopwords
    #[arg(long, value_delimiter = ',')]
    pub stopwords: Vec<String>,
}

impl CloudArgs {
    pub fn cloud_config(&self) -> CloudConfig {
        let mut config = CloudConfig::standalone();
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(background) = self.background {
            config.background = background;
        }
        if let Some(max_words) = self.max_words {
            config.max_words = max_words;
        }
        if let Some(size) = self.min_font_size {
            config.min_font_size = size;
        }
        if let Some(size) = self.max_font_size {
            config.max_font_size = size;
        }
        if let Some(p) = self.prefer_horizontal {
            config.prefer_horizontal = p;
        }
        if self.collocations {
            config.collocations = true;
        }
        if let Some(scale) = self.font_scale {
            config.font_scale = scale;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.with_extra_stopwords(&self.stopwords)
    }
}

/// Corpus file location
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Plain-text corpus file
    #[arg(long, value_name = "FILE", default_value = "corpus.txt")]
    pub corpus: PathBuf,
}

/// Image file location
#[derive(Args, Debug, Clone)]
pub struct ImageArgs {
    /// Output image (format from extension: png, jpg, bmp)
    #[arg(short, long, value_name = "FILE", default_value = "wordcloud.png")]
    pub output: PathBuf,
}
