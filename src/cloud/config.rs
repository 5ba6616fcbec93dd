// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for word cloud rendering

use std::collections::HashSet;
use std::env;

use super::types::{Color, FontScale, RenderError};
use crate::nlp::stopwords;

/// Largest canvas edge accepted, in pixels
pub const MAX_CANVAS_EDGE: u32 = 8192;

/// Configuration for word cloud rendering
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// Canvas width in pixels (default: 800)
    pub width: u32,
    /// Canvas height in pixels (default: 400)
    pub height: u32,
    /// Canvas background (default: white)
    pub background: Color,
    /// Maximum distinct terms drawn (default: 100)
    pub max_words: usize,
    /// Smallest glyph size in pixels (default: 10)
    pub min_font_size: u32,
    /// Largest glyph size in pixels (default: 100)
    pub max_font_size: u32,
    /// Probability a term is drawn horizontally (default: 0.9)
    pub prefer_horizontal: f64,
    /// Count adjacent word pairs as single terms (default: true)
    pub collocations: bool,
    /// Log-likelihood score a pair must exceed to count as one term (default: 30)
    pub collocation_threshold: f64,
    /// Frequency to glyph size mapping (default: linear)
    pub font_scale: FontScale,
    /// Positions sampled per glyph size before shrinking (default: 200)
    pub max_attempts: usize,
    /// Seed for orientation, placement and color draws (default: 42)
    pub seed: u64,
    /// Free pixels kept around every placed term (default: 2)
    pub margin: u32,
    /// Terms never drawn, applied on top of the normalizer's stopwords
    pub stopwords: HashSet<String>,
}

impl CloudConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            width: env_parse("CLOUD_WIDTH").unwrap_or(defaults.width),
            height: env_parse("CLOUD_HEIGHT").unwrap_or(defaults.height),
            background: env_parse("CLOUD_BACKGROUND").unwrap_or(defaults.background),
            max_words: env_parse("CLOUD_MAX_WORDS").unwrap_or(defaults.max_words),
            min_font_size: env_parse("CLOUD_MIN_FONT_SIZE").unwrap_or(defaults.min_font_size),
            max_font_size: env_parse("CLOUD_MAX_FONT_SIZE").unwrap_or(defaults.max_font_size),
            prefer_horizontal: env_parse("CLOUD_PREFER_HORIZONTAL")
                .unwrap_or(defaults.prefer_horizontal),
            collocations: env::var("CLOUD_COLLOCATIONS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.collocations),
            collocation_threshold: env_parse("CLOUD_COLLOCATION_THRESHOLD")
                .unwrap_or(defaults.collocation_threshold),
            font_scale: env_parse("CLOUD_FONT_SCALE").unwrap_or(defaults.font_scale),
            max_attempts: env_parse("CLOUD_MAX_ATTEMPTS").unwrap_or(defaults.max_attempts),
            seed: env_parse("CLOUD_SEED").unwrap_or(defaults.seed),
            margin: env_parse("CLOUD_MARGIN").unwrap_or(defaults.margin),
            stopwords: defaults.stopwords,
        }
    }

    /// Settings of the standalone corpus script: fewer rotated terms, no pairs
    pub fn standalone() -> Self {
        Self {
            prefer_horizontal: 0.7,
            collocations: false,
            ..Self::default()
        }
    }

    /// Add stopwords on top of the current set (lowercased)
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |msg: &str| Err(RenderError::InvalidConfig(msg.to_string()));

        if self.width == 0 || self.height == 0 {
            return invalid("canvas width and height must be positive");
        }
        if self.width > MAX_CANVAS_EDGE || self.height > MAX_CANVAS_EDGE {
            return Err(RenderError::InvalidConfig(format!(
                "canvas edges cannot exceed {} pixels",
                MAX_CANVAS_EDGE
            )));
        }
        if self.max_words == 0 {
            return invalid("max_words must be at least 1");
        }
        if self.min_font_size == 0 {
            return invalid("min_font_size must be at least 1");
        }
        if self.min_font_size > self.max_font_size {
            return invalid("min_font_size cannot exceed max_font_size");
        }
        if self.max_font_size > MAX_CANVAS_EDGE {
            return Err(RenderError::InvalidConfig(format!(
                "max_font_size cannot exceed {} pixels",
                MAX_CANVAS_EDGE
            )));
        }
        if !(0.0..=1.0).contains(&self.prefer_horizontal) {
            return invalid("prefer_horizontal must be between 0 and 1");
        }
        if self.max_attempts == 0 {
            return invalid("max_attempts must be at least 1");
        }
        if !self.collocation_threshold.is_finite() {
            return invalid("collocation_threshold must be finite");
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: Color::WHITE,
            max_words: 100,
            min_font_size: 10,
            max_font_size: 100,
            prefer_horizontal: 0.9,
            collocations: true,
            collocation_threshold: 30.0,
            font_scale: FontScale::Linear,
            max_attempts: 200,
            seed: 42,
            margin: 2,
            stopwords: stopwords::wordcloud(),
        }
    }
}
