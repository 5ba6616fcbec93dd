// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Word cloud renderer
//!
//! Terms are ranked by frequency, capped, sized between the configured font
//! bounds and placed greedily from the most frequent down. A term that does
//! not fit at its size is retried at smaller glyph scales and skipped once
//! the minimum scale fails too.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use super::config::CloudConfig;
use super::frequency::FrequencyModel;
use super::glyph::{self, CELL};
use super::layout::Occupancy;
use super::types::{Color, FontScale, Orientation, PlacedWord, RenderError};
use crate::utils::fs::write_atomically;

const WORD_PATTERN: &str = r"\w[\w']+";

/// Viridis samples, dark to light
const PALETTE: [Color; 8] = [
    Color::new(68, 1, 84),
    Color::new(70, 50, 127),
    Color::new(54, 92, 141),
    Color::new(39, 127, 142),
    Color::new(31, 161, 135),
    Color::new(74, 193, 109),
    Color::new(160, 218, 57),
    Color::new(253, 231, 37),
];

/// What to draw: free text or already normalized tokens
#[derive(Debug, Clone, Copy)]
pub enum CloudInput<'a> {
    Text(&'a str),
    Tokens(&'a [String]),
}

/// Rendered canvas plus the terms that made it onto it, in rank order
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub image: RgbImage,
    pub words: Vec<PlacedWord>,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        self.encode(ImageFormat::Png)
    }

    /// PNG bytes in standard padded base64
    pub fn to_base64_png(&self) -> Result<String, RenderError> {
        Ok(STANDARD.encode(self.to_png()?))
    }

    /// Encode by the path's extension (PNG when missing or unknown) and
    /// write the file in one step
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let format = path
            .extension()
            .and_then(ImageFormat::from_extension)
            .filter(|f| matches!(f, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp))
            .unwrap_or(ImageFormat::Png);
        let bytes = self.encode(format)?;
        write_atomically(path, &bytes)?;
        info!("Saved word cloud to {}", path.display());
        Ok(())
    }

    fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buffer, format)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

/// Renderer for one validated configuration
#[derive(Debug, Clone)]
pub struct WordCloud {
    config: CloudConfig,
    word_pattern: Regex,
}

impl WordCloud {
    pub fn new(config: CloudConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let word_pattern =
            Regex::new(WORD_PATTERN).map_err(|e| RenderError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            config,
            word_pattern,
        })
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Split free text into lowercase words of two or more characters,
    /// dropping possessive `'s` and bare numbers
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.word_pattern
            .find_iter(text)
            .map(|m| {
                let word = m.as_str().to_lowercase();
                match word.strip_suffix("'s") {
                    Some(stem) => stem.to_string(),
                    None => word,
                }
            })
            .filter(|word| !word.is_empty() && !word.chars().all(|c| c.is_ascii_digit()))
            .collect()
    }

    /// Count terms of `input` with this configuration's stopwords and
    /// collocation policy
    pub fn frequencies(&self, input: CloudInput<'_>) -> FrequencyModel {
        let owned;
        let tokens: &[String] = match input {
            CloudInput::Text(text) => {
                owned = self.tokenize(text);
                &owned
            }
            CloudInput::Tokens(tokens) => tokens,
        };

        if self.config.collocations {
            FrequencyModel::with_collocations(
                tokens,
                &self.config.stopwords,
                self.config.collocation_threshold,
            )
        } else {
            FrequencyModel::from_tokens(tokens, &self.config.stopwords)
        }
    }

    pub fn render(&self, input: CloudInput<'_>) -> Result<RenderedImage, RenderError> {
        let model = self.frequencies(input);
        if model.is_empty() {
            return Err(RenderError::EmptyCorpus);
        }
        let config = &self.config;
        let terms = model.top(config.max_words);
        let max_count = model.max_count();

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut image = RgbImage::from_pixel(config.width, config.height, config.background.to_rgb());
        let mut occupancy = Occupancy::new(config.width, config.height, config.margin);
        let min_scale = glyph::scale_for_size(config.min_font_size);
        let mut words = Vec::with_capacity(terms.len());

        for term in terms {
            let size = self.font_size(term.count, max_count);
            let orientation = if rng.gen::<f64>() < config.prefer_horizontal {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let color = self.pick_color(&mut rng);

            let start_scale = glyph::scale_for_size(size).max(min_scale);
            let placed = (min_scale..=start_scale).rev().find_map(|scale| {
                let (width, height) = glyph::text_extent(&term.term, scale, orientation);
                occupancy
                    .find_position(width, height, config.max_attempts, &mut rng)
                    .map(|rect| (scale, rect))
            });

            let Some((scale, rect)) = placed else {
                debug!("No room for '{}' at any size, skipping", term.term);
                continue;
            };
            occupancy.occupy(rect);
            glyph::draw_text(&mut image, &term.term, rect.x, rect.y, scale, orientation, color);

            words.push(PlacedWord {
                term: term.term.clone(),
                count: term.count,
                font_size: scale * CELL,
                orientation,
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                color,
            });
        }

        info!(
            "Rendered {}x{} word cloud: {} of {} terms placed ({} distinct)",
            config.width,
            config.height,
            words.len(),
            terms.len(),
            model.len()
        );
        Ok(RenderedImage { image, words })
    }

    /// Glyph size for `count` between the configured bounds
    fn font_size(&self, count: usize, max_count: usize) -> u32 {
        let min = self.config.min_font_size as f64;
        let max = self.config.max_font_size as f64;
        let ratio = match self.config.font_scale {
            FontScale::Linear => count as f64 / max_count as f64,
            FontScale::Log => (1.0 + count as f64).ln() / (1.0 + max_count as f64).ln(),
        };
        (min + (max - min) * ratio.clamp(0.0, 1.0)).round() as u32
    }

    fn pick_color(&self, rng: &mut StdRng) -> Color {
        let index = rng.gen_range(0..PALETTE.len());
        let color = PALETTE[index];
        if color == self.config.background {
            PALETTE[(index + 1) % PALETTE.len()]
        } else {
            color
        }
    }
}
