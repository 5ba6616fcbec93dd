// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for word cloud rendering

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while rendering a word cloud
#[derive(Debug, Error)]
pub enum RenderError {
    /// Configuration cannot produce an image
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    /// Nothing left to draw once stopwords were removed
    #[error("Empty corpus: no terms left to render after filtering")]
    EmptyCorpus,

    /// Pixel buffer could not be encoded
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// Encoded image could not be written
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }

    fn from_hex(hex: &str) -> Option<Self> {
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts a handful of color names, `#rrggbb` and `#rgb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        let named = match value.as_str() {
            "white" => Some(Color::WHITE),
            "black" => Some(Color::BLACK),
            "red" => Some(Color::new(255, 0, 0)),
            "green" => Some(Color::new(0, 128, 0)),
            "blue" => Some(Color::new(0, 0, 255)),
            "yellow" => Some(Color::new(255, 255, 0)),
            "gray" | "grey" => Some(Color::new(128, 128, 128)),
            "navy" => Some(Color::new(0, 0, 128)),
            "ivory" => Some(Color::new(255, 255, 240)),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }
        value
            .strip_prefix('#')
            .and_then(Color::from_hex)
            .ok_or_else(|| format!("Unrecognized color '{}'", s))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Direction a term is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    /// Rotated 90° counter-clockwise, read bottom to top
    Vertical,
}

/// How glyph size follows frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontScale {
    #[default]
    Linear,
    Log,
}

impl FromStr for FontScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(FontScale::Linear),
            "log" | "logarithmic" => Ok(FontScale::Log),
            other => Err(format!("Unknown font scale '{}' (expected 'linear' or 'log')", other)),
        }
    }
}

/// A term that made it onto the canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord {
    pub term: String,
    pub count: usize,
    /// Glyph height as drawn, a multiple of the 8 px cell
    pub font_size: u32,
    pub orientation: Orientation,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub color: Color,
}
