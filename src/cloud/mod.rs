// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Word cloud rendering
//!
//! ```text
//! text / tokens → FrequencyModel → ranked, capped terms → Occupancy → RgbImage
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let cloud = WordCloud::new(CloudConfig::from_env())?;
//! let rendered = cloud.render(CloudInput::Text("a light in the attic"))?;
//! let encoded = rendered.to_base64_png()?;
//! ```

pub mod config;
pub mod frequency;
pub mod glyph;
pub mod layout;
pub mod render;
pub mod types;

pub use config::CloudConfig;
pub use frequency::{FrequencyModel, TermCount};
pub use render::{CloudInput, RenderedImage, WordCloud};
pub use types::{Color, FontScale, Orientation, PlacedWord, RenderError};
