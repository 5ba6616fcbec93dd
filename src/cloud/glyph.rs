// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! 8x8 bitmap glyphs scaled by whole pixels

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::RgbImage;

use super::types::{Color, Orientation};

/// Edge of one unscaled glyph cell in pixels
pub const CELL: u32 = 8;

/// Whole-pixel scale closest to `font_size`, never below 1
pub fn scale_for_size(font_size: u32) -> u32 {
    ((font_size as f64 / CELL as f64).round() as u32).max(1)
}

/// Bitmap rows for `c`; characters without a glyph render as '?'
pub fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Width and height of `text` drawn at `scale`
pub fn text_extent(text: &str, scale: u32, orientation: Orientation) -> (u32, u32) {
    let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    let line = CELL.saturating_mul(scale);
    let run = chars.saturating_mul(line);
    match orientation {
        Orientation::Horizontal => (run, line),
        Orientation::Vertical => (line, run),
    }
}

/// Draw `text` with its top-left corner at (`x`, `y`).
///
/// Vertical text is the horizontal rendering rotated 90° counter-clockwise.
/// Pixels falling outside the image are clipped.
pub fn draw_text(
    image: &mut RgbImage,
    text: &str,
    x: u32,
    y: u32,
    scale: u32,
    orientation: Orientation,
    color: Color,
) {
    let run = text.chars().count() as u32 * CELL;
    let pixel = color.to_rgb();

    for (index, c) in text.chars().enumerate() {
        let rows = glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..CELL {
                if bits & (1 << col) == 0 {
                    continue;
                }
                // position in the unscaled horizontal rendering
                let hx = index as u32 * CELL + col;
                let hy = row as u32;
                let (gx, gy) = match orientation {
                    Orientation::Horizontal => (hx, hy),
                    Orientation::Vertical => (hy, run - 1 - hx),
                };
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = x + gx * scale + dx;
                        let py = y + gy * scale + dy;
                        if px < image.width() && py < image.height() {
                            image.put_pixel(px, py, pixel);
                        }
                    }
                }
            }
        }
    }
}
