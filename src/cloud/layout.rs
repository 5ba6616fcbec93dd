// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Greedy placement of term boxes on the canvas

use rand::Rng;

/// Axis-aligned box in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the boxes are closer than `margin` pixels
    pub fn conflicts(&self, other: &Rect, margin: u32) -> bool {
        self.x < other.x.saturating_add(other.width).saturating_add(margin)
            && other.x < self.x.saturating_add(self.width).saturating_add(margin)
            && self.y < other.y.saturating_add(other.height).saturating_add(margin)
            && other.y < self.y.saturating_add(self.height).saturating_add(margin)
    }
}

/// Boxes already placed on a canvas
#[derive(Debug, Clone)]
pub struct Occupancy {
    width: u32,
    height: u32,
    margin: u32,
    placed: Vec<Rect>,
}

impl Occupancy {
    pub fn new(width: u32, height: u32, margin: u32) -> Self {
        Self {
            width,
            height,
            margin,
            placed: Vec::new(),
        }
    }

    pub fn is_free(&self, rect: &Rect) -> bool {
        rect.x.saturating_add(rect.width) <= self.width
            && rect.y.saturating_add(rect.height) <= self.height
            && !self.placed.iter().any(|p| p.conflicts(rect, self.margin))
    }

    /// Sample up to `attempts` random positions for a `width` x `height` box
    /// and return the first free one
    pub fn find_position<R: Rng>(
        &self,
        width: u32,
        height: u32,
        attempts: usize,
        rng: &mut R,
    ) -> Option<Rect> {
        if width == 0 || height == 0 || width > self.width || height > self.height {
            return None;
        }
        (0..attempts).find_map(|_| {
            let x = rng.gen_range(0..=self.width - width);
            let y = rng.gen_range(0..=self.height - height);
            let candidate = Rect::new(x, y, width, height);
            self.is_free(&candidate).then_some(candidate)
        })
    }

    pub fn occupy(&mut self, rect: Rect) {
        self.placed.push(rect);
    }

    pub fn placed(&self) -> &[Rect] {
        &self.placed
    }
}
