//! Axis-aligned rectangles for collision detection
//!
//! Every entity in the playfield collides as a box: top-left corner at
//! `(x, y)`, extending `w` right and `h` down (screen coordinates, +y is down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0, "negative rect size {w}x{h}");
        Self { x, y, w, h }
    }

    /// Build from a top-left position and a size
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Check overlap with another rectangle (see [`overlaps`])
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(*self, *other)
    }
}

/// True iff the open intervals of both rectangles intersect on both axes.
///
/// Rectangles that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
