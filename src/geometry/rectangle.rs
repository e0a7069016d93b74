use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Gestures at or below this size (in source pixels) never become operations
pub const MIN_SELECTION_SIZE: f32 = 5.0;

/// An axis-aligned rectangle in source-bitmap coordinates, top-left origin.
///
/// Width and height are never negative once built through [`Rectangle::from_corners`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A rectangle snapped to whole pixels and clipped to a bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalize a drag between two arbitrary corners
    pub fn from_corners(a: Pos2, b: Pos2) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Whether a committed gesture of this size should produce an operation
    pub fn exceeds(&self, min_size: f32) -> bool {
        self.is_finite() && self.width > min_size && self.height > min_size
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Snap to whole pixels (fractions are truncated) and clip to a
    /// `width` x `height` bitmap. `None` when nothing is left.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> Option<PixelBounds> {
        if self.is_empty() || !self.is_finite() {
            return None;
        }

        // Edges in f64 so huge extents clamp instead of overflowing
        let x0 = f64::from(self.x).trunc();
        let y0 = f64::from(self.y).trunc();
        let x1 = x0 + f64::from(self.width).trunc();
        let y1 = y0 + f64::from(self.height).trunc();

        let left = x0.clamp(0.0, f64::from(width)) as u32;
        let top = y0.clamp(0.0, f64::from(height)) as u32;
        let right = x1.clamp(0.0, f64::from(width)) as u32;
        let bottom = y1.clamp(0.0, f64::from(height)) as u32;

        if right <= left || bottom <= top {
            return None;
        }

        Some(PixelBounds {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}
