//! Region transforms. Each one mutates the pixels inside a rectangle and
//! nothing else, and knows nothing about history or rendering.

mod blur;
mod mosaic;

pub use blur::{apply_blur, blur_radius};
pub use mosaic::{apply_mosaic, block_size};

use crate::bitmap::Bitmap;
use crate::command::{Intensity, ToolKind};
use crate::geometry::Rectangle;

/// Run the transform for `kind` over `rect`
pub fn apply(kind: ToolKind, bitmap: &mut Bitmap, rect: &Rectangle, intensity: Intensity) {
    match kind {
        ToolKind::Mosaic => apply_mosaic(bitmap, rect, intensity),
        ToolKind::Blur => apply_blur(bitmap, rect, intensity),
    }
}
