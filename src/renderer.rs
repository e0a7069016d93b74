// src/renderer.rs
use image::{Rgba, RgbaImage};

use crate::bitmap::Bitmap;
use crate::command::{Operation, OperationHistory};
use crate::geometry::Rectangle;
use crate::util::time::Stopwatch;

/// Look of the in-progress selection overlay, in screen points
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    /// Translucent fill, straight (not premultiplied) RGBA
    pub fill: [u8; 4],
    /// Dashed outline, straight RGBA
    pub stroke: [u8; 4],
    pub line_width: f32,
    /// Length of one dash and of one gap
    pub dash: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            fill: [255, 0, 0, 102],
            stroke: [255, 0, 0, 128],
            line_width: 2.0,
            dash: 5.0,
        }
    }
}

/// A drag that has not been committed yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveSelection {
    pub rect: Rectangle,
    /// Source pixels per screen point, so the outline keeps a constant on-screen width
    pub source_per_point: f32,
}

/// Rebuilds the display bitmap from the pristine source and the history.
///
/// Every call starts over from a clone of the source, so the output only
/// depends on the source and the active operations.
#[derive(Debug, Default)]
pub struct Renderer {
    overlay: OverlayStyle,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> &OverlayStyle {
        &self.overlay
    }

    /// Render the active operations, plus the live selection if there is one.
    ///
    /// The live selection is display-only; export uses
    /// `render(source, history, None)`.
    pub fn render(
        &self,
        source: &Bitmap,
        history: &OperationHistory,
        live: Option<&LiveSelection>,
    ) -> Bitmap {
        let watch = Stopwatch::start();
        let mut output = replay(source, history.active());

        if let Some(live) = live {
            draw_selection(output.as_rgba_image_mut(), live, &self.overlay);
        }

        log::debug!(
            "Rendered {} ops over {}x{} in {:.1}ms",
            history.active().len(),
            source.width(),
            source.height(),
            watch.elapsed_ms()
        );
        output
    }
}

/// Clone `source` and apply `operations` to it in order
pub fn replay(source: &Bitmap, operations: &[Operation]) -> Bitmap {
    let mut working = source.clone();
    for op in operations {
        op.apply(&mut working);
    }
    working
}

fn draw_selection(image: &mut RgbaImage, live: &LiveSelection, style: &OverlayStyle) {
    let rect = live.rect;
    if rect.is_empty() {
        return;
    }

    if let Some(bounds) = rect.pixel_bounds(image.width(), image.height()) {
        for y in bounds.y..bounds.y + bounds.height {
            for x in bounds.x..bounds.x + bounds.width {
                blend_pixel(image.get_pixel_mut(x, y), style.fill);
            }
        }
    }

    let scale = live.source_per_point.max(f32::EPSILON);
    stroke_dashed(image, &rect, style.stroke, style.line_width * scale, style.dash * scale);
}

/// Dashed outline centred on the rectangle's edges
fn stroke_dashed(image: &mut RgbaImage, rect: &Rectangle, color: [u8; 4], line_width: f32, dash: f32) {
    let half = (line_width / 2.0).max(0.5);
    let dash = dash.max(1.0);
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

    let outer = Rectangle::new(left - half, top - half, rect.width + 2.0 * half, rect.height + 2.0 * half);
    let Some(bounds) = outer.pixel_bounds(image.width(), image.height()) else {
        return;
    };

    for y in bounds.y..bounds.y + bounds.height {
        for x in bounds.x..bounds.x + bounds.width {
            let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
            let near_horizontal = (cy - top).abs() <= half || (cy - bottom).abs() <= half;
            let near_vertical = (cx - left).abs() <= half || (cx - right).abs() <= half;
            let within_span_x = cx >= left - half && cx <= right + half;
            let within_span_y = cy >= top - half && cy <= bottom + half;

            let along = if near_horizontal && within_span_x {
                cx - left
            } else if near_vertical && within_span_y {
                cy - top
            } else {
                continue;
            };

            if ((along.max(0.0) / dash) as u32) % 2 == 0 {
                blend_pixel(image.get_pixel_mut(x, y), color);
            }
        }
    }
}

/// Source-over blend of a straight-alpha color onto a pixel
fn blend_pixel(dst: &mut Rgba<u8>, color: [u8; 4]) {
    let alpha = u32::from(color[3]);
    let inv = 255 - alpha;
    for c in 0..3 {
        let value = u32::from(color[c]) * alpha + u32::from(dst.0[c]) * inv;
        dst.0[c] = ((value + 127) / 255) as u8;
    }
    let dst_alpha = u32::from(dst.0[3]);
    dst.0[3] = (alpha + (dst_alpha * inv + 127) / 255).min(255) as u8;
}
