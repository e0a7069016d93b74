use image::RgbaImage;

use crate::bitmap::Bitmap;
use crate::command::Intensity;
use crate::error::TransformError;
use crate::geometry::{PixelBounds, Rectangle};

const CHANNELS: usize = 4;

/// Box radius in pixels
pub fn blur_radius(intensity: Intensity) -> u32 {
    (u32::from(intensity.get()) / 2).max(1)
}

/// Blur `rect` in place.
///
/// The region is copied out first and blurred against itself only: pixels
/// outside `rect` are never sampled and never written. If the scratch
/// surface can't be allocated the bitmap is left as it was.
pub fn apply_blur(bitmap: &mut Bitmap, rect: &Rectangle, intensity: Intensity) {
    let Some(bounds) = rect.pixel_bounds(bitmap.width(), bitmap.height()) else {
        return;
    };

    let blurred = extract_region(bitmap.as_rgba_image(), bounds)
        .and_then(|region| box_blur(&region, blur_radius(intensity)));

    match blurred {
        Ok(region) => write_region(bitmap.as_rgba_image_mut(), bounds, &region),
        Err(err) => log::error!("Blur failed for {:?}: {}", bounds, err),
    }
}

/// Allocate a zeroed `width` x `height` RGBA buffer without aborting on OOM
fn allocate_surface(width: u32, height: u32) -> Result<Vec<u8>, TransformError> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(TransformError::SurfaceTooLarge { width, height })?;

    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| TransformError::SurfaceAllocation { width, height })?;
    data.resize(len, 0);
    Ok(data)
}

/// Copy `bounds` out of `image` into its own buffer
fn extract_region(image: &RgbaImage, bounds: PixelBounds) -> Result<RgbaImage, TransformError> {
    let mut data = allocate_surface(bounds.width, bounds.height)?;
    let src = image.as_raw();
    let src_stride = image.width() as usize * CHANNELS;
    let row_len = bounds.width as usize * CHANNELS;

    for (row, dst) in data.chunks_exact_mut(row_len).enumerate() {
        let start = (bounds.y as usize + row) * src_stride + bounds.x as usize * CHANNELS;
        dst.copy_from_slice(&src[start..start + row_len]);
    }

    RgbaImage::from_raw(bounds.width, bounds.height, data).ok_or(TransformError::SurfaceAllocation {
        width: bounds.width,
        height: bounds.height,
    })
}

/// Copy `region` back into `image` at `bounds`
fn write_region(image: &mut RgbaImage, bounds: PixelBounds, region: &RgbaImage) {
    let dst_stride = image.width() as usize * CHANNELS;
    let row_len = bounds.width as usize * CHANNELS;
    let dst: &mut [u8] = image;

    for (row, src) in region.as_raw().chunks_exact(row_len).enumerate() {
        let start = (bounds.y as usize + row) * dst_stride + bounds.x as usize * CHANNELS;
        dst[start..start + row_len].copy_from_slice(src);
    }
}

/// Separable box blur (horizontal pass, then vertical), edges clamped to
/// the image itself. All four channels are averaged.
fn box_blur(src: &RgbaImage, radius: u32) -> Result<RgbaImage, TransformError> {
    let (width, height) = src.dimensions();
    let mut tmp = allocate_surface(width, height)?;
    let mut out = allocate_surface(width, height)?;
    let (w, h) = (width as usize, height as usize);
    let radius = radius as usize;

    // Pass 1: rows. A line is a row, stepping one pixel along it.
    blur_pass(src.as_raw(), &mut tmp, h, w, w * CHANNELS, CHANNELS, radius);
    // Pass 2: columns. A line is a column, stepping one row along it.
    blur_pass(&tmp, &mut out, w, h, CHANNELS, w * CHANNELS, radius);

    RgbaImage::from_raw(width, height, out).ok_or(TransformError::SurfaceAllocation { width, height })
}

/// Sliding-window average along `lines` lines of `len` pixels each.
/// `line_step` is the byte distance between lines, `pixel_step` between
/// neighbouring pixels on one line.
fn blur_pass(
    src: &[u8],
    dst: &mut [u8],
    lines: usize,
    len: usize,
    line_step: usize,
    pixel_step: usize,
    radius: usize,
) {
    if len == 0 {
        return;
    }
    let window = (2 * radius + 1) as u32;
    let last = len - 1;
    let clamp = |i: isize| i.clamp(0, last as isize) as usize;

    for line in 0..lines {
        let base = line * line_step;
        let at = |i: usize| base + i * pixel_step;

        // Prime the window centred on pixel 0
        let mut sums = [0u32; CHANNELS];
        for k in -(radius as isize)..=(radius as isize) {
            let idx = at(clamp(k));
            for (c, sum) in sums.iter_mut().enumerate() {
                *sum += u32::from(src[idx + c]);
            }
        }

        for i in 0..len {
            let out = at(i);
            for (c, sum) in sums.iter().enumerate() {
                dst[out + c] = (sum / window) as u8;
            }

            // Slide: add the pixel entering on the right, drop the one leaving on the left
            let enter = at((i + radius + 1).min(last));
            let leave = at(clamp(i as isize - radius as isize));
            for (c, sum) in sums.iter_mut().enumerate() {
                *sum = *sum + u32::from(src[enter + c]) - u32::from(src[leave + c]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse() -> Bitmap {
        let mut bitmap = Bitmap::filled(41, 41, [0, 0, 0, 255]);
        bitmap.put_pixel(20, 20, [255, 255, 255, 255]);
        bitmap
    }

    #[test]
    fn test_radius_has_floor_of_one() {
        assert_eq!(blur_radius(Intensity::new(1).unwrap()), 1);
        assert_eq!(blur_radius(Intensity::new(3).unwrap()), 1);
        assert_eq!(blur_radius(Intensity::new(50).unwrap()), 25);
    }

    #[test]
    fn test_uniform_region_is_unchanged() {
        let mut bitmap = Bitmap::filled(20, 20, [12, 34, 56, 255]);
        let before = bitmap.clone();
        apply_blur(&mut bitmap, &Rectangle::new(2.0, 2.0, 10.0, 10.0), Intensity::new(9).unwrap());
        assert_eq!(bitmap, before);
    }

    #[test]
    fn test_stronger_intensity_spreads_more() {
        let rect = Rectangle::new(0.0, 0.0, 41.0, 41.0);

        let mut weak = impulse();
        apply_blur(&mut weak, &rect, Intensity::new(2).unwrap());
        let mut strong = impulse();
        apply_blur(&mut strong, &rect, Intensity::new(12).unwrap());

        let weak_peak = weak.pixel(20, 20)[0];
        let strong_peak = strong.pixel(20, 20)[0];
        assert!(weak_peak < 255);
        assert!(strong_peak < weak_peak);
        // The wider box reaches pixels the narrow one doesn't
        assert_eq!(weak.pixel(24, 20)[0], 0);
        assert!(strong.pixel(24, 20)[0] > 0);
    }

    #[test]
    fn test_region_does_not_sample_outside() {
        // Black square inside a white frame: blurring exactly the square must
        // keep it black because white is never sampled.
        let mut bitmap = Bitmap::filled(20, 20, [255, 255, 255, 255]);
        for y in 5..15 {
            for x in 5..15 {
                bitmap.put_pixel(x, y, [0, 0, 0, 255]);
            }
        }
        apply_blur(&mut bitmap, &Rectangle::new(5.0, 5.0, 10.0, 10.0), Intensity::new(20).unwrap());
        for y in 5..15 {
            for x in 5..15 {
                assert_eq!(bitmap.pixel(x, y), [0, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn test_oversized_surface_is_an_error() {
        assert!(matches!(
            allocate_surface(u32::MAX, u32::MAX),
            Err(TransformError::SurfaceTooLarge { .. })
        ));
    }
}
