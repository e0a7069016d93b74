use crate::bitmap::Bitmap;
use crate::command::Intensity;
use crate::geometry::Rectangle;

/// Edge length of one mosaic block
pub fn block_size(intensity: Intensity) -> u32 {
    u32::from(intensity.get()).max(2)
}

/// Pixelate `rect` in place.
///
/// The region is tiled with `block_size` squares starting at its top-left
/// corner; the last row and column of blocks are cut off at the region edge.
/// Each block's R, G and B become the floor mean over that block. Alpha is
/// left alone.
pub fn apply_mosaic(bitmap: &mut Bitmap, rect: &Rectangle, intensity: Intensity) {
    let Some(bounds) = rect.pixel_bounds(bitmap.width(), bitmap.height()) else {
        return;
    };
    let block = block_size(intensity);
    let image = bitmap.as_rgba_image_mut();

    for by in (0..bounds.height).step_by(block as usize) {
        for bx in (0..bounds.width).step_by(block as usize) {
            let x0 = bounds.x + bx;
            let y0 = bounds.y + by;
            let x1 = x0 + block.min(bounds.width - bx);
            let y1 = y0 + block.min(bounds.height - by);

            let mut sums = [0u64; 3];
            for y in y0..y1 {
                for x in x0..x1 {
                    let px = image.get_pixel(x, y);
                    for (sum, channel) in sums.iter_mut().zip(px.0) {
                        *sum += u64::from(channel);
                    }
                }
            }

            let count = u64::from(x1 - x0) * u64::from(y1 - y0);
            let mean = sums.map(|sum| (sum / count) as u8);

            for y in y0..y1 {
                for x in x0..x1 {
                    image.get_pixel_mut(x, y).0[..3].copy_from_slice(&mean);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intensity(value: u8) -> Intensity {
        Intensity::new(value).unwrap()
    }

    #[test]
    fn test_block_size_has_floor_of_two() {
        assert_eq!(block_size(intensity(1)), 2);
        assert_eq!(block_size(intensity(2)), 2);
        assert_eq!(block_size(intensity(17)), 17);
    }

    #[test]
    fn test_alpha_is_untouched() {
        let mut bitmap = Bitmap::new(2, 2);
        bitmap.put_pixel(0, 0, [100, 0, 0, 10]);
        bitmap.put_pixel(1, 0, [0, 100, 0, 20]);
        bitmap.put_pixel(0, 1, [0, 0, 100, 30]);
        bitmap.put_pixel(1, 1, [0, 0, 0, 40]);

        apply_mosaic(&mut bitmap, &Rectangle::new(0.0, 0.0, 2.0, 2.0), intensity(2));

        assert_eq!(bitmap.pixel(0, 0), [25, 25, 25, 10]);
        assert_eq!(bitmap.pixel(1, 1), [25, 25, 25, 40]);
    }

    #[test]
    fn test_trailing_blocks_are_clipped() {
        // 3x1 strip with block size 2: blocks are [0,1] and [2]
        let mut bitmap = Bitmap::new(3, 1);
        bitmap.put_pixel(0, 0, [10, 10, 10, 255]);
        bitmap.put_pixel(1, 0, [21, 21, 21, 255]);
        bitmap.put_pixel(2, 0, [200, 200, 200, 255]);

        apply_mosaic(&mut bitmap, &Rectangle::new(0.0, 0.0, 3.0, 1.0), intensity(2));

        assert_eq!(bitmap.pixel(0, 0), [15, 15, 15, 255]);
        assert_eq!(bitmap.pixel(1, 0), [15, 15, 15, 255]);
        assert_eq!(bitmap.pixel(2, 0), [200, 200, 200, 255]);
    }

    #[test]
    fn test_degenerate_rect_is_noop() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.put_pixel(1, 1, [9, 9, 9, 9]);
        let before = bitmap.clone();
        apply_mosaic(&mut bitmap, &Rectangle::new(0.0, 0.0, 0.0, 4.0), intensity(4));
        apply_mosaic(&mut bitmap, &Rectangle::new(0.0, 0.0, 4.0, -2.0), intensity(4));
        assert_eq!(bitmap, before);
    }
}
