use eframe_redact::command::Intensity;
use eframe_redact::geometry::Rectangle;
use eframe_redact::transform::{apply_blur, apply_mosaic};
use eframe_redact::Bitmap;

fn checkerboard(width: u32, height: u32) -> Bitmap {
    let mut bitmap = Bitmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let value = if (x + y) % 2 == 0 { 0 } else { 255 };
            bitmap.put_pixel(x, y, [value, value, value, 255]);
        }
    }
    bitmap
}

#[test]
fn test_mosaic_on_uniform_region_is_noop() {
    let source = Bitmap::filled(60, 60, [37, 142, 201, 255]);
    let rect = Rectangle::new(3.0, 7.0, 51.0, 40.0);

    for value in Intensity::MIN..=Intensity::MAX {
        let mut bitmap = source.clone();
        apply_mosaic(&mut bitmap, &rect, Intensity::new(value).unwrap());
        assert_eq!(bitmap, source, "intensity {} changed a uniform region", value);
    }
}

#[test]
fn test_mosaic_block_is_floor_average() {
    let mut bitmap = Bitmap::new(4, 4);
    let mut sums = [0u32; 3];
    for y in 0..4 {
        for x in 0..4 {
            let px = [(x * 50 + y) as u8, (y * 60 + 1) as u8, (x * y * 9) as u8, 200];
            bitmap.put_pixel(x, y, px);
            for c in 0..3 {
                sums[c] += u32::from(px[c]);
            }
        }
    }
    let expected = [(sums[0] / 16) as u8, (sums[1] / 16) as u8, (sums[2] / 16) as u8, 200];

    apply_mosaic(&mut bitmap, &Rectangle::new(0.0, 0.0, 4.0, 4.0), Intensity::new(4).unwrap());

    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(bitmap.pixel(x, y), expected);
        }
    }
}

#[test]
fn test_blur_stays_inside_rect() {
    let source = checkerboard(24, 24);
    let mut bitmap = source.clone();
    let rect = Rectangle::new(5.0, 5.0, 10.0, 10.0);

    apply_blur(&mut bitmap, &rect, Intensity::new(10).unwrap());

    for y in 0..24 {
        for x in 0..24 {
            let inside = (5..15).contains(&x) && (5..15).contains(&y);
            if !inside {
                assert_eq!(bitmap.pixel(x, y), source.pixel(x, y), "pixel ({}, {}) changed", x, y);
            }
        }
    }

    let center = bitmap.pixel(10, 10);
    assert_ne!(center, source.pixel(10, 10));
    assert!(center[0] > 0 && center[0] < 255);
    assert_eq!(center[3], 255);
}

#[test]
fn test_transforms_ignore_degenerate_rects() {
    let source = checkerboard(16, 16);
    let mut bitmap = source.clone();

    apply_mosaic(&mut bitmap, &Rectangle::new(2.0, 2.0, 0.0, 8.0), Intensity::new(5).unwrap());
    apply_blur(&mut bitmap, &Rectangle::new(2.0, 2.0, 8.0, 0.0), Intensity::new(5).unwrap());
    apply_blur(&mut bitmap, &Rectangle::new(40.0, 40.0, 8.0, 8.0), Intensity::new(5).unwrap());

    assert_eq!(bitmap, source);
}
