use egui::{Pos2, Rect, Vec2};

/// Largest rect with the bitmap's aspect ratio that fits inside `available`,
/// centered. Never scales the image up past 1:1.
pub fn fit_rect(available: Rect, source_size: [u32; 2]) -> Rect {
    let [width, height] = source_size;
    if width == 0 || height == 0 || available.width() <= 0.0 || available.height() <= 0.0 {
        return Rect::from_center_size(available.center(), Vec2::ZERO);
    }

    let scale = (available.width() / width as f32)
        .min(available.height() / height as f32)
        .min(1.0);
    let size = Vec2::new(width as f32 * scale, height as f32 * scale);
    Rect::from_center_size(available.center(), size)
}

/// Source pixels per screen point for a bitmap displayed in `canvas`
pub fn source_per_point(canvas: Rect, source_size: [u32; 2]) -> f32 {
    if canvas.width() <= 0.0 {
        return 1.0;
    }
    source_size[0] as f32 / canvas.width()
}

/// Map a screen position over `canvas` into source-bitmap coordinates
pub fn screen_to_source(pos: Pos2, canvas: Rect, source_size: [u32; 2]) -> Pos2 {
    if canvas.width() <= 0.0 || canvas.height() <= 0.0 {
        return Pos2::ZERO;
    }
    let scale_x = source_size[0] as f32 / canvas.width();
    let scale_y = source_size[1] as f32 / canvas.height();
    Pos2::new(
        (pos.x - canvas.min.x) * scale_x,
        (pos.y - canvas.min.y) * scale_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_keeps_aspect_ratio() {
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 400.0));
        let rect = fit_rect(available, [800, 400]);
        assert!((rect.width() - 400.0).abs() < 0.001);
        assert!((rect.height() - 200.0).abs() < 0.001);
        assert!((rect.center().y - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_rect_never_upscales() {
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 1000.0));
        let rect = fit_rect(available, [100, 50]);
        assert_eq!(rect.size(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_screen_to_source_scales() {
        let canvas = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(200.0, 100.0));
        let pos = screen_to_source(Pos2::new(110.0, 70.0), canvas, [400, 200]);
        assert_eq!(pos, Pos2::new(200.0, 100.0));
        assert!((source_per_point(canvas, [400, 200]) - 2.0).abs() < 0.001);
    }
}
