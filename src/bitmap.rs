use egui::ColorImage;
use image::{Rgba, RgbaImage};

/// An owned RGBA8 pixel grid.
///
/// Bitmaps are plain values: the pristine source is never mutated, and every
/// render works on a fresh clone.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: RgbaImage,
}

// Custom Debug implementation so test failures don't dump megabytes of pixels
impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("data_len", &self.pixels.as_raw().len())
            .finish()
    }
}

impl Bitmap {
    /// Create a fully transparent bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Create a bitmap where every pixel has the same RGBA value
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(rgba)),
        }
    }

    /// Create a bitmap from tightly packed RGBA bytes.
    ///
    /// Returns `None` when `data` is not exactly `width * height * 4` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, data).map(Self::from)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Read one pixel. Panics when out of bounds, like `image::ImageBuffer`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        self.pixels.put_pixel(x, y, Rgba(rgba));
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn as_rgba_image_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// True when every pixel in the bitmap has the same value
    pub fn is_uniform(&self) -> bool {
        let mut pixels = self.pixels.pixels();
        match pixels.next() {
            Some(first) => pixels.all(|p| p == first),
            None => true,
        }
    }

    /// Convert to an egui image for uploading as a texture
    pub fn to_color_image(&self) -> ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, self.pixels.as_raw())
    }
}

impl From<RgbaImage> for Bitmap {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}

impl From<Bitmap> for RgbaImage {
    fn from(bitmap: Bitmap) -> Self {
        bitmap.pixels
    }
}
