use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::error::ExportError;

/// Encoding used when exporting the display bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Lossy, quality 1-100. Alpha is dropped.
    Jpeg { quality: u8 },
    Png,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Jpeg { quality: 90 }
    }
}

/// Encode a bitmap into an in-memory file
pub fn encode(bitmap: &Bitmap, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        ExportFormat::Jpeg { quality } => {
            let rgb = DynamicImage::ImageRgba8(bitmap.as_rgba_image().clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
            encoder.encode(&rgb, bitmap.width(), bitmap.height(), ExtendedColorType::Rgb8)?;
        }
        ExportFormat::Png => {
            bitmap.as_rgba_image().write_to(&mut buffer, ImageFormat::Png)?;
        }
    }
    Ok(buffer.into_inner())
}

/// Where the export goes: next to the source file if we know it, else the
/// working directory
pub fn destination(source_path: Option<&Path>, file_name: &str) -> PathBuf {
    source_path
        .and_then(Path::parent)
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// Encode and write in one go
pub fn export_to(bitmap: &Bitmap, format: ExportFormat, path: &Path) -> Result<usize, ExportError> {
    let bytes = encode(bitmap, format)?;
    std::fs::write(path, &bytes)?;
    log::info!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}
