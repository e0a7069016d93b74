use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;
use futures::channel::oneshot;

use crate::bitmap::Bitmap;
use crate::error::LoadError;
use crate::util::time::Stopwatch;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff"];

/// A file the user handed us, not yet decoded
#[derive(Clone)]
pub struct SourceFile {
    pub name: String,
    pub path: Option<PathBuf>,
    pub bytes: Arc<[u8]>,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(mime: &str, name: &str) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Decode raw file bytes into a pristine source bitmap
pub fn decode_source(bytes: &[u8], max_bytes: usize) -> Result<Bitmap, LoadError> {
    if bytes.len() > max_bytes {
        return Err(LoadError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    let watch = Stopwatch::start();
    let image = image::load_from_memory(bytes)?;
    log::debug!(
        "Decoded image: {}x{} in {:.1}ms",
        image.width(),
        image.height(),
        watch.elapsed_ms()
    );
    Ok(Bitmap::from(image.to_rgba8()))
}

/// A decode running off the UI thread. Nothing can be edited until it resolves.
pub struct PendingDecode {
    name: String,
    receiver: oneshot::Receiver<Result<Bitmap, LoadError>>,
}

impl PendingDecode {
    /// Start decoding `file`. Runs on a worker thread natively and inline on the web.
    pub fn spawn(file: SourceFile, max_bytes: usize) -> Self {
        let (sender, receiver) = oneshot::channel();
        let name = file.name.clone();
        let job = move || {
            // The receiver may already be gone if the user picked another file
            let _ = sender.send(decode_source(&file.bytes, max_bytes));
        };

        #[cfg(not(target_arch = "wasm32"))]
        if let Err(err) = std::thread::Builder::new().name("decode".to_owned()).spawn(job) {
            log::error!("Failed to start decoder thread: {}", err);
        }

        #[cfg(target_arch = "wasm32")]
        job();

        Self { name, receiver }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-blocking check, `None` while decoding is still running
    pub fn poll(&mut self) -> Option<Result<Bitmap, LoadError>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(LoadError::Cancelled)),
        }
    }

    /// Block until the decode finishes
    pub fn wait(self) -> Result<Bitmap, LoadError> {
        futures::executor::block_on(self.receiver).unwrap_or(Err(LoadError::Cancelled))
    }
}

/// Turns drag-and-drop events and typed paths into validated source files
pub struct FileHandler {
    max_bytes: usize,
}

impl FileHandler {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Take the first file dropped this frame, if any
    pub fn take_dropped_file(&self, ctx: &egui::Context) -> Option<Result<SourceFile, LoadError>> {
        let file = ctx.input(|i| i.raw.dropped_files.first().cloned())?;
        Some(self.accept_dropped(&file))
    }

    fn accept_dropped(&self, file: &egui::DroppedFile) -> Result<SourceFile, LoadError> {
        let name = if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        };

        if !is_image_file(&file.mime, &name) {
            log::warn!("Dropped file is not a supported type: {}", name);
            return Err(LoadError::NotAnImage(name));
        }

        if let Some(bytes) = &file.bytes {
            log::info!("Processing image from memory: {} ({} bytes)", name, bytes.len());
            self.check_size(bytes.len())?;
            return Ok(SourceFile {
                name,
                path: file.path.clone(),
                bytes: bytes.clone(),
            });
        }

        match &file.path {
            Some(path) => self.read_path(path),
            None => {
                log::warn!("Dropped file has no accessible data: {}", name);
                Err(LoadError::NotAnImage(name))
            }
        }
    }

    /// Read a file from disk after checking its type and size
    pub fn read_path(&self, path: &Path) -> Result<SourceFile, LoadError> {
        let name = path.display().to_string();
        if !is_image_file("", &name) {
            return Err(LoadError::NotAnImage(name));
        }

        let size = std::fs::metadata(path)?.len();
        self.check_size(usize::try_from(size).unwrap_or(usize::MAX))?;

        log::info!("Processing image from path: {}", name);
        let bytes = std::fs::read(path)?;
        Ok(SourceFile {
            name,
            path: Some(path.to_path_buf()),
            bytes: bytes.into(),
        })
    }

    fn check_size(&self, size: usize) -> Result<(), LoadError> {
        if size > self.max_bytes {
            return Err(LoadError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    /// Dim the window and list the files while they are dragged over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop image to redact:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else if !file.mime.is_empty() {
                    text += &format!("\n{}", file.mime);
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{self, ExportFormat};

    fn png_bytes() -> Vec<u8> {
        export::encode(&Bitmap::filled(6, 4, [9, 8, 7, 255]), ExportFormat::Png).unwrap()
    }

    #[test]
    fn test_image_detection() {
        assert!(is_image_file("image/png", "whatever.bin"));
        assert!(!is_image_file("text/plain", "photo.png"));
        assert!(is_image_file("", "Photo.JPG"));
        assert!(!is_image_file("", "notes.txt"));
        assert!(!is_image_file("", "no_extension"));
    }

    #[test]
    fn test_decode_rejects_oversized() {
        let bytes = png_bytes();
        let result = decode_source(&bytes, bytes.len() - 1);
        assert!(matches!(result, Err(LoadError::TooLarge { .. })));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_source(b"definitely not an image", 1024);
        assert!(matches!(result, Err(LoadError::Decode(_))));
    }

    #[test]
    fn test_pending_decode_resolves() {
        let file = SourceFile {
            name: "tiny.png".to_owned(),
            path: None,
            bytes: png_bytes().into(),
        };
        let pending = PendingDecode::spawn(file, 1024 * 1024);
        assert_eq!(pending.name(), "tiny.png");

        let bitmap = pending.wait().unwrap();
        assert_eq!(bitmap.dimensions(), (6, 4));
        assert_eq!(bitmap.pixel(0, 0), [9, 8, 7, 255]);
    }

    #[test]
    fn test_read_path_rejects_non_image_before_reading() {
        let handler = FileHandler::new(1024);
        let result = handler.read_path(Path::new("/definitely/missing/notes.txt"));
        assert!(matches!(result, Err(LoadError::NotAnImage(_))));
    }
}
