use egui::{Context, TextureHandle, TextureId, TextureOptions};
use thiserror::Error;

use crate::bitmap::Bitmap;
use crate::renderer::LiveSelection;

/// Errors that can occur while uploading the display bitmap
#[derive(Error, Debug, PartialEq)]
pub enum TextureGenerationError {
    #[error("Invalid texture dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),
}

/// Everything the display bitmap depends on.
///
/// If the key hasn't changed since the last upload, neither has the bitmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderKey {
    /// Store version, bumped on every source or history change
    pub version: u64,
    pub live: Option<LiveSelection>,
}

/// Owns the GPU texture showing the rendered bitmap and re-uploads it only
/// when the render key changes
#[derive(Default)]
pub struct TextureManager {
    handle: Option<TextureHandle>,
    key: Option<RenderKey>,
    uploads: u64,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_current(&self, key: &RenderKey) -> bool {
        self.handle.is_some() && self.key.as_ref() == Some(key)
    }

    /// Returns the texture for `key`, running `generator` and uploading only on a miss
    pub fn get_or_update<F>(
        &mut self,
        key: RenderKey,
        ctx: &Context,
        generator: F,
    ) -> Result<TextureId, TextureGenerationError>
    where
        F: FnOnce() -> Bitmap,
    {
        if self.is_current(&key) {
            if let Some(handle) = &self.handle {
                return Ok(handle.id());
            }
        }

        let bitmap = generator();
        let (width, height) = bitmap.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureGenerationError::InvalidDimensions(width, height));
        }
        let image = bitmap.to_color_image();

        let id = match &mut self.handle {
            Some(handle) => {
                handle.set(image, TextureOptions::LINEAR);
                handle.id()
            }
            None => {
                let handle = ctx.load_texture("redact_display", image, TextureOptions::LINEAR);
                let id = handle.id();
                self.handle = Some(handle);
                id
            }
        };

        self.key = Some(key);
        self.uploads += 1;
        log::trace!("Uploaded display texture v{} ({}x{})", key.version, width, height);
        Ok(id)
    }

    /// Drop the texture entirely, e.g. when the source is unloaded
    pub fn clear(&mut self) {
        self.handle = None;
        self.key = None;
    }

    /// Number of uploads so far
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    pub fn size(&self) -> Option<[usize; 2]> {
        self.handle.as_ref().map(TextureHandle::size)
    }
}
