use thiserror::Error;

/// Errors raised while preparing the working surface of a region transform
#[derive(Debug, Error)]
pub enum TransformError {
    /// The requested surface does not fit in the address space
    #[error("Working surface {width}x{height} is too large")]
    SurfaceTooLarge { width: u32, height: u32 },

    /// The allocator refused the working surface
    #[error("Failed to allocate {width}x{height} working surface")]
    SurfaceAllocation { width: u32, height: u32 },
}

/// Errors that can occur while turning a user-supplied file into a source bitmap
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Not an image file: {0}")]
    NotAnImage(String),

    #[error("File is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The decoder was dropped before it produced a result
    #[error("Image decoding was cancelled")]
    Cancelled,
}

/// Errors that can occur while encoding or writing the display bitmap
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There is no image to export")]
    NoSource,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors that can occur while reading or writing an operation replay log
#[derive(Debug, Error)]
pub enum ReplayLogError {
    #[error("Failed to serialize replay log: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported replay log version {0}")]
    UnsupportedVersion(u32),

    /// An operation whose rectangle could never have come from a selection
    #[error("Replay log operation {id} has an invalid region")]
    InvalidOperation { id: String },
}
