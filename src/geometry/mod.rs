mod rectangle;
pub mod viewport;

pub use rectangle::{PixelBounds, Rectangle, MIN_SELECTION_SIZE};
