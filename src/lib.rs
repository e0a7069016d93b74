#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod bitmap;
pub mod command;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod texture_manager;
pub mod tools;
pub mod transform;
mod util;

pub use app::RedactApp;
pub use bitmap::Bitmap;
pub use command::{Command, Intensity, Operation, OperationHistory, ToolKind};
pub use error::{ExportError, LoadError, ReplayLogError, TransformError};
pub use geometry::Rectangle;
pub use renderer::{LiveSelection, Renderer};
pub use state::{EditorConfig, EditorStore};
pub use tools::{RectSelectTool, Tool};
