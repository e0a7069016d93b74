mod commands;
mod history;
mod operation;

use thiserror::Error;

pub use commands::Command;
pub use history::OperationHistory;
pub use operation::{Intensity, InvalidIntensity, Operation, ToolKind};

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// Nothing can be edited until a source bitmap has been decoded
    #[error("No source image is loaded")]
    NoSource,

    /// The gesture was too small to count as a selection
    #[error("Selection {width}x{height} is not larger than {min_size}px")]
    SelectionTooSmall { width: f32, height: f32, min_size: f32 },

    /// A replayed operation failed the selection size gate
    #[error("Operation {id} has an invalid region")]
    InvalidOperation { id: String },
}
