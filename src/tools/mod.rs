use egui::Pos2;

use crate::command::Command;
use crate::state::EditorStore;

/// Pointer-driven canvas tools.
///
/// Positions are in source-bitmap coordinates. A tool returns a [`Command`]
/// when the gesture should change the store, and `None` otherwise.
pub trait Tool {
    /// Handle pointer press on the canvas
    fn on_pointer_down(&mut self, pos: Pos2, store: &EditorStore) -> Option<Command>;

    /// Handle pointer movement while the button is held
    fn on_pointer_move(&mut self, pos: Pos2, store: &EditorStore) -> Option<Command>;

    /// Handle pointer release; this is where gestures get committed
    fn on_pointer_up(&mut self, pos: Pos2, store: &EditorStore) -> Option<Command>;

    /// Abandon whatever is in progress without producing a command
    fn cancel(&mut self);
}

mod selection_tool;
pub use selection_tool::{RectSelectTool, SelectionState};
