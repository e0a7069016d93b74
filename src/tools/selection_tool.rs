use egui::Pos2;
use log::{debug, info};

use crate::command::Command;
use crate::geometry::Rectangle;
use crate::state::EditorStore;
use crate::tools::Tool;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging {
        start: Pos2,
        current: Pos2,
    },
}

/// Rubber-band selection. A release commits the normalized rectangle if it is
/// large enough, smaller drags are discarded as accidental clicks.
#[derive(Debug, Clone, Default)]
pub struct RectSelectTool {
    state: SelectionState,
}

impl RectSelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    /// The rectangle currently being dragged out, normalized
    pub fn live_rect(&self) -> Option<Rectangle> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging { start, current } => Some(Rectangle::from_corners(start, current)),
        }
    }

    /// Finish the gesture at `pos` and return the rectangle if it passes the
    /// size gate
    pub fn finish(&mut self, pos: Pos2, min_size: f32) -> Option<Rectangle> {
        let SelectionState::Dragging { start, .. } = std::mem::take(&mut self.state) else {
            return None;
        };

        let rect = Rectangle::from_corners(start, pos);
        if rect.exceeds(min_size) {
            Some(rect)
        } else {
            debug!("Discarding {}x{} selection", rect.width, rect.height);
            None
        }
    }
}

impl Tool for RectSelectTool {
    fn on_pointer_down(&mut self, pos: Pos2, store: &EditorStore) -> Option<Command> {
        if store.source().is_none() {
            return None;
        }
        self.state = SelectionState::Dragging { start: pos, current: pos };
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, _store: &EditorStore) -> Option<Command> {
        if let SelectionState::Dragging { current, .. } = &mut self.state {
            *current = pos;
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, store: &EditorStore) -> Option<Command> {
        let rect = self.finish(pos, store.config().min_selection_size)?;
        info!(
            "Committing {} selection at ({}, {}) {}x{}",
            store.tool().label(),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        Some(Command::CommitSelection(rect))
    }

    fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }
}
