use super::{CommandError, CommandResult, Operation, OperationHistory};
use crate::bitmap::Bitmap;
use crate::command::{Intensity, ToolKind};
use crate::geometry::Rectangle;
use crate::state::EditorStore;

/// Everything that can change the editor state. The store is only ever
/// mutated by executing one of these.
#[derive(Debug, Clone)]
pub enum Command {
    /// Install a freshly decoded pristine source. Wipes the history.
    LoadSource(Bitmap),

    /// Drop the current source and its history
    UnloadSource,

    /// Change the transform used by future operations
    SetTool(ToolKind),

    /// Change the intensity used by future operations
    SetIntensity(Intensity),

    /// Turn a committed drag gesture into an operation
    CommitSelection(Rectangle),

    Undo,

    Redo,

    /// Remove every operation
    ClearEdits,

    /// Swap in a history rebuilt from a replay log
    Replay(OperationHistory),
}

impl Command {
    /// Short human readable name, used for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadSource(_) => "LoadSource",
            Command::UnloadSource => "UnloadSource",
            Command::SetTool(_) => "SetTool",
            Command::SetIntensity(_) => "SetIntensity",
            Command::CommitSelection(_) => "CommitSelection",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::ClearEdits => "ClearEdits",
            Command::Replay(_) => "Replay",
        }
    }

    /// Execute the command against the store
    pub fn execute(self, store: &mut EditorStore) -> CommandResult {
        match self {
            Command::LoadSource(bitmap) => {
                log::info!("Loaded source {}x{}", bitmap.width(), bitmap.height());
                store.source = Some(bitmap);
                store.history.reset();
                store.mark_modified();
                Ok(())
            }

            Command::UnloadSource => {
                store.source = None;
                store.history.reset();
                store.mark_modified();
                Ok(())
            }

            Command::SetTool(kind) => {
                store.tool = kind;
                Ok(())
            }

            Command::SetIntensity(intensity) => {
                store.intensity = intensity;
                Ok(())
            }

            Command::CommitSelection(rect) => {
                if store.source.is_none() {
                    return Err(CommandError::NoSource);
                }
                let min_size = store.config.min_selection_size;
                if !rect.exceeds(min_size) {
                    return Err(CommandError::SelectionTooSmall {
                        width: rect.width,
                        height: rect.height,
                        min_size,
                    });
                }

                let op = Operation::new(store.tool, rect, store.intensity);
                log::debug!(
                    "Appending {} op {} at {:?} (intensity {})",
                    op.kind().label(),
                    op.id(),
                    op.rect(),
                    op.intensity().get()
                );
                store.history.append(op);
                store.mark_modified();
                Ok(())
            }

            Command::Undo => {
                if store.history.undo() {
                    store.mark_modified();
                }
                Ok(())
            }

            Command::Redo => {
                if store.history.redo() {
                    store.mark_modified();
                }
                Ok(())
            }

            Command::ClearEdits => {
                if !store.history.is_empty() {
                    store.history.reset();
                    store.mark_modified();
                }
                Ok(())
            }

            Command::Replay(history) => {
                if store.source.is_none() {
                    return Err(CommandError::NoSource);
                }
                let min_size = store.config.min_selection_size;
                if let Some(op) = history.operations().iter().find(|op| !op.rect().exceeds(min_size)) {
                    return Err(CommandError::InvalidOperation { id: op.id().to_owned() });
                }
                store.history = history;
                store.mark_modified();
                Ok(())
            }
        }
    }
}
