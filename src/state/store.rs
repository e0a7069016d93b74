use super::EditorConfig;
use crate::bitmap::Bitmap;
use crate::command::{Command, CommandResult, Intensity, OperationHistory, ToolKind};

/// The single state container of the editor.
///
/// Fields are only written by [`Command::execute`]; everything else reads
/// through the accessors. `version` increases whenever something that affects
/// the rendered image changes (source or history cursor), so observers can
/// tell when to re-render without diffing.
#[derive(Debug)]
pub struct EditorStore {
    pub(crate) config: EditorConfig,
    pub(crate) source: Option<Bitmap>,
    pub(crate) history: OperationHistory,
    pub(crate) tool: ToolKind,
    pub(crate) intensity: Intensity,
    version: u64,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorStore {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            tool: config.default_tool,
            intensity: config.default_intensity,
            config,
            source: None,
            history: OperationHistory::new(),
            version: 0,
        }
    }

    /// Execute a command against this store
    pub fn dispatch(&mut self, command: Command) -> CommandResult {
        let name = command.name();
        let result = command.execute(self);
        if let Err(err) = &result {
            log::debug!("{} rejected: {}", name, err);
        }
        result
    }

    pub(crate) fn mark_modified(&mut self) {
        self.version += 1;
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The pristine source bitmap, if one has been loaded
    pub fn source(&self) -> Option<&Bitmap> {
        self.source.as_ref()
    }

    pub fn history(&self) -> &OperationHistory {
        &self.history
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
