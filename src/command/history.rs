use serde::{Deserialize, Serialize};

use super::Operation;
use crate::error::ReplayLogError;
use crate::geometry::MIN_SELECTION_SIZE;

const REPLAY_LOG_VERSION: u32 = 1;

/// Linear undo/redo over an ordered log of operations.
///
/// Only the prefix up to the cursor is active. Entries after it stay around
/// for redo until the next append truncates them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationHistory {
    operations: Vec<Operation>,
    /// Number of active operations, i.e. `cursor + 1`
    applied: usize,
}

#[derive(Serialize, Deserialize)]
struct ReplayLog {
    version: u32,
    operations: Vec<Operation>,
}

impl OperationHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any redo entries, then push `op` and make it the active head
    pub fn append(&mut self, op: Operation) {
        self.operations.truncate(self.applied);
        self.operations.push(op);
        self.applied = self.operations.len();
    }

    /// Step the cursor back. Returns false when already at the start.
    pub fn undo(&mut self) -> bool {
        if self.applied == 0 {
            return false;
        }
        self.applied -= 1;
        true
    }

    /// Step the cursor forward. Returns false when nothing is left to redo.
    pub fn redo(&mut self) -> bool {
        if self.applied == self.operations.len() {
            return false;
        }
        self.applied += 1;
        true
    }

    /// Clear the whole log
    pub fn reset(&mut self) {
        self.operations.clear();
        self.applied = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.operations.len()
    }

    /// Index of the last active operation, `None` when nothing is active
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Every operation, including the ones available for redo
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The operations that are rendered
    pub fn active(&self) -> &[Operation] {
        &self.operations[..self.applied]
    }

    /// The operations available for redo
    pub fn future(&self) -> &[Operation] {
        &self.operations[self.applied..]
    }

    /// Serialize the active prefix as JSON
    pub fn to_replay_log(&self) -> Result<String, ReplayLogError> {
        let log = ReplayLog {
            version: REPLAY_LOG_VERSION,
            operations: self.active().to_vec(),
        };
        Ok(serde_json::to_string_pretty(&log)?)
    }

    /// Rebuild a history from a replay log, with every operation active.
    ///
    /// Each rectangle must pass the same size gate as a live selection.
    pub fn from_replay_log(json: &str) -> Result<Self, ReplayLogError> {
        let log: ReplayLog = serde_json::from_str(json)?;
        if log.version != REPLAY_LOG_VERSION {
            return Err(ReplayLogError::UnsupportedVersion(log.version));
        }
        if let Some(op) = log.operations.iter().find(|op| !op.rect().exceeds(MIN_SELECTION_SIZE)) {
            return Err(ReplayLogError::InvalidOperation { id: op.id().to_owned() });
        }
        let applied = log.operations.len();
        Ok(Self {
            operations: log.operations,
            applied,
        })
    }
}
