//! Undo stack of previous game states.
//!
//! States are never mutated once they're installed in a session, so the
//! stack just keeps shared handles to earlier values instead of deep
//! copies.

use std::sync::Arc;

use super::errors::{GameError, GameResult};
use super::state_machine::GameState;

#[derive(Debug, Default)]
pub struct History {
    snapshots: Vec<Arc<GameState>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers a state so it can be restored later.
    pub fn snapshot(&mut self, state: Arc<GameState>) {
        self.snapshots.push(state);
    }

    /// Pops the most recent state. Restoring it doesn't record anything,
    /// so consecutive undos walk further back.
    pub fn undo(&mut self) -> GameResult<Arc<GameState>> {
        self.snapshots.pop().ok_or(GameError::EmptyHistory)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
