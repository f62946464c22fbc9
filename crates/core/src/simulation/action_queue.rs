//! Player actions and the action log
//!
//! The session only changes in response to these actions, so a log of them
//! is enough to rebuild any session deterministically.

use crate::core_types::Liquid;
use serde::{Deserialize, Serialize};

/// Player input accepted by a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Choose which liquid toggles place
    SelectLiquid(Liquid),
    /// Place the selected liquid on a dry cell, or take back a cell holding it
    Toggle { row: usize, col: usize },
    /// Run the simulation and check the win condition
    Submit,
    /// Clear all liquid and restore the level's supply
    Reset,
    /// Move on after a completed level
    AdvanceLevel,
}

impl PlayerAction {
    /// Toggle in the entry row
    pub fn toggle(col: usize) -> Self {
        PlayerAction::Toggle { row: 0, col }
    }
}

/// Action applied to a specific level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Level number the action was applied to
    pub level: u32,
    pub action: PlayerAction,
}

/// Bounded history of applied actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLog {
    history: Vec<LoggedAction>,
    /// Maximum history size (oldest actions are removed)
    max_history: usize,
    /// Whether any action has been trimmed off the front
    trimmed: bool,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(10000)
    }
}

impl ActionLog {
    /// Create a new log with specified history limit
    pub fn new(max_history: usize) -> Self {
        Self {
            history: Vec::with_capacity(max_history.min(256)),
            max_history,
            trimmed: false,
        }
    }

    /// Append an applied action
    pub fn record(&mut self, level: u32, action: PlayerAction) {
        self.history.push(LoggedAction { level, action });

        // Trim history if too large
        if self.history.len() > self.max_history {
            self.history.remove(0);
            self.trimmed = true;
        }
    }

    /// Full action history, oldest first
    pub fn history(&self) -> &[LoggedAction] {
        &self.history
    }

    /// Actions applied to `level` since its last reset
    ///
    /// Replaying these on a freshly loaded `level` rebuilds its current state.
    /// Returns `None` when trimming has dropped the start of that run.
    pub fn since_reset(&self, level: u32) -> Option<Vec<PlayerAction>> {
        let start = match self.history.iter().rposition(|logged| {
            logged.level != level || logged.action == PlayerAction::Reset
        }) {
            Some(idx) => idx + 1,
            None if self.trimmed => return None,
            None => 0,
        };

        Some(
            self.history[start..]
                .iter()
                .map(|logged| logged.action)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.history.clear();
        self.trimmed = false;
    }
}
