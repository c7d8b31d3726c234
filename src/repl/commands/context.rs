//! # Command Context
//!
//! Read-only view of calculator state handed to commands.

use crate::repl::view_models::ViewModel;

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModelSnapshot {
    pub is_loading: bool,
    pub has_pending_operation: bool,
    pub has_error: bool,
    pub history_len: usize,
}

impl ViewModelSnapshot {
    /// Create snapshot from current ViewModel state
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            is_loading: view_model.is_loading(),
            has_pending_operation: view_model.model().pending().is_some(),
            has_error: view_model.error_message().is_some(),
            history_len: view_model.model().history().len(),
        }
    }
}

impl Default for ViewModelSnapshot {
    fn default() -> Self {
        Self {
            is_loading: false,
            has_pending_operation: false,
            has_error: false,
            history_len: 0,
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }
}
