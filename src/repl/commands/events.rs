//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the ViewModel.
//! This maintains proper separation of concerns - commands suggest, controller decides.

use crate::repl::models::Operation;

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Append or replace with a digit
    DigitRequested { digit: char },

    /// Add a decimal point
    DecimalRequested,

    /// Operator key (binary operators and square root)
    OperationRequested { operation: Operation },

    /// Evaluate the pending operation
    EqualsRequested,

    /// AC
    ClearRequested,

    /// Empty the history panel
    ClearHistoryRequested,

    /// Request to quit application
    QuitRequested,

    /// No action needed
    NoAction,
}

impl CommandEvent {
    pub fn digit(digit: char) -> Self {
        CommandEvent::DigitRequested { digit }
    }

    pub fn operation(operation: Operation) -> Self {
        CommandEvent::OperationRequested { operation }
    }
}
