//! # Operation Commands
//!
//! Operator keys and equals.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{plain_char, Command, CommandContext, CommandEvent};
use crate::repl::models::Operation;

/// Map a key character to the operation it stands for
fn operation_for_char(ch: char) -> Option<Operation> {
    match ch {
        '+' => Some(Operation::Add),
        '-' => Some(Operation::Subtract),
        '*' | 'x' | 'X' => Some(Operation::Multiply),
        '/' => Some(Operation::Divide),
        '^' => Some(Operation::Power),
        '%' => Some(Operation::Percentage),
        's' | 'r' => Some(Operation::Sqrt),
        _ => None,
    }
}

/// Operator keys: `+ - * x / ^ %` and `s`/`r` for square root
pub struct OperatorCommand;

impl Command for OperatorCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        plain_char(event).and_then(operation_for_char).is_some()
    }

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let Some(operation) = plain_char(&event).and_then(operation_for_char) else {
            return Ok(vec![CommandEvent::NoAction]);
        };

        if context.state.is_loading {
            tracing::debug!("Ignoring {} while a calculation is in flight", operation);
            return Ok(vec![CommandEvent::NoAction]);
        }
        if context.state.has_error {
            tracing::debug!("Ignoring {} on the error token", operation);
            return Ok(vec![CommandEvent::NoAction]);
        }

        Ok(vec![CommandEvent::operation(operation)])
    }

    fn name(&self) -> &'static str {
        "Operator"
    }
}

/// Equals (`=` or Enter)
pub struct EqualsCommand;

impl Command for EqualsCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Enter) || plain_char(event) == Some('=')
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if !context.state.has_pending_operation || context.state.is_loading {
            return Ok(vec![CommandEvent::NoAction]);
        }
        Ok(vec![CommandEvent::EqualsRequested])
    }

    fn name(&self) -> &'static str {
        "Equals"
    }
}
