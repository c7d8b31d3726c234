//! # Application Control Commands
//!
//! Commands for controlling the application lifecycle such as quit/terminate operations.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{plain_char, Command, CommandContext, CommandEvent};

/// Terminate application (Ctrl+C or `q`)
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        let ctrl_c = matches!(event.code, KeyCode::Char('c'))
            && event.modifiers.contains(KeyModifiers::CONTROL);
        ctrl_c || plain_char(event) == Some('q')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

/// Empty the history panel (`H`)
pub struct ClearHistoryCommand;

impl Command for ClearHistoryCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        plain_char(event) == Some('H')
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if context.state.history_len == 0 {
            return Ok(vec![CommandEvent::NoAction]);
        }
        Ok(vec![CommandEvent::ClearHistoryRequested])
    }

    fn name(&self) -> &'static str {
        "ClearHistory"
    }
}
