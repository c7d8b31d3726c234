//! # Entry Commands
//!
//! Digit, decimal point and AC keys.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{plain_char, Command, CommandContext, CommandEvent};

/// Digit keys `0`-`9`
pub struct DigitCommand;

impl Command for DigitCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(plain_char(event), Some(ch) if ch.is_ascii_digit())
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match plain_char(&event) {
            Some(ch) => Ok(vec![CommandEvent::digit(ch)]),
            None => Ok(vec![CommandEvent::NoAction]),
        }
    }

    fn name(&self) -> &'static str {
        "Digit"
    }
}

/// Decimal point key `.` (`,` accepted for keypads that send it)
pub struct DecimalCommand;

impl Command for DecimalCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(plain_char(event), Some('.') | Some(','))
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::DecimalRequested])
    }

    fn name(&self) -> &'static str {
        "Decimal"
    }
}

/// AC (Esc, Delete or `c`)
pub struct ClearCommand;

impl Command for ClearCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Esc | KeyCode::Delete)
            || matches!(plain_char(event), Some('c') | Some('C'))
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ClearRequested])
    }

    fn name(&self) -> &'static str {
        "Clear"
    }
}
