//! # Command System
//!
//! Maps key events to [`CommandEvent`]s. Each [`Command`] decides whether a
//! key is relevant to it; the [`CommandRegistry`] runs the first match.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub mod app;
pub mod context;
pub mod entry;
pub mod events;
pub mod operations;

pub use app::{AppTerminateCommand, ClearHistoryCommand};
pub use context::{CommandContext, ViewModelSnapshot};
pub use entry::{ClearCommand, DecimalCommand, DigitCommand};
pub use events::CommandEvent;
pub use operations::{EqualsCommand, OperatorCommand};

/// A key handler
pub trait Command: Send + Sync {
    /// Check if this command should handle the given key event
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events describing what the key should do
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging and logging
    fn name(&self) -> &'static str;
}

/// Character of a key press without Ctrl/Alt. Shift is allowed since
/// symbols like `+` and `^` need it on most layouts.
pub(crate) fn plain_char(event: &KeyEvent) -> Option<char> {
    match event.code {
        KeyCode::Char(ch)
            if !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}

/// Registry that holds all commands in priority order
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create a new registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Quit first so Ctrl+C always wins
        self.add_command(Box::new(AppTerminateCommand));
        self.add_command(Box::new(DigitCommand));
        self.add_command(Box::new(DecimalCommand));
        self.add_command(Box::new(OperatorCommand));
        self.add_command(Box::new(EqualsCommand));
        self.add_command(Box::new(ClearCommand));
        self.add_command(Box::new(ClearHistoryCommand));
    }

    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Process a key event through the first relevant command
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        if event.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }

        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("Found relevant command: {} for key {:?}", command.name(), event);
                return command.execute(event, context);
            }
        }

        tracing::debug!("No relevant command found for key {:?}", event);
        Ok(vec![])
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
