//! # Mock I/O Implementations for Testing
//!
//! In-memory event and render streams. The render stream keeps a plain-text
//! copy of the screen so tests can assert on what the user would see.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Pre-programmed event source
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// One key press per character, e.g. `"10+5="`
    pub fn from_keys(keys: &str) -> Self {
        Self::new(
            keys.chars()
                .map(|ch| Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)))
                .collect(),
        )
    }
}

impl Default for MockEventStream {
    fn default() -> Self {
        Self::empty()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    ClearLine,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(String),
    Flush,
}

/// Shared state behind a [`MockRenderStream`]
#[derive(Debug)]
pub struct MockTerminalState {
    pub commands: Vec<RenderCommand>,
    pub cursor_visible: bool,
    pub raw_mode: bool,
    pub alternate_screen: bool,
    rows: Vec<Vec<char>>,
    cursor: (u16, u16),
    size: TerminalSize,
    escape: EscapeState,
}

/// Where the screen parser is inside an ANSI escape sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    Ground,
    Escape,
    Csi,
}

impl MockTerminalState {
    fn new(size: TerminalSize) -> Self {
        Self {
            commands: Vec::new(),
            cursor_visible: true,
            raw_mode: false,
            alternate_screen: false,
            rows: vec![vec![' '; size.0 as usize]; size.1 as usize],
            cursor: (0, 0),
            size,
            escape: EscapeState::Ground,
        }
    }

    fn put_text(&mut self, text: &str) {
        let (mut x, y) = (self.cursor.0 as usize, self.cursor.1 as usize);
        for ch in text.chars() {
            // Escape sequences may arrive split across several writes
            match (self.escape, ch) {
                (EscapeState::Ground, '\x1b') => self.escape = EscapeState::Escape,
                (EscapeState::Ground, '\n' | '\r') => {}
                (EscapeState::Ground, _) => {
                    if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                        *cell = ch;
                    }
                    x += 1;
                }
                (EscapeState::Escape, '[') => self.escape = EscapeState::Csi,
                (EscapeState::Escape, _) => self.escape = EscapeState::Ground,
                (EscapeState::Csi, '@'..='~') => self.escape = EscapeState::Ground,
                (EscapeState::Csi, _) => {}
            }
        }
        self.cursor.0 = x.min(u16::MAX as usize) as u16;
    }

    /// Screen contents, one string per row with trailing spaces trimmed
    pub fn screen_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    /// Whether any row contains `needle`
    pub fn screen_contains(&self, needle: &str) -> bool {
        self.screen_lines().iter().any(|line| line.contains(needle))
    }
}

/// Render stream that records commands and keeps a text screen
pub struct MockRenderStream {
    state: Arc<Mutex<MockTerminalState>>,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockTerminalState::new(size))),
        }
    }

    /// Handle that stays valid after the stream is moved into a renderer
    pub fn state_handle(&self) -> Arc<Mutex<MockTerminalState>> {
        Arc::clone(&self.state)
    }

    fn state(&self) -> MutexGuard<'_, MockTerminalState> {
        // A poisoned lock only means another test thread panicked
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, command: RenderCommand) {
        self.state().commands.push(command);
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf).to_string();
        let mut state = self.state();
        state.put_text(&text);
        state.commands.push(RenderCommand::Write(text));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut state = self.state();
        let (width, height) = state.size;
        state.rows = vec![vec![' '; width as usize]; height as usize];
        state.commands.push(RenderCommand::ClearScreen);
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        let mut state = self.state();
        let (x, y) = (state.cursor.0 as usize, state.cursor.1 as usize);
        if let Some(row) = state.rows.get_mut(y) {
            for cell in row.iter_mut().skip(x) {
                *cell = ' ';
            }
        }
        state.commands.push(RenderCommand::ClearLine);
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        let mut state = self.state();
        state.cursor = (x, y);
        state.commands.push(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        let mut state = self.state();
        state.cursor_visible = false;
        state.commands.push(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        let mut state = self.state();
        state.cursor_visible = true;
        state.commands.push(RenderCommand::ShowCursor);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.state().size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        let mut state = self.state();
        state.alternate_screen = true;
        state.commands.push(RenderCommand::EnterAlternateScreen);
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        let mut state = self.state();
        state.alternate_screen = false;
        state.commands.push(RenderCommand::LeaveAlternateScreen);
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        let mut state = self.state();
        state.raw_mode = true;
        state.commands.push(RenderCommand::EnableRawMode);
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        let mut state = self.state();
        state.raw_mode = false;
        state.commands.push(RenderCommand::DisableRawMode);
        Ok(())
    }
}
