//! # Terminal Renderer
//!
//! Draws the calculator screen: title, pending-operation line, display,
//! error panel, keypad legend, history panel and status bar.

use anyhow::Result;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

use crate::repl::events::{Region, ViewEvent};
use crate::repl::io::RenderStream;
use crate::repl::view_models::ViewModel;

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

/// Width of the display box content
const DISPLAY_WIDTH: usize = 30;
/// Left margin of every panel
const MARGIN: u16 = 2;
/// Terminals at least this wide get the history panel beside the keypad
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 72;
/// Column of the history panel in side-by-side layout
const HISTORY_COLUMN: u16 = 44;

const ROW_TITLE: u16 = 0;
const ROW_PENDING: u16 = 2;
const ROW_DISPLAY: u16 = 3;
const ROW_ERROR: u16 = 5;
const ROW_KEYPAD: u16 = 7;

const KEYPAD: [&str; 6] = [
    "[ AC ]      [ % ]   [ ÷ ]",
    "[ 7 ] [ 8 ] [ 9 ]   [ × ]",
    "[ 4 ] [ 5 ] [ 6 ]   [ - ]",
    "[ 1 ] [ 2 ] [ 3 ]   [ + ]",
    "[ √ ] [ 0 ] [ . ]   [ = ]",
    "[        x^y         ]",
];

const KEY_HINT: &str = "q quit  Esc AC  s √  * ×  / ÷  ^ power  Enter =  H clear history";

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal (raw mode, alternate screen)
    fn initialize(&mut self) -> Result<()>;

    /// Render the whole screen
    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Render one region
    fn render_region(&mut self, view_model: &ViewModel, region: Region) -> Result<()>;

    /// Apply a batch of view events with the fewest redraws
    fn handle_view_events(&mut self, events: &[ViewEvent], view_model: &ViewModel) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;
}

/// Renderer writing to any [`RenderStream`]
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    fn side_by_side(&self) -> bool {
        self.terminal_size.0 >= SIDE_BY_SIDE_MIN_WIDTH
    }

    /// Top-left corner of the history panel
    fn history_origin(&self) -> (u16, u16) {
        if self.side_by_side() {
            (HISTORY_COLUMN, ROW_PENDING)
        } else {
            (MARGIN, ROW_KEYPAD + KEYPAD.len() as u16 + 1)
        }
    }

    fn status_row(&self) -> u16 {
        self.terminal_size.1.saturating_sub(1)
    }

    /// Clear a row from `x` onwards and print `text` there
    fn write_at(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        if y >= self.terminal_size.1 {
            return Ok(());
        }
        self.render_stream.move_cursor(x, y)?;
        self.render_stream.clear_line()?;
        queue_term!(self.render_stream, Print(text))
    }

    fn render_title(&mut self, view_model: &ViewModel) -> Result<()> {
        self.render_stream.move_cursor(MARGIN, ROW_TITLE)?;
        self.render_stream.clear_line()?;
        queue_term!(
            self.render_stream,
            SetForegroundColor(Color::Magenta),
            SetAttribute(Attribute::Bold),
            Print("CalcLine"),
            SetAttribute(Attribute::Reset),
            ResetColor,
        )?;
        let api = view_model.api_base_url();
        if !api.is_empty() {
            queue_term!(
                self.render_stream,
                SetForegroundColor(Color::DarkGrey),
                Print(format!("  Connected to API: {api}")),
                ResetColor,
            )?;
        }
        Ok(())
    }

    fn render_display(&mut self, view_model: &ViewModel) -> Result<()> {
        // Pending operation indicator, right-aligned above the display
        let pending = view_model.pending_line().unwrap_or_default();
        self.write_at(MARGIN, ROW_PENDING, &right_align(&pending, DISPLAY_WIDTH + 4))?;

        let text = view_model.display_text();
        let boxed = format!("│ {} │", right_align(text, DISPLAY_WIDTH));
        self.render_stream.move_cursor(MARGIN, ROW_DISPLAY)?;
        self.render_stream.clear_line()?;
        let color = if view_model.is_loading() {
            Color::Yellow
        } else if view_model.error_message().is_some() {
            Color::Red
        } else {
            Color::White
        };
        queue_term!(
            self.render_stream,
            SetForegroundColor(color),
            SetAttribute(Attribute::Bold),
            Print(boxed),
            SetAttribute(Attribute::Reset),
            ResetColor,
        )?;

        // Error panel
        self.render_stream.move_cursor(MARGIN, ROW_ERROR)?;
        self.render_stream.clear_line()?;
        if let Some(error) = view_model.error_message() {
            queue_term!(
                self.render_stream,
                SetForegroundColor(Color::Red),
                Print(format!("! {error}")),
                ResetColor,
            )?;
        }
        Ok(())
    }

    fn render_keypad(&mut self) -> Result<()> {
        for (i, line) in KEYPAD.iter().enumerate() {
            self.write_at(MARGIN, ROW_KEYPAD + i as u16, line)?;
        }
        Ok(())
    }

    fn render_history(&mut self, view_model: &ViewModel) -> Result<()> {
        let (x, y) = self.history_origin();
        // Header plus the maximum number of entries
        let rows = 1 + crate::config::HISTORY_LIMIT as u16;

        // Side-by-side rows share the line with the display and keypad,
        // so only clear from the panel column onwards
        for row in y..y + rows {
            if row < self.terminal_size.1 {
                self.render_stream.move_cursor(x, row)?;
                self.render_stream.clear_line()?;
            }
        }

        self.render_stream.move_cursor(x, y)?;
        queue_term!(
            self.render_stream,
            SetAttribute(Attribute::Bold),
            Print("History"),
            SetAttribute(Attribute::Reset),
        )?;

        let entries = view_model.history_entries();
        if entries.is_empty() {
            if y + 1 < self.terminal_size.1 {
                self.render_stream.move_cursor(x, y + 1)?;
                queue_term!(
                    self.render_stream,
                    SetForegroundColor(Color::DarkGrey),
                    Print("No calculations yet"),
                    ResetColor,
                )?;
            }
            return Ok(());
        }

        for (i, entry) in entries.iter().enumerate() {
            let row = y + 1 + i as u16;
            if row >= self.terminal_size.1 {
                break;
            }
            self.render_stream.move_cursor(x, row)?;
            queue_term!(self.render_stream, Print(entry))?;
        }
        Ok(())
    }

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let row = self.status_row();
        let text = match view_model.status_message() {
            Some(message) => message.to_string(),
            None => KEY_HINT.to_string(),
        };
        self.render_stream.move_cursor(0, row)?;
        self.render_stream.clear_line()?;
        queue_term!(
            self.render_stream,
            SetForegroundColor(Color::DarkGrey),
            Print(format!(" {text}")),
            ResetColor,
        )
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        self.render_stream.clear_screen()?;
        self.render_title(view_model)?;
        self.render_display(view_model)?;
        self.render_keypad()?;
        // History after keypad: in side-by-side layout it shares rows with it
        self.render_history(view_model)?;
        self.render_status_bar(view_model)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_region(&mut self, view_model: &ViewModel, region: Region) -> Result<()> {
        match region {
            Region::Display => self.render_display(view_model)?,
            Region::History => self.render_history(view_model)?,
            Region::StatusBar => self.render_status_bar(view_model)?,
        }
        self.render_stream.flush()?;
        Ok(())
    }

    fn handle_view_events(&mut self, events: &[ViewEvent], view_model: &ViewModel) -> Result<()> {
        if events.contains(&ViewEvent::FullRedrawRequired) {
            return self.render_full(view_model);
        }

        let side_by_side = self.side_by_side();
        for event in events {
            if let ViewEvent::RegionRedrawRequired { region } = event {
                self.render_region(view_model, *region)?;
                // Display rows clear to end of line, which wipes the history column
                if *region == Region::Display
                    && side_by_side
                    && !events.contains(&ViewEvent::history())
                {
                    self.render_region(view_model, Region::History)?;
                }
            }
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        Ok(())
    }
}

/// Left-pad `text` to `width` display columns
fn right_align(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - text_width), text)
}
