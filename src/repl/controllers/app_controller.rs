//! # Application Controller
//!
//! Owns the event loop: reads keys, turns them into command events, applies
//! those to the view model, picks up finished calculations and redraws.

use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use std::io::Stdout;
use std::time::Duration;

use crate::config::ClientSettings;
use crate::repl::{
    commands::{CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot},
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    view_models::ViewModel,
    views::{TerminalRenderer, ViewRenderer},
};

/// How long to wait for a key before checking on in-flight calculations
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The main application controller
pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<Stdout>> {
    /// Create a controller bound to the real terminal
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        Self::with_io_streams(
            settings,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create new application controller with injected I/O streams
    pub fn with_io_streams(
        settings: &ClientSettings,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let mut view_model = ViewModel::with_settings(settings)?;
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;

        let (width, height) = view_renderer.terminal_size();
        view_model.update_terminal_size(width, height);
        view_model.collect_pending_view_events();

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
        })
    }

    /// Run the main application loop until quit
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        self.view_renderer.render_full(&self.view_model)?;

        let result = self.event_loop().await;

        // Restore the terminal even when the loop failed
        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.event_stream.poll(POLL_INTERVAL)? {
                match self.event_stream.read()? {
                    Event::Key(key_event) => self.handle_key_event(key_event)?,
                    Event::Resize(width, height) => {
                        tracing::debug!("Terminal resized to {}x{}", width, height);
                        self.view_renderer.update_size(width, height);
                        self.view_model.update_terminal_size(width, height);
                    }
                    _ => {}
                }
            }

            self.view_model.poll_calculation();
            self.render_pending()?;

            // Let spawned calculation tasks make progress on single-threaded runtimes
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key_event);

        let context = CommandContext::new(ViewModelSnapshot::from_view_model(&self.view_model));
        let events = self.command_registry.process_event(key_event, &context)?;
        for event in events {
            self.apply_command_event(event);
        }
        Ok(())
    }

    /// Apply a command event to the view model
    fn apply_command_event(&mut self, event: CommandEvent) {
        match event {
            CommandEvent::DigitRequested { digit } => self.view_model.input_digit(digit),
            CommandEvent::DecimalRequested => self.view_model.input_decimal(),
            CommandEvent::OperationRequested { operation } => {
                self.view_model.press_operation(operation)
            }
            CommandEvent::EqualsRequested => self.view_model.press_equals(),
            CommandEvent::ClearRequested => self.view_model.clear(),
            CommandEvent::ClearHistoryRequested => self.view_model.clear_history(),
            CommandEvent::QuitRequested => {
                tracing::info!("Quit requested");
                self.should_quit = true;
            }
            CommandEvent::NoAction => {}
        }
    }

    fn render_pending(&mut self) -> Result<()> {
        let view_events = self.view_model.collect_pending_view_events();
        if view_events.is_empty() || self.should_quit {
            return Ok(());
        }
        self.view_renderer
            .handle_view_events(&view_events, &self.view_model)
    }

    /// Process a single key event and redraw, without the event loop
    pub fn process_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        self.handle_key_event(key_event)?;
        self.render_pending()
    }

    /// Wait for an in-flight calculation, apply it and redraw
    pub async fn settle(&mut self) -> Result<bool> {
        let applied = self.view_model.wait_for_calculation().await;
        self.render_pending()?;
        Ok(applied)
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut ViewModel {
        &mut self.view_model
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
