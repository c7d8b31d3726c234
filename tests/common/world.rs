use anyhow::{anyhow, Result};
use cucumber::World;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use calcline::{
    config::ClientSettings,
    io::{MockEventStream, MockRenderStream, MockTerminalState},
    AppController, ViewModel,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

type TestController = AppController<MockEventStream, MockRenderStream>;

/// Scenario state: a wiremock calculation API and a calculator wired to it
#[derive(World)]
#[world(init = Self::new)]
pub struct CalcWorld {
    /// Stand-in for the calculation API
    pub mock_server: Option<MockServer>,

    /// Real controller driven with mock terminal streams
    pub controller: Option<TestController>,

    /// Screen captured by the mock render stream
    pub screen: Option<Arc<Mutex<MockTerminalState>>>,
}

impl std::fmt::Debug for CalcWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalcWorld")
            .field("server", &self.mock_server.as_ref().map(|s| s.uri()))
            .field("running", &self.controller.is_some())
            .finish()
    }
}

impl CalcWorld {
    pub fn new() -> Self {
        Self {
            mock_server: None,
            controller: None,
            screen: None,
        }
    }

    async fn server(&mut self) -> &MockServer {
        if self.mock_server.is_none() {
            self.mock_server = Some(MockServer::start().await);
        }
        self.mock_server
            .as_ref()
            .expect("mock server was just started")
    }

    /// Answer every call to `/calculate/{operation}` with `result`
    pub async fn mock_result(&mut self, operation: &str, result: f64) {
        let server = self.server().await;
        Mock::given(method("POST"))
            .and(path(format!("/api/v1/calculate/{operation}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "result": result, "operation": operation })),
            )
            .mount(server)
            .await;
    }

    /// Fail every call to `/calculate/{operation}` with a JSON error body
    pub async fn mock_failure(&mut self, operation: &str, status: u16, message: &str) {
        let server = self.server().await;
        Mock::given(method("POST"))
            .and(path(format!("/api/v1/calculate/{operation}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "error": message })))
            .mount(server)
            .await;
    }

    /// Start the calculator against the mock server
    pub async fn start(&mut self) -> Result<()> {
        let base_url = format!("{}/api/v1", self.server().await.uri());
        let settings = ClientSettings::new(&base_url, Duration::from_secs(5))?;

        let render_stream = MockRenderStream::new();
        self.screen = Some(render_stream.state_handle());
        self.controller = Some(AppController::with_io_streams(
            &settings,
            MockEventStream::empty(),
            render_stream,
        )?);
        Ok(())
    }

    fn controller_mut(&mut self) -> Result<&mut TestController> {
        self.controller
            .as_mut()
            .ok_or_else(|| anyhow!("calculator is not running"))
    }

    pub fn view_model(&self) -> &ViewModel {
        self.controller
            .as_ref()
            .expect("calculator is not running")
            .view_model()
    }

    pub fn should_quit(&self) -> bool {
        self.controller
            .as_ref()
            .is_some_and(|controller| controller.should_quit())
    }

    /// Send one key press through the real command pipeline
    pub fn press_key(&mut self, key: &str) -> Result<()> {
        let key_event = match key {
            "Escape" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "Enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "Delete" => KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE),
            "Ctrl+C" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            single if single.chars().count() == 1 => {
                let ch = single.chars().next().unwrap_or_default();
                KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
            }
            other => return Err(anyhow!("unknown key: {other}")),
        };
        self.controller_mut()?.process_key_event(key_event)
    }

    /// Type each character as its own key press
    pub fn type_keys(&mut self, keys: &str) -> Result<()> {
        for ch in keys.chars() {
            self.press_key(&ch.to_string())?;
        }
        Ok(())
    }

    /// Wait for the in-flight calculation and apply it
    pub async fn settle(&mut self) -> Result<bool> {
        self.controller_mut()?.settle().await
    }

    pub fn screen_contains(&self, needle: &str) -> bool {
        self.screen.as_ref().is_some_and(|screen| {
            screen
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .screen_contains(needle)
        })
    }
}
