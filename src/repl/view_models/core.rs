//! # ViewModel Core
//!
//! Coordinates the calculator model with the calculation service and
//! records which parts of the screen need redrawing.

use anyhow::Result;

use crate::config::{ClientSettings, LOADING_TEXT};
use crate::repl::events::ViewEvent;
use crate::repl::models::{CalculatorModel, EvaluationRequest, Operation};
use crate::repl::services::{CalcApiClient, CalculationMessage, CalculationService};

/// Message used when no calculation service has been attached
const SERVICE_MISSING_MESSAGE: &str = "Calculation service not configured";

/// Main ViewModel that coordinates the calculator state and the API
pub struct ViewModel {
    model: CalculatorModel,
    calculation: Option<CalculationService>,
    api_base_url: String,
    status_message: Option<String>,
    terminal_size: (u16, u16),
    pending_view_events: Vec<ViewEvent>,
}

impl ViewModel {
    /// Create a ViewModel without a calculation service
    pub fn new() -> Self {
        Self {
            model: CalculatorModel::new(),
            calculation: None,
            api_base_url: String::new(),
            status_message: None,
            terminal_size: (80, 24),
            pending_view_events: Vec::new(),
        }
    }

    /// Create a ViewModel talking to the API described by `settings`
    pub fn with_settings(settings: &ClientSettings) -> Result<Self> {
        let client = CalcApiClient::new(settings)?;
        let mut view_model = Self::new();
        view_model.set_calculation_service(CalculationService::new(client));
        Ok(view_model)
    }

    pub fn set_calculation_service(&mut self, service: CalculationService) {
        tracing::info!("Calculation service attached: {}", service.api_base_url());
        self.api_base_url = service.api_base_url().to_string();
        self.calculation = Some(service);
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn model(&self) -> &CalculatorModel {
        &self.model
    }

    /// Text for the main display: loading indicator or buffer
    pub fn display_text(&self) -> &str {
        if self.model.is_loading() {
            LOADING_TEXT
        } else {
            self.model.display()
        }
    }

    pub fn pending_line(&self) -> Option<String> {
        self.model.pending_line()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.model.error()
    }

    pub fn history_entries(&self) -> Vec<&str> {
        self.model.history().iter().collect()
    }

    pub fn is_loading(&self) -> bool {
        self.model.is_loading()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.emit_view_event(ViewEvent::status_bar());
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    pub fn input_digit(&mut self, digit: char) {
        self.model.input_digit(digit);
        self.emit_view_event(ViewEvent::display());
    }

    pub fn input_decimal(&mut self) {
        self.model.input_decimal();
        self.emit_view_event(ViewEvent::display());
    }

    pub fn clear(&mut self) {
        self.model.clear();
        self.status_message = None;
        self.emit_view_event(ViewEvent::display());
        self.emit_view_event(ViewEvent::status_bar());
    }

    pub fn clear_history(&mut self) {
        self.model.clear_history();
        self.emit_view_event(ViewEvent::history());
    }

    pub fn press_operation(&mut self, operation: Operation) {
        if let Some(request) = self.model.press_operation(operation) {
            self.dispatch(request);
        }
        self.emit_view_event(ViewEvent::display());
    }

    pub fn press_equals(&mut self) {
        if let Some(request) = self.model.press_equals() {
            self.dispatch(request);
        }
        self.emit_view_event(ViewEvent::display());
    }

    fn dispatch(&mut self, request: EvaluationRequest) {
        match &self.calculation {
            Some(service) => {
                tracing::debug!("Dispatching {:?}", request);
                service.execute_async(request);
                self.status_message = Some(format!("Calculating {}...", request.operation));
                self.emit_view_event(ViewEvent::status_bar());
            }
            None => {
                tracing::warn!("No calculation service for {:?}", request);
                self.model
                    .complete_evaluation(&request, Err(SERVICE_MISSING_MESSAGE.to_string()));
            }
        }
    }

    /// Apply a finished calculation if one is ready. Returns true if one was applied.
    pub fn poll_calculation(&mut self) -> bool {
        let message = match self.calculation.as_mut() {
            Some(service) => service.poll_response(),
            None => None,
        };

        match message {
            Some(message) => {
                self.apply_calculation_message(message);
                true
            }
            None => false,
        }
    }

    /// Wait for the outstanding calculation, if any, and apply it
    pub async fn wait_for_calculation(&mut self) -> bool {
        if !self.model.is_loading() {
            return false;
        }
        let message = match self.calculation.as_mut() {
            Some(service) => service.next_response().await,
            None => None,
        };

        match message {
            Some(message) => {
                self.apply_calculation_message(message);
                true
            }
            None => false,
        }
    }

    fn apply_calculation_message(&mut self, message: CalculationMessage) {
        let (request, outcome) = message.into_outcome();
        self.status_message = match &outcome {
            Ok(_) => Some(format!("{} done", request.operation)),
            Err(_) => Some(format!("{} failed", request.operation)),
        };

        let succeeded = outcome.is_ok();
        self.model.complete_evaluation(&request, outcome);

        self.emit_view_event(ViewEvent::display());
        self.emit_view_event(ViewEvent::status_bar());
        if succeeded {
            self.emit_view_event(ViewEvent::history());
        }
    }

    fn emit_view_event(&mut self, event: ViewEvent) {
        if !self.pending_view_events.contains(&event) {
            self.pending_view_events.push(event);
        }
    }

    /// Take all pending view events
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}
