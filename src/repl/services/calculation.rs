//! # Calculation Service
//!
//! Runs remote evaluations off the UI loop and hands results back through
//! a channel, so key handling never waits on the network.

use tokio::sync::mpsc;

use super::api_client::CalcApiClient;
use crate::repl::models::{EvaluationOutcome, EvaluationRequest};

/// Message type for async calculation results
#[derive(Debug)]
pub enum CalculationMessage {
    /// Server returned a result
    Success {
        request: EvaluationRequest,
        result: f64,
    },
    /// The call failed; `message` is ready for display
    Error {
        request: EvaluationRequest,
        message: String,
    },
}

impl CalculationMessage {
    pub fn request(&self) -> &EvaluationRequest {
        match self {
            CalculationMessage::Success { request, .. } => request,
            CalculationMessage::Error { request, .. } => request,
        }
    }

    /// Split into the request and a model-ready outcome
    pub fn into_outcome(self) -> (EvaluationRequest, EvaluationOutcome) {
        match self {
            CalculationMessage::Success { request, result } => (request, Ok(result)),
            CalculationMessage::Error { request, message } => (request, Err(message)),
        }
    }
}

/// Service for dispatching calculations to the API
pub struct CalculationService {
    client: CalcApiClient,
    /// Channel for receiving async results
    response_receiver: mpsc::Receiver<CalculationMessage>,
    /// Channel sender cloned into each spawned task
    response_sender: mpsc::Sender<CalculationMessage>,
}

impl CalculationService {
    pub fn new(client: CalcApiClient) -> Self {
        let (response_sender, response_receiver) = mpsc::channel(10);
        Self {
            client,
            response_receiver,
            response_sender,
        }
    }

    pub fn api_base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Spawn a tokio task that evaluates the request and reports back
    pub fn execute_async(&self, request: EvaluationRequest) {
        let client = self.client.clone();
        let result_sender = self.response_sender.clone();

        tokio::spawn(async move {
            let message = match client.calculate(request.operation, request.a, request.b).await {
                Ok(result) => CalculationMessage::Success { request, result },
                Err(e) => {
                    tracing::warn!("Calculation {} failed: {}", request.operation, e);
                    CalculationMessage::Error {
                        request,
                        message: e.to_string(),
                    }
                }
            };

            // Ignore send errors (receiver might have been dropped)
            let _ = result_sender.send(message).await;
        });
    }

    /// Check for a finished calculation without blocking
    pub fn poll_response(&mut self) -> Option<CalculationMessage> {
        self.response_receiver.try_recv().ok()
    }

    /// Wait for the next finished calculation
    pub async fn next_response(&mut self) -> Option<CalculationMessage> {
        self.response_receiver.recv().await
    }
}
