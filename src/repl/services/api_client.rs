//! # Calculation API Client
//!
//! Thin reqwest wrapper around the `/calculate/*` endpoints.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ClientSettings, DEFAULT_FAILURE_MESSAGE};
use crate::repl::models::Operation;

/// Request body: `{"a": n, "b": n}`, `b` omitted for unary operations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationRequest {
    pub a: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalculationResponse {
    pub result: f64,
    pub operation: String,
}

/// Failure response body
#[derive(Debug, Clone, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Remote-call failure. `Display` is what the user sees.
#[derive(Debug, Error)]
pub enum CalculationError {
    /// Non-success status; message comes from the server when it sent one
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    /// The request never produced a response
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but the body was not a calculation result
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl CalculationError {
    /// Whether the server supplied its own failure message
    pub fn has_server_message(&self) -> bool {
        matches!(self, CalculationError::Server { message, .. } if message != DEFAULT_FAILURE_MESSAGE)
    }
}

/// HTTP client bound to one API base URL
#[derive(Debug, Clone)]
pub struct CalcApiClient {
    client: Client,
    base_url: String,
}

impl CalcApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, CalculationError> {
        tracing::debug!(
            "Creating CalcApiClient for {} (timeout {:?})",
            settings.api_base_url(),
            settings.timeout()
        );
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            base_url: settings.api_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an operation
    pub fn endpoint_url(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.endpoint())
    }

    /// POST one calculation and return its numeric result
    pub async fn calculate(
        &self,
        operation: Operation,
        a: f64,
        b: Option<f64>,
    ) -> Result<f64, CalculationError> {
        let url = self.endpoint_url(operation);
        let body = CalculationRequest {
            a,
            b: if operation.is_unary() { None } else { b },
        };
        tracing::debug!("POST {} {:?}", url, body);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            return Err(CalculationError::Server { status, message });
        }

        let parsed: CalculationResponse = serde_json::from_str(&text)
            .map_err(|e| CalculationError::InvalidResponse(e.to_string()))?;
        tracing::debug!(
            "{} succeeded: result={} operation={}",
            operation,
            parsed.result,
            parsed.operation
        );

        Ok(parsed.result)
    }
}
