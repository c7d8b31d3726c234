//! # Services Layer
//!
//! Services encapsulate access to external resources. The only external
//! resource here is the remote calculation API.

pub mod api_client;
pub mod calculation;

// Re-export service types
pub use api_client::{CalcApiClient, CalculationError, CalculationRequest, CalculationResponse};
pub use calculation::{CalculationMessage, CalculationService};
