//! # Models Module
//!
//! Pure calculator state with no knowledge of terminals or HTTP.

pub mod calculator_model;
pub mod history;
pub mod operation;

// Re-export main types for convenience
pub use calculator_model::{CalculatorModel, EvaluationOutcome, EvaluationRequest, PendingOperation};
pub use history::History;
pub use operation::{format_number, Operation};
