//! # Calculator Model
//!
//! The keypad state machine: display buffer, pending operation, second-operand
//! flag, error state and history. It performs no I/O. Evaluations are handed
//! out as [`EvaluationRequest`]s and their outcomes fed back through
//! [`CalculatorModel::complete_evaluation`].

use crate::config::ERROR_TOKEN;
use crate::repl::models::history::History;
use crate::repl::models::operation::{format_number, Operation};

/// Stored first operand and operator awaiting a second operand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingOperation {
    pub operation: Operation,
    pub first_operand: f64,
}

/// A remote evaluation the model is waiting on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationRequest {
    pub operation: Operation,
    pub a: f64,
    /// Absent for unary operations
    pub b: Option<f64>,
    /// Clear generation at dispatch time
    generation: u64,
}

/// Outcome of a remote evaluation: the numeric result or a user-facing message
pub type EvaluationOutcome = Result<f64, String>;

/// Client-side calculator state
#[derive(Debug, Clone)]
pub struct CalculatorModel {
    display: String,
    pending: Option<PendingOperation>,
    waiting_for_second_operand: bool,
    error: Option<String>,
    history: History,
    in_flight: Option<EvaluationRequest>,
    /// Bumped by AC so late failures from before the clear can be discarded
    generation: u64,
}

impl CalculatorModel {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            pending: None,
            waiting_for_second_operand: false,
            error: None,
            history: History::new(),
            in_flight: None,
            generation: 0,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn pending(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    pub fn is_waiting_for_second_operand(&self) -> bool {
        self.waiting_for_second_operand
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// True while an evaluation is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// `"10 +"` style indicator for the pending operation
    pub fn pending_line(&self) -> Option<String> {
        self.pending.map(|pending| {
            format!(
                "{} {}",
                format_number(pending.first_operand),
                pending.operation.symbol()
            )
        })
    }

    /// Numeric value of the display, `None` while the error token is shown
    pub fn current_value(&self) -> Option<f64> {
        if self.error.is_some() {
            return None;
        }
        self.display.parse::<f64>().ok()
    }

    /// Handle a digit key
    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            tracing::warn!("Ignoring non-digit input {:?}", digit);
            return;
        }

        if self.error.take().is_some() || self.waiting_for_second_operand {
            self.display = digit.to_string();
            self.waiting_for_second_operand = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
    }

    /// Handle the decimal point key
    pub fn input_decimal(&mut self) {
        if self.error.take().is_some() || self.waiting_for_second_operand {
            self.display = "0.".to_string();
            self.waiting_for_second_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// AC: reset everything except history
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.pending = None;
        self.waiting_for_second_operand = false;
        self.error = None;
        self.generation += 1;
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Handle an operator key
    ///
    /// Returns a request when the press triggers an evaluation: always for
    /// square root, and for binary operators when an operation is already
    /// pending (the stored operator is evaluated, the new one is dropped).
    pub fn press_operation(&mut self, operation: Operation) -> Option<EvaluationRequest> {
        if self.is_loading() {
            tracing::debug!("Evaluation in flight, ignoring {}", operation);
            return None;
        }
        let current = self.current_value()?;

        if operation.is_unary() {
            self.pending = None;
            return Some(self.begin_evaluation(operation, current, None));
        }

        match self.pending.take() {
            None => {
                self.pending = Some(PendingOperation {
                    operation,
                    first_operand: current,
                });
                self.waiting_for_second_operand = true;
                None
            }
            Some(pending) => Some(self.begin_evaluation(
                pending.operation,
                pending.first_operand,
                Some(current),
            )),
        }
    }

    /// Handle the equals key
    pub fn press_equals(&mut self) -> Option<EvaluationRequest> {
        if self.is_loading() {
            tracing::debug!("Evaluation in flight, ignoring equals");
            return None;
        }
        let current = self.current_value()?;
        let pending = self.pending.take()?;

        Some(self.begin_evaluation(
            pending.operation,
            pending.first_operand,
            Some(current),
        ))
    }

    fn begin_evaluation(&mut self, operation: Operation, a: f64, b: Option<f64>) -> EvaluationRequest {
        let request = EvaluationRequest {
            operation,
            a,
            b,
            generation: self.generation,
        };
        self.in_flight = Some(request);
        request
    }

    /// Apply the outcome of an evaluation
    ///
    /// Returns whether visible state changed. Successful results are always
    /// applied; a failure is dropped when AC was pressed after dispatch.
    pub fn complete_evaluation(
        &mut self,
        request: &EvaluationRequest,
        outcome: EvaluationOutcome,
    ) -> bool {
        // At most one evaluation is ever outstanding
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                self.display = format_number(result);
                self.history
                    .push(request.operation.history_line(request.a, request.b, result));
                self.pending = None;
                self.error = None;
                true
            }
            Err(message) if request.generation != self.generation => {
                tracing::debug!("Discarding failure after clear: {}", message);
                true
            }
            Err(message) => {
                self.display = ERROR_TOKEN.to_string();
                self.error = Some(message);
                self.pending = None;
                true
            }
        }
    }
}

impl Default for CalculatorModel {
    fn default() -> Self {
        Self::new()
    }
}
