//! # Operation Model
//!
//! The set of operations the calculation API understands, together with
//! their endpoint paths, display symbols and history line formats.

use std::fmt;

/// An operation supported by the remote calculation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    /// Unary square root
    Sqrt,
    /// `a` percent of `b`
    Percentage,
}

impl Operation {
    /// All operations in keypad order
    pub const ALL: [Operation; 7] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
        Operation::Sqrt,
        Operation::Percentage,
    ];

    /// Endpoint path relative to the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Add => "/calculate/add",
            Operation::Subtract => "/calculate/subtract",
            Operation::Multiply => "/calculate/multiply",
            Operation::Divide => "/calculate/divide",
            Operation::Power => "/calculate/power",
            Operation::Sqrt => "/calculate/sqrt",
            Operation::Percentage => "/calculate/percentage",
        }
    }

    /// Symbol shown next to the pending first operand
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
            Operation::Power => "^",
            Operation::Sqrt => "√",
            Operation::Percentage => "%",
        }
    }

    /// Whether the operation takes a single operand
    pub fn is_unary(&self) -> bool {
        matches!(self, Operation::Sqrt)
    }

    /// Human-readable history line for a completed calculation
    ///
    /// `b` is ignored for unary operations.
    pub fn history_line(&self, a: f64, b: Option<f64>, result: f64) -> String {
        let a = format_number(a);
        let b = b.map(format_number).unwrap_or_default();
        let result = format_number(result);

        match self {
            Operation::Sqrt => format!("√{a} = {result}"),
            Operation::Percentage => format!("{a}% of {b} = {result}"),
            op => format!("{a} {} {b} = {result}", op.symbol()),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Power => "power",
            Operation::Sqrt => "sqrt",
            Operation::Percentage => "percentage",
        };
        f.write_str(name)
    }
}

/// Shortest textual form of a number: `15` rather than `15.0`.
/// Magnitudes from 1e21 up or below 1e-6 use exponent form (`1e+21`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_should_match_api_paths() {
        assert_eq!(Operation::Add.endpoint(), "/calculate/add");
        assert_eq!(Operation::Sqrt.endpoint(), "/calculate/sqrt");
        assert_eq!(Operation::Percentage.endpoint(), "/calculate/percentage");
        for op in Operation::ALL {
            assert_eq!(op.endpoint(), format!("/calculate/{op}"));
        }
    }

    #[test]
    fn only_sqrt_should_be_unary() {
        let unary: Vec<_> = Operation::ALL.iter().filter(|op| op.is_unary()).collect();
        assert_eq!(unary, vec![&Operation::Sqrt]);
    }

    #[test]
    fn history_line_should_format_binary_operations() {
        assert_eq!(
            Operation::Add.history_line(10.0, Some(5.0), 15.0),
            "10 + 5 = 15"
        );
        assert_eq!(
            Operation::Multiply.history_line(2.5, Some(4.0), 10.0),
            "2.5 × 4 = 10"
        );
        assert_eq!(
            Operation::Divide.history_line(1.0, Some(4.0), 0.25),
            "1 ÷ 4 = 0.25"
        );
        assert_eq!(
            Operation::Power.history_line(2.0, Some(10.0), 1024.0),
            "2 ^ 10 = 1024"
        );
    }

    #[test]
    fn history_line_should_format_sqrt_and_percentage() {
        assert_eq!(Operation::Sqrt.history_line(25.0, None, 5.0), "√25 = 5");
        assert_eq!(
            Operation::Percentage.history_line(20.0, Some(150.0), 30.0),
            "20% of 150 = 30"
        );
    }

    #[test]
    fn format_number_should_use_shortest_form() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(-3.5), "-3.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn format_number_should_switch_to_exponent_for_extreme_magnitudes() {
        assert_eq!(format_number(2f64.powi(1000)), "1.0715086071862673e+301");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(123456789012.0), "123456789012");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(
            Operation::Power.history_line(2.0, Some(1000.0), 2f64.powi(1000)),
            "2 ^ 1000 = 1.0715086071862673e+301"
        );
    }
}
