//! # CalcLine - Terminal Calculator for the CalcAPI Service
//!
//! A full-screen keypad calculator. It does no arithmetic itself: every
//! operation is a POST to a remote `/calculate/*` endpoint.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐    Updates   ┌──────────────────┐
//! │    View     │◄─────────────│  ViewModel   │◄─────────────│ CalculatorModel  │
//! │             │              │              │              │                  │
//! │ - Terminal  │              │ - Dispatch   │              │ - Display buffer │
//! │ - Rendering │              │ - Redraws    │              │ - Pending op     │
//! └─────────────┘              └──────────────┘              │ - History        │
//!                                 ▲        │                 └──────────────────┘
//!                        Commands │        │ spawn
//!                                 │        ▼
//!                       ┌──────────────┐  ┌────────────────────┐
//!                       │  Controller  │  │ CalculationService │──▶ HTTP API
//!                       │ - Event loop │  │ - mpsc results     │
//!                       └──────────────┘  └────────────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
