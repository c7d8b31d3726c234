//! # Calculator REPL
//!
//! Model-View-ViewModel layout:
//!
//! - **models**: the pure calculator state machine and history
//! - **services**: the HTTP client for the calculation API
//! - **view_models**: glues model and service, tracks what to redraw
//! - **commands**: map key presses to command events
//! - **views**: draw the screen onto a render stream
//! - **controllers**: the event loop

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use events::{Region, ViewEvent};
pub use models::{CalculatorModel, History, Operation};
pub use services::{CalcApiClient, CalculationError, CalculationService};
pub use view_models::ViewModel;
pub use views::{TerminalRenderer, ViewRenderer};

// Re-export specific items from commands to avoid conflicts
pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot};
