//! # Event System
//!
//! Events flowing from the view model to the view layer.

pub mod view_events;

pub use view_events::{Region, ViewEvent};
