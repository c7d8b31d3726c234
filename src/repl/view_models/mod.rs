//! # ViewModel Module
//!
//! Sits between the key-handling commands and the renderer.

pub mod core;

pub use self::core::ViewModel;
