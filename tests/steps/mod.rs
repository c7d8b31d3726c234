//! Step definitions for the cucumber suite

pub mod calculator;
