//! Weekly habit tracker for the terminal. Every calendar week gets one record with daily habit
//! ticks, notes, metrics and reflections, kept in a local directory and exportable as JSON.
//!

pub mod cli;
pub mod fs;
pub mod tracker;
pub mod utils;
