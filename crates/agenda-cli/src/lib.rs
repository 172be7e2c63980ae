//! CLI library components for the booking audit.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod types;
