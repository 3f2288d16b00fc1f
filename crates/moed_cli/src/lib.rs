//! Command-line host for the moed calendar engine.

pub mod cli;
pub mod commands;
pub mod logging;
