//! CLI module for the `matchquiz` binary
//!
//! This module contains all CLI-related functionality including:
//! - Command line argument parsing
//! - Command handlers
//! - Output formatting
//! - Interactive answer prompts

pub mod commands;
pub mod handlers;
pub mod output;
pub mod prompt;

pub use commands::*;
pub use handlers::*;
pub use prompt::TerminalPrompt;
