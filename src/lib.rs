//! Compatibility questionnaire
//!
//! Users answer multiple-choice questions on a four-step scale; their
//! profiles are scored against each other and ranked into matches.

pub mod cli;
pub mod compatibility;
pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod models;
pub mod questionnaire;
pub mod ranking;
pub mod service;
pub mod store;

#[cfg(test)]
mod models_tests;
#[cfg(test)]
pub mod tests;

pub use compatibility::score;
pub use config::AppConfig;
pub use errors::*;
pub use ranking::{rank, RankedCandidate};
