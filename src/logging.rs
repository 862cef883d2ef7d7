//! Logging configuration for matchquiz

use std::path::Path;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::config::{AppConfig, LoggingConfig};
use crate::Result;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "matchquiz.log";

/// Initialize logging with configuration; `RUST_LOG` overrides `logging.level`
pub fn init_logging_with_config(config: &AppConfig) -> Result<()> {
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => init_with_filter(env_filter, "RUST_LOG"),
        Err(_) => init_logging_with_level(&config.logging.level),
    }
}

/// Export `logging.backtrace` as `RUST_BACKTRACE` unless the environment
/// already sets it
pub fn apply_backtrace_setting(config: &LoggingConfig) {
    let already_set = std::env::var_os("RUST_BACKTRACE").is_some();
    if let Some(value) = backtrace_override(config.backtrace, already_set) {
        std::env::set_var("RUST_BACKTRACE", value);
    }
}

fn backtrace_override(enabled: bool, already_set: bool) -> Option<&'static str> {
    (enabled && !already_set).then_some("1")
}

/// Initialize logging with custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    let env_filter = EnvFilter::new(format!("{level},matchquiz={level}"));
    init_with_filter(env_filter, level)
}

fn init_with_filter(env_filter: EnvFilter, level: &str) -> Result<()> {
    // Create logs directory if it doesn't exist
    let logs_dir = Path::new(LOG_DIR);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Console output goes to stderr so it never interleaves with command output
    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::MatchQuizError::Custom(format!("Failed to initialize logging: {e}")))?;

    tracing::info!("Logging initialized with level: {}", level);
    tracing::debug!("Log files will be saved to: {}/{}.YYYY-MM-DD", LOG_DIR, LOG_FILE);

    // The writer must outlive every log call; keep it for the whole process
    std::mem::forget(guard);

    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init()
        .map_err(|e| crate::MatchQuizError::Custom(format!("Failed to initialize logging: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_initialization() {
        // A second initialization in the same process reports an error instead of panicking
        let _ = init_simple_logging();
        assert!(init_simple_logging().is_err());
    }

    #[test]
    fn test_backtrace_setting_respects_environment() {
        assert_eq!(backtrace_override(true, false), Some("1"));
        assert_eq!(backtrace_override(true, true), None);
        assert_eq!(backtrace_override(false, false), None);
    }
}
