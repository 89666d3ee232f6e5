//! Logging infrastructure for SlideReel.
//!
//! This module provides:
//! - Per-run loggers with file + callback dual output
//! - Compact mode that keeps tool output in a tail buffer, replayed on
//!   external-command failure
//! - Integration with the `tracing` ecosystem
//!
//! # Example
//!
//! ```no_run
//! use slidereel_core::logging::{LogConfig, RunLogger};
//!
//! let logger = RunLogger::new("deck_run", "/path/to/logs", LogConfig::default(), None).unwrap();
//!
//! logger.phase("Building segments");
//! logger.command("ffmpeg -loop 1 -i slide_01.png ...");
//! logger.progress(50);
//! logger.success("Run completed");
//! ```

mod run_logger;
mod types;

pub use run_logger::RunLogger;
pub use types::{LogCallback, LogConfig, LogLevel, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG`, falling back to the provided default level.
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Convert a LogLevel to an env-filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Error), "error");
    }
}
