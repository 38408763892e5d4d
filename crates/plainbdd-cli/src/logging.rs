//! Structured logging with environment variable configuration.
//!
//! Logs are written to stderr so they never mix with the report on stdout.
//! Records emitted through the `log` facade by the interpreter are bridged
//! into the same subscriber.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

use crate::config::RunnerConfig;

fn filter_from_config(config: &RunnerConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `PLAINBDD_LOG_LEVEL`
/// 3. Default configuration value (`warn`)
///
/// If a global subscriber is already set the call is ignored, so the first
/// initialisation wins.
pub fn init_logging(config: &RunnerConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn init_logging_is_idempotent() {
        let config = RunnerConfig::default();
        init_logging(&config);
        init_logging(&config);
    }

    #[test]
    fn filter_uses_config_log_level() {
        let config = RunnerConfig::default().with_log_level(LogLevel::Debug);
        let filter = filter_from_config(&config);
        assert_eq!(filter.to_string(), "debug");
    }
}
