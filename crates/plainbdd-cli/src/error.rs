//! Errors raised while assembling the runner configuration.

use thiserror::Error;

/// Configuration errors.
///
/// The binary exits with status 2 when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable or flag held an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
