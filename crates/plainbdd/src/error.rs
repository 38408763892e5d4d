//! Error types for step handlers, scenario hooks and the interpreter.
//!
//! Only [`InterpretError`] and [`RunError`] abort a run. [`StepError`] is
//! returned by handlers and turned into a failed step by the dispatcher, so a
//! single broken step never stops the rest of the feature from executing.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::StepKeyword;
use plainbdd_patterns::PatternError;

/// Error raised by a step handler outside the assertion mechanism.
///
/// # Examples
///
/// ```
/// use plainbdd::StepError;
///
/// let err = StepError::failed("page not found");
/// assert_eq!(err.to_string(), "page not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StepError {
    /// The handler gave up with a message.
    #[error("{message}")]
    Failed {
        /// Human-readable description of the failure.
        message: String,
    },
    /// A capture could not be read or converted.
    #[error("capture {index}: {message}")]
    Argument {
        /// Zero-based capture index, not counting the whole match.
        index: usize,
        /// Why the capture was rejected.
        message: String,
    },
    /// The handler panicked.
    #[error("step panicked: {message}")]
    Panicked {
        /// Rendered panic payload.
        message: String,
    },
}

impl StepError {
    /// Build a [`StepError::Failed`] from any message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

impl From<String> for StepError {
    fn from(message: String) -> Self {
        Self::failed(message)
    }
}

impl From<&str> for StepError {
    fn from(message: &str) -> Self {
        Self::failed(message)
    }
}

/// Error raised by a scenario set-up or tear-down hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Construct a hook error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Access the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure of a scenario lifecycle hook, tagged with the phase that ran it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The set-up hook failed; the scenario was never opened.
    #[error("scenario set-up failed: {0}")]
    SetUp(#[source] HookError),
    /// The tear-down hook failed; the scenario is closed regardless.
    #[error("scenario tear-down failed: {0}")]
    TearDown(#[source] HookError),
}

/// Errors raised while registering step definitions.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The pattern is not a valid regular expression.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// Definitions are registered under `Given`, `When` or `Then` only.
    #[error("cannot register `{pattern}` under `{keyword}`; use Given, When or Then")]
    Conjunction {
        /// Keyword that was rejected.
        keyword: StepKeyword,
        /// Pattern text that was being registered.
        pattern: String,
    },
}

/// Fatal errors that stop a feature script from being interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InterpretError {
    /// An `And`/`But` line appeared with no `Given`/`When`/`Then` before it
    /// in the open scenario.
    #[error(
        "{source_id}:{line_number}: `{keyword}` has no preceding Given, When or Then in this scenario: {line}"
    )]
    DanglingConjunction {
        /// Conjunction keyword as written.
        keyword: StepKeyword,
        /// Identifier of the script.
        source_id: String,
        /// 1-based line number of the offending line.
        line_number: usize,
        /// Raw line text.
        line: String,
    },
    /// A set-up or tear-down hook failed.
    #[error("{source_id}:{line_number}: {source}")]
    Lifecycle {
        /// Identifier of the script.
        source_id: String,
        /// Line that triggered the hook; the last line for end of input.
        line_number: usize,
        /// Hook failure.
        #[source]
        source: LifecycleError,
    },
}

/// Errors raised while running feature files from disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// A feature file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path being read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Directory traversal failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    /// Feature files must carry the `.feature` extension.
    #[error("feature file name does not match `<name>.feature`: {path}")]
    NotAFeature {
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A provider could not register its step definitions.
    #[error("step definitions for `{helper}` are invalid: {source}")]
    Registry {
        /// Helper name the provider was registered under.
        helper: String,
        /// Registration failure.
        #[source]
        source: RegistryError,
    },
    /// Interpretation aborted.
    #[error(transparent)]
    Interpret(#[from] InterpretError),
}
