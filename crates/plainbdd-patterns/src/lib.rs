//! Shared line grammar and step-pattern utilities for plainbdd.
//!
//! The crate holds the pieces that do not depend on step execution: the
//! [`StepKeyword`] enum, classification of feature script lines into
//! [`LineToken`]s, and helpers for compiling step regexes and extracting
//! their capture groups.

mod capture;
mod errors;
mod grammar;
mod keyword;
mod pattern;

pub use capture::extract_captures;
pub use errors::PatternError;
pub use grammar::{FeatureLine, LineKind, LineToken, classify, feature_lines};
pub use keyword::{StepKeyword, StepKeywordParseError};
pub use pattern::{compile_step_regex, literal_pattern};
