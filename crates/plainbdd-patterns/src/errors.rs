//! Error types raised while compiling step patterns.

use thiserror::Error;

/// Errors surfaced while turning step pattern text into a regular expression.
///
/// # Examples
/// ```
/// use plainbdd_patterns::compile_step_regex;
///
/// let err = compile_step_regex("^I have (\\d+ apples$").expect_err("unbalanced group");
/// assert!(err.to_string().starts_with("invalid step pattern `^I have (\\d+ apples$`"));
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    #[error("invalid step pattern `{pattern}`: {source}")]
    Regex {
        /// Pattern text as supplied by the step author.
        pattern: String,
        /// Underlying compilation failure.
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_pattern_and_cause() {
        let err = PatternError::Regex {
            pattern: "(".into(),
            source: regex::Error::Syntax("unclosed group".into()),
        };
        assert_eq!(err.to_string(), "invalid step pattern `(`: unclosed group");
    }
}
