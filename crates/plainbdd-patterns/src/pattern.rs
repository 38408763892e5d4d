//! Step pattern compilation and literal-pattern rendering.

use regex::Regex;

use crate::errors::PatternError;

/// Compile step pattern text into a [`Regex`].
///
/// The text is used verbatim: anchors and inline flags such as `(?i)` are the
/// step author's responsibility.
///
/// # Errors
///
/// Returns [`PatternError::Regex`] when the text is not a valid regular
/// expression.
///
/// # Examples
/// ```
/// use plainbdd_patterns::compile_step_regex;
///
/// let re = compile_step_regex(r"(?i)^i have (\d+) apples$").expect("valid pattern");
/// assert!(re.is_match("I HAVE 3 APPLES"));
/// ```
pub fn compile_step_regex(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError::Regex {
        pattern: pattern.to_owned(),
        source,
    })
}

/// Render an anchored pattern that matches `text` literally.
///
/// Used to suggest a starting point for a step that has no definition yet.
///
/// # Examples
/// ```
/// use plainbdd_patterns::literal_pattern;
///
/// assert_eq!(literal_pattern("I pay $5 (cash)"), r"^I pay \$5 \(cash\)$");
/// ```
#[must_use]
pub fn literal_pattern(text: &str) -> String {
    format!("^{}$", regex::escape(text.trim()))
}
