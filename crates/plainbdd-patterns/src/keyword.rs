//! Shared step keyword type and parsing utilities.
//!
//! This module provides the canonical [`StepKeyword`] enum used by the line
//! grammar, the step registry and the interpreter, so every layer agrees on
//! how conjunctions inherit the keyword of the preceding step.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Keyword introducing a step line.
///
/// `And` and `But` are continuation markers. They never select step
/// definitions on their own; the interpreter resolves them against the most
/// recent `Given`/`When`/`Then` using [`resolve`](Self::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
}

impl StepKeyword {
    /// Every keyword in declaration order.
    pub const ALL: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// Return the keyword as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainbdd_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::And.as_str(), "And");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// Return `true` for `And` and `But`.
    #[must_use]
    pub const fn is_conjunction(self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    /// Resolve conjunctions to the semantic keyword of the previous step.
    ///
    /// For primary keywords (`Given`/`When`/`Then`) the keyword is stored in
    /// `prev` and returned unchanged. For `And`/`But` the stored keyword is
    /// returned and `prev` is left untouched. A conjunction with nothing
    /// stored yields `None`; callers treat that as a malformed script rather
    /// than guessing a keyword.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainbdd_patterns::StepKeyword;
    ///
    /// let mut prev = None;
    /// assert_eq!(StepKeyword::And.resolve(&mut prev), None);
    /// assert_eq!(StepKeyword::Given.resolve(&mut prev), Some(StepKeyword::Given));
    /// assert_eq!(StepKeyword::But.resolve(&mut prev), Some(StepKeyword::Given));
    /// ```
    #[must_use]
    pub fn resolve(self, prev: &mut Option<Self>) -> Option<Self> {
        if self.is_conjunction() {
            *prev
        } else {
            *prev = Some(self);
            Some(self)
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKeyword`] from a string fails.
///
/// Contains the unrecognised keyword text for diagnostic purposes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid step keyword: {0}")]
pub struct StepKeywordParseError(pub String);

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kw| trimmed.eq_ignore_ascii_case(kw.as_str()))
            .ok_or_else(|| StepKeywordParseError(trimmed.to_string()))
    }
}

impl TryFrom<&str> for StepKeyword {
    type Error = StepKeywordParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
