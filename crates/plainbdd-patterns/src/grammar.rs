//! Line grammar for feature scripts.
//!
//! Feature scripts are read one line at a time. Each line is classified into
//! a [`LineToken`]; the checks run in a fixed order so a line that could be
//! read as both a heading and a step is always treated as a heading.
//!
//! | Precedence | Shape                                   | Token                       |
//! |------------|-----------------------------------------|-----------------------------|
//! | 1          | `Feature:` / `Scenario:` then a label   | [`LineToken::Feature`] etc. |
//! | 2          | `Given`/`When`/`Then`/`And`/`But` text  | [`LineToken::Step`]         |
//! | 3          | anything else                           | [`LineToken::Text`]         |
//!
//! Matching is case-insensitive and ignores leading whitespace.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::keyword::StepKeyword;

#[expect(clippy::expect_used, reason = "grammar patterns are string literals")]
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(feature|scenario)\s*:\s*(.+)$").expect("heading grammar must compile")
});

#[expect(clippy::expect_used, reason = "grammar patterns are string literals")]
static STEP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(given|when|then|and|but)\s+(.+)$").expect("step grammar must compile")
});

/// One line of a feature script together with its position.
///
/// Line numbers are 1-based. The source identifier is whatever the caller
/// uses to name the script, typically its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLine<'a> {
    /// Raw line text without the line terminator.
    pub text: &'a str,
    /// 1-based line number within the script.
    pub number: usize,
    /// Identifier of the script the line was read from.
    pub source: &'a str,
}

impl<'a> FeatureLine<'a> {
    /// Construct a line record.
    #[must_use]
    pub const fn new(text: &'a str, number: usize, source: &'a str) -> Self {
        Self {
            text,
            number,
            source,
        }
    }

    /// Classify the line text.
    #[must_use]
    pub fn token(&self) -> LineToken<'a> {
        classify(self.text)
    }
}

impl fmt::Display for FeatureLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.number)
    }
}

/// Split `input` into numbered lines attributed to `source`.
///
/// Both `\n` and `\r\n` terminators are accepted. A trailing terminator does
/// not produce an extra empty line.
///
/// # Examples
///
/// ```
/// use plainbdd_patterns::feature_lines;
///
/// let lines: Vec<_> = feature_lines("Feature: a\r\n  Scenario: b\n", "demo").collect();
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1].number, 2);
/// assert_eq!(lines[1].text, "  Scenario: b");
/// ```
pub fn feature_lines<'a>(input: &'a str, source: &'a str) -> impl Iterator<Item = FeatureLine<'a>> {
    input
        .lines()
        .enumerate()
        .map(move |(index, text)| FeatureLine::new(text, index + 1, source))
}

/// Structural category of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `Feature:` heading.
    Feature,
    /// `Scenario:` heading.
    Scenario,
    /// `Given` step.
    Given,
    /// `When` step.
    When,
    /// `Then` step.
    Then,
    /// `And` continuation step.
    And,
    /// `But` continuation step.
    But,
    /// Comments, blank lines and narrative text.
    Unknown,
}

impl From<StepKeyword> for LineKind {
    fn from(keyword: StepKeyword) -> Self {
        match keyword {
            StepKeyword::Given => Self::Given,
            StepKeyword::When => Self::When,
            StepKeyword::Then => Self::Then,
            StepKeyword::And => Self::And,
            StepKeyword::But => Self::But,
        }
    }
}

/// A classified feature script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineToken<'a> {
    /// `Feature: <label>`.
    Feature {
        /// Text following the colon.
        label: &'a str,
    },
    /// `Scenario: <label>`.
    Scenario {
        /// Text following the colon.
        label: &'a str,
    },
    /// A step line.
    Step {
        /// Keyword exactly as written, before conjunction resolution.
        keyword: StepKeyword,
        /// Step text following the keyword.
        text: &'a str,
    },
    /// Any other line.
    Text,
}

impl LineToken<'_> {
    /// Structural category of the token.
    #[must_use]
    pub fn kind(&self) -> LineKind {
        match self {
            Self::Feature { .. } => LineKind::Feature,
            Self::Scenario { .. } => LineKind::Scenario,
            Self::Step { keyword, .. } => LineKind::from(*keyword),
            Self::Text => LineKind::Unknown,
        }
    }
}

/// Classify a single line.
///
/// # Examples
///
/// ```
/// use plainbdd_patterns::{LineToken, StepKeyword, classify};
///
/// assert_eq!(
///     classify("  scenario:  Buying apples"),
///     LineToken::Scenario { label: "Buying apples" },
/// );
/// assert_eq!(
///     classify("And I pay"),
///     LineToken::Step { keyword: StepKeyword::And, text: "I pay" },
/// );
/// assert_eq!(classify("# a comment"), LineToken::Text);
/// ```
#[must_use]
pub fn classify(line: &str) -> LineToken<'_> {
    let token = classify_heading(line)
        .or_else(|| classify_step(line))
        .unwrap_or(LineToken::Text);
    log::trace!("classified {line:?} as {:?}", token.kind());
    token
}

fn classify_heading(line: &str) -> Option<LineToken<'_>> {
    let caps = HEADING_RE.captures(line)?;
    let label = caps.get(2)?.as_str();
    let kind = caps.get(1)?.as_str();
    if kind.eq_ignore_ascii_case("feature") {
        Some(LineToken::Feature { label })
    } else {
        Some(LineToken::Scenario { label })
    }
}

fn classify_step(line: &str) -> Option<LineToken<'_>> {
    let caps = STEP_RE.captures(line)?;
    let keyword = caps.get(1)?.as_str().parse().ok()?;
    let text = caps.get(2)?.as_str();
    Some(LineToken::Step { keyword, text })
}
