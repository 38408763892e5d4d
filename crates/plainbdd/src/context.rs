//! Handler-facing view of a single step invocation.
//!
//! `StepContext` bundles the three things a handler may touch while it runs:
//! the capture groups of the matched pattern, the step's [`Asserter`], and
//! the output sink. Text written through [`fmt::Write`] ends up in the
//! classified result instead of the process's stdout.

use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::{Asserter, StepError};

/// Context passed to step handlers.
///
/// # Examples
///
/// ```
/// use std::fmt::Write;
/// use plainbdd::{Asserter, StepContext};
///
/// let captures = vec!["2".to_string(), "apples".to_string()];
/// let mut asserter = Asserter::new();
/// let mut output = String::new();
/// let mut step = StepContext::new(&captures, &mut asserter, &mut output);
///
/// let count: u32 = step.parse(0).expect("numeric capture");
/// writeln!(step, "counted {count}").expect("writing to a String cannot fail");
/// step.check(count == 2, "expected two");
///
/// assert_eq!(step.output(), "counted 2\n");
/// assert_eq!(asserter.passes(), 1);
/// ```
pub struct StepContext<'a> {
    captures: &'a [String],
    asserter: &'a mut Asserter,
    output: &'a mut String,
}

impl<'a> StepContext<'a> {
    /// Bind captures, an asserter and an output buffer for one invocation.
    pub fn new(captures: &'a [String], asserter: &'a mut Asserter, output: &'a mut String) -> Self {
        Self {
            captures,
            asserter,
            output,
        }
    }

    /// All captures in pattern order, excluding the whole match.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        self.captures
    }

    /// Capture at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Argument`] when the pattern has fewer groups.
    pub fn capture(&self, index: usize) -> Result<&str, StepError> {
        self.captures
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| StepError::Argument {
                index,
                message: format!("pattern captured only {} group(s)", self.captures.len()),
            })
    }

    /// Parse the capture at `index` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Argument`] when the capture is missing or does
    /// not parse.
    pub fn parse<T>(&self, index: usize) -> Result<T, StepError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.capture(index)?;
        raw.parse().map_err(|err| StepError::Argument {
            index,
            message: format!("cannot parse {raw:?}: {err}"),
        })
    }

    /// Record a successful assertion.
    pub fn pass(&mut self) {
        self.asserter.record_pass();
    }

    /// Record a failed assertion.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.asserter.record_failure(message);
    }

    /// See [`Asserter::check`].
    pub fn check(&mut self, condition: bool, message: impl Into<String>) {
        self.asserter.check(condition, message);
    }

    /// See [`Asserter::check_eq`].
    pub fn check_eq<T: PartialEq + Debug>(&mut self, expected: T, actual: T) {
        self.asserter.check_eq(expected, actual);
    }

    /// Read-only view of the step's asserter.
    #[must_use]
    pub fn asserter(&self) -> &Asserter {
        self.asserter
    }

    /// Text written so far.
    #[must_use]
    pub fn output(&self) -> &str {
        self.output
    }
}

impl fmt::Write for StepContext<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl Debug for StepContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepContext")
            .field("captures", &self.captures)
            .field("asserter", &self.asserter)
            .field("output", &self.output)
            .finish()
    }
}
