//! Per-step assertion recorder.
//!
//! A fresh [`Asserter`] is created by the dispatcher for every handler call
//! and dropped once the step has been classified. Handlers reach it through
//! [`StepContext`](crate::StepContext), so it cannot be used before a step
//! starts or after it returns.

use std::fmt::Debug;

/// Passes and failures recorded while a single step runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Asserter {
    passes: usize,
    failures: Vec<String>,
}

impl Asserter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful assertion.
    pub fn record_pass(&mut self) {
        self.passes += 1;
    }

    /// Record a failed assertion.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.failures.push(message.into());
    }

    /// Record a pass when `condition` holds, otherwise a failure with
    /// `message`.
    pub fn check(&mut self, condition: bool, message: impl Into<String>) {
        if condition {
            self.record_pass();
        } else {
            self.record_failure(message);
        }
    }

    /// Compare two values, recording a failure that shows both when they
    /// differ.
    ///
    /// # Examples
    /// ```
    /// use plainbdd::Asserter;
    ///
    /// let mut asserter = Asserter::new();
    /// asserter.check_eq(3, 2);
    /// assert_eq!(asserter.failures(), ["expected 3, got 2"]);
    /// ```
    pub fn check_eq<T: PartialEq + Debug>(&mut self, expected: T, actual: T) {
        if expected == actual {
            self.record_pass();
        } else {
            self.record_failure(format!("expected {expected:?}, got {actual:?}"));
        }
    }

    /// Number of passes recorded.
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Failure messages in the order they were recorded.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// `true` when nothing at all was recorded.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.passes == 0 && self.failures.is_empty()
    }

    pub(crate) fn into_failures(self) -> Vec<String> {
        self.failures
    }
}
