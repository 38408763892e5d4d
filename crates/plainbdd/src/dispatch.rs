//! Step dispatch and outcome classification.
//!
//! [`dispatch`] runs one step: it resolves the first matching definition,
//! calls the handler with a fresh [`Asserter`] and output buffer, and turns
//! what happened into exactly one [`StepResult`]:
//!
//! 1. no definition matched: [`StepResult::Missing`], nothing runs;
//! 2. the handler returned an error or panicked: [`StepResult::Fail`] with
//!    the error text and no output;
//! 3. any recorded failure: [`StepResult::Fail`], even if passes were also
//!    recorded;
//! 4. a `Then` step that recorded nothing: [`StepResult::NoAssertions`];
//! 5. otherwise [`StepResult::Pass`].

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::{Asserter, StepContext, StepError, StepKeyword, StepProvider, StepRegistry, panic_message};

/// Divider placed between captured output and failure messages.
pub const OUTPUT_DIVIDER: &str = "\n---\n";

/// Why a step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(tag = "kind", rename_all = "snake_case"))]
pub enum FailureDetail {
    /// Failures recorded through the asserter, in order.
    Assertions {
        /// Recorded failure messages.
        messages: Vec<String>,
    },
    /// The handler returned an error or panicked.
    Error {
        /// Description of the error.
        message: String,
    },
}

impl FailureDetail {
    /// Convenience constructor for recorded assertion failures.
    #[must_use]
    pub fn assertions<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Assertions {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Convenience constructor for an unhandled error.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assertions { messages } => f.write_str(&messages.join("\n")),
            Self::Error { message } => f.write_str(message),
        }
    }
}

/// Classified outcome of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum StepResult {
    /// The handler ran without failures.
    Pass {
        /// Text the handler wrote.
        output: String,
    },
    /// The handler recorded failures or raised an error.
    Fail {
        /// Text the handler wrote; empty when it raised an error.
        output: String,
        /// What went wrong.
        detail: FailureDetail,
    },
    /// No definition matched the step text.
    Missing {
        /// Keyword the lookup ran under, after conjunction resolution.
        keyword: StepKeyword,
    },
    /// A `Then` step ran but asserted nothing.
    NoAssertions {
        /// Text the handler wrote.
        output: String,
    },
}

impl StepResult {
    /// Lowercase label for the variant.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass { .. } => "passed",
            Self::Fail { .. } => "failed",
            Self::Missing { .. } => "missing",
            Self::NoAssertions { .. } => "no_assertions",
        }
    }

    /// Captured output, empty for missing steps.
    #[must_use]
    pub fn output(&self) -> &str {
        match self {
            Self::Pass { output } | Self::Fail { output, .. } | Self::NoAssertions { output } => {
                output
            }
            Self::Missing { .. } => "",
        }
    }

    /// `true` for [`StepResult::Fail`].
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

/// Render captured output and a failure detail as one message.
///
/// The [`OUTPUT_DIVIDER`] appears only when there is output to separate.
///
/// # Examples
/// ```
/// use plainbdd::{FailureDetail, render_failure};
///
/// let detail = FailureDetail::assertions(["expected 3, got 2"]);
/// assert_eq!(render_failure("", &detail), "expected 3, got 2");
/// assert_eq!(render_failure("log", &detail), "log\n---\nexpected 3, got 2");
/// ```
#[must_use]
pub fn render_failure(output: &str, detail: &FailureDetail) -> String {
    if output.is_empty() {
        detail.to_string()
    } else {
        format!("{output}{OUTPUT_DIVIDER}{detail}")
    }
}

/// Execute `text` under `keyword` against `provider`.
///
/// `keyword` must already be resolved: conjunctions never match a
/// definition and come back as [`StepResult::Missing`].
pub fn dispatch<W>(provider: &mut StepProvider<W>, keyword: StepKeyword, text: &str) -> StepResult {
    let (registry, world) = provider.parts();
    dispatch_with(registry, world, keyword, text)
}

pub(crate) fn dispatch_with<W>(
    registry: &StepRegistry<W>,
    world: &mut W,
    keyword: StepKeyword,
    text: &str,
) -> StepResult {
    let Some(resolved) = registry.resolve(keyword, text) else {
        log::debug!("no {keyword} definition matches {text:?}");
        return StepResult::Missing { keyword };
    };
    let definition = resolved.definition;
    log::debug!("{keyword} {text:?} matched {:?}", definition.pattern());

    let mut asserter = Asserter::new();
    let mut output = String::new();
    let handler = definition.handler();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let mut ctx = StepContext::new(&resolved.captures, &mut asserter, &mut output);
        handler(world, &mut ctx)
    }));

    let error = match outcome {
        Ok(Ok(())) => None,
        Ok(Err(err)) => Some(err),
        Err(payload) => Some(StepError::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    };
    if let Some(err) = error {
        log::warn!("{keyword} {text:?} raised: {err}");
        return StepResult::Fail {
            output: String::new(),
            detail: FailureDetail::error(err.to_string()),
        };
    }

    classify(keyword, asserter, output)
}

fn classify(keyword: StepKeyword, asserter: Asserter, output: String) -> StepResult {
    if !asserter.failures().is_empty() {
        return StepResult::Fail {
            output,
            detail: FailureDetail::Assertions {
                messages: asserter.into_failures(),
            },
        };
    }
    if keyword == StepKeyword::Then && asserter.passes() == 0 {
        return StepResult::NoAssertions { output };
    }
    StepResult::Pass { output }
}
