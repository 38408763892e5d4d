//! Reporting of interpreted lines.
//!
//! The interpreter calls exactly one [`Reporter`] method per input line, in
//! line order, and forwards advice once a file has finished. Rendering is
//! entirely up to the implementation: [`ConsoleReporter`] prints the
//! coloured transcript, [`RecordingReporter`] keeps events in memory and
//! `JsonReporter` (behind the `json` feature) emits a machine-readable
//! document.

use std::fmt;

use crate::{FailureDetail, FeatureLine, StepKeyword, StepResult};

/// Coloured console transcript.
pub mod console;
/// JSON document writer.
#[cfg(feature = "json")]
pub mod json;
/// In-memory event log.
pub mod record;

pub use console::ConsoleReporter;
#[cfg(feature = "json")]
pub use json::JsonReporter;
pub use record::{RecordingReporter, ReportedEvent, ReportedLine};

/// Receives one callback per interpreted line.
pub trait Reporter {
    /// A `Feature:` heading.
    fn on_feature_heading(&mut self, line: FeatureLine<'_>, label: &str);

    /// A `Scenario:` heading; the scenario has already been set up.
    fn on_scenario_heading(&mut self, line: FeatureLine<'_>, label: &str);

    /// A line that is neither a heading nor a step.
    fn on_plain_text(&mut self, line: FeatureLine<'_>);

    /// A step that passed.
    fn on_pass(&mut self, line: FeatureLine<'_>, output: &str);

    /// A step that failed.
    fn on_fail(&mut self, line: FeatureLine<'_>, output: &str, detail: &FailureDetail);

    /// A step without a matching definition.
    fn on_missing(&mut self, line: FeatureLine<'_>, keyword: StepKeyword);

    /// A `Then` step that asserted nothing.
    fn on_no_assertions(&mut self, line: FeatureLine<'_>, output: &str);

    /// Advice about a feature file or the features directory.
    fn on_advise(&mut self, source: &str, message: &str) {
        let _ = (source, message);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn on_feature_heading(&mut self, line: FeatureLine<'_>, label: &str) {
        (**self).on_feature_heading(line, label);
    }

    fn on_scenario_heading(&mut self, line: FeatureLine<'_>, label: &str) {
        (**self).on_scenario_heading(line, label);
    }

    fn on_plain_text(&mut self, line: FeatureLine<'_>) {
        (**self).on_plain_text(line);
    }

    fn on_pass(&mut self, line: FeatureLine<'_>, output: &str) {
        (**self).on_pass(line, output);
    }

    fn on_fail(&mut self, line: FeatureLine<'_>, output: &str, detail: &FailureDetail) {
        (**self).on_fail(line, output, detail);
    }

    fn on_missing(&mut self, line: FeatureLine<'_>, keyword: StepKeyword) {
        (**self).on_missing(line, keyword);
    }

    fn on_no_assertions(&mut self, line: FeatureLine<'_>, output: &str) {
        (**self).on_no_assertions(line, output);
    }

    fn on_advise(&mut self, source: &str, message: &str) {
        (**self).on_advise(source, message);
    }
}

/// Forward a classified step result to the matching callback.
pub fn report_step<R: Reporter + ?Sized>(reporter: &mut R, line: FeatureLine<'_>, result: &StepResult) {
    match result {
        StepResult::Pass { output } => reporter.on_pass(line, output),
        StepResult::Fail { output, detail } => reporter.on_fail(line, output, detail),
        StepResult::Missing { keyword } => reporter.on_missing(line, *keyword),
        StepResult::NoAssertions { output } => reporter.on_no_assertions(line, output),
    }
}

/// Counts of scenarios and classified steps.
///
/// `Tally` is itself a [`Reporter`], so it can be fed the same callbacks as
/// any other reporter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Tally {
    /// Scenario headings seen.
    pub scenarios: usize,
    /// Passed steps.
    pub passed: usize,
    /// Failed steps.
    pub failed: usize,
    /// Steps with no matching definition.
    pub missing: usize,
    /// `Then` steps that asserted nothing.
    pub no_assertions: usize,
}

impl Tally {
    /// Count one step result.
    pub fn record(&mut self, result: &StepResult) {
        match result {
            StepResult::Pass { .. } => self.passed += 1,
            StepResult::Fail { .. } => self.failed += 1,
            StepResult::Missing { .. } => self.missing += 1,
            StepResult::NoAssertions { .. } => self.no_assertions += 1,
        }
    }

    /// Add another tally into this one.
    pub fn merge(&mut self, other: &Self) {
        self.scenarios += other.scenarios;
        self.passed += other.passed;
        self.failed += other.failed;
        self.missing += other.missing;
        self.no_assertions += other.no_assertions;
    }

    /// Total number of steps counted.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.passed + self.failed + self.missing + self.no_assertions
    }

    /// `true` when at least one step failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scenario(s), {} step(s): {} passed, {} failed, {} missing, {} without assertions",
            self.scenarios,
            self.steps(),
            self.passed,
            self.failed,
            self.missing,
            self.no_assertions,
        )
    }
}

impl Reporter for Tally {
    fn on_feature_heading(&mut self, _line: FeatureLine<'_>, _label: &str) {}

    fn on_scenario_heading(&mut self, _line: FeatureLine<'_>, _label: &str) {
        self.scenarios += 1;
    }

    fn on_plain_text(&mut self, _line: FeatureLine<'_>) {}

    fn on_pass(&mut self, _line: FeatureLine<'_>, _output: &str) {
        self.passed += 1;
    }

    fn on_fail(&mut self, _line: FeatureLine<'_>, _output: &str, _detail: &FailureDetail) {
        self.failed += 1;
    }

    fn on_missing(&mut self, _line: FeatureLine<'_>, _keyword: StepKeyword) {
        self.missing += 1;
    }

    fn on_no_assertions(&mut self, _line: FeatureLine<'_>, _output: &str) {
        self.no_assertions += 1;
    }
}
