//! Line scanner and feature interpreter.
//!
//! The interpreter walks a script line by line and reacts to each
//! [`LineToken`]:
//!
//! - `Feature:` closes any open scenario, then reports the heading;
//! - `Scenario:` closes any open scenario, opens a new one, then reports the
//!   heading;
//! - `Given`/`When`/`Then` are remembered as the scenario's last keyword and
//!   dispatched;
//! - `And`/`But` are dispatched under the remembered keyword, and are fatal
//!   when nothing has been remembered;
//! - anything else is reported as plain text.
//!
//! Steps outside any scenario run without hooks. Their keyword is remembered
//! in a separate session that starts afresh at every heading, so it never
//! reaches into a scenario.
//!
//! End of input closes the open scenario the same way a `Feature:` line does.

use crate::reporting::{Reporter, report_step};
use crate::{
    FeatureLine, InterpretError, LifecycleError, LineToken, ScenarioExecutor, ScenarioLifecycle,
    ScenarioSession, feature_lines,
};

/// Drives an executor and a reporter over feature scripts.
///
/// # Examples
///
/// ```
/// use plainbdd::reporting::RecordingReporter;
/// use plainbdd::{Interpreter, NullExecutor};
///
/// let mut executor = NullExecutor;
/// let mut reporter = RecordingReporter::new();
/// Interpreter::new(&mut executor, &mut reporter)
///     .interpret("Feature: f\n  Scenario: s\n    Given a\n", "demo.feature")
///     .expect("well-formed script");
/// assert_eq!(reporter.labels(), [(1, "feature"), (2, "scenario"), (3, "missing")]);
/// ```
#[derive(Debug)]
pub struct Interpreter<'a, E: ScenarioExecutor + ?Sized, R: Reporter + ?Sized> {
    executor: &'a mut E,
    reporter: &'a mut R,
    lifecycle: ScenarioLifecycle,
    unscoped: ScenarioSession,
}

impl<'a, E: ScenarioExecutor + ?Sized, R: Reporter + ?Sized> Interpreter<'a, E, R> {
    /// Bind an executor and a reporter.
    pub fn new(executor: &'a mut E, reporter: &'a mut R) -> Self {
        Self {
            executor,
            reporter,
            lifecycle: ScenarioLifecycle::new(),
            unscoped: ScenarioSession::new(),
        }
    }

    /// Interpret `text`, attributing its lines to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpretError`] for a dangling `And`/`But` or a failing
    /// lifecycle hook. Interpretation stops at the offending line and no
    /// further hooks run.
    pub fn interpret(&mut self, text: &str, source: &str) -> Result<(), InterpretError> {
        let mut last_line = 0;
        for line in feature_lines(text, source) {
            last_line = line.number;
            self.accept(line)?;
        }
        self.finish(source, last_line)
    }

    /// Process a single line.
    ///
    /// # Errors
    ///
    /// See [`interpret`](Self::interpret).
    pub fn accept(&mut self, line: FeatureLine<'_>) -> Result<(), InterpretError> {
        match line.token() {
            LineToken::Feature { label } => {
                self.close(line.source, line.number)?;
                self.unscoped = ScenarioSession::new();
                self.reporter.on_feature_heading(line, label);
            }
            LineToken::Scenario { label } => {
                let opened = self.lifecycle.open(&mut *self.executor);
                opened.map_err(|err| lifecycle_error(line.source, line.number, err))?;
                self.unscoped = ScenarioSession::new();
                self.reporter.on_scenario_heading(line, label);
            }
            LineToken::Step { keyword, text } => {
                let resolved = match self.lifecycle.session_mut() {
                    Some(session) => session.resolve(keyword),
                    None => {
                        log::debug!("{line}: {keyword} step outside any scenario");
                        self.unscoped.resolve(keyword)
                    }
                };
                let Some(resolved) = resolved else {
                    return Err(InterpretError::DanglingConjunction {
                        keyword,
                        source_id: line.source.to_owned(),
                        line_number: line.number,
                        line: line.text.to_owned(),
                    });
                };
                let result = self.executor.execute(resolved, text);
                report_step(&mut *self.reporter, line, &result);
            }
            LineToken::Text => self.reporter.on_plain_text(line),
        }
        Ok(())
    }

    /// Close the open scenario at end of input.
    ///
    /// `last_line` is the number of the final line, used to locate a
    /// tear-down failure.
    ///
    /// # Errors
    ///
    /// Returns [`InterpretError::Lifecycle`] when tear-down fails.
    pub fn finish(&mut self, source: &str, last_line: usize) -> Result<(), InterpretError> {
        self.close(source, last_line)
    }

    /// Scenario bookkeeping for the script so far.
    #[must_use]
    pub fn lifecycle(&self) -> &ScenarioLifecycle {
        &self.lifecycle
    }

    fn close(&mut self, source: &str, line_number: usize) -> Result<(), InterpretError> {
        self.lifecycle
            .close(&mut *self.executor)
            .map_err(|err| lifecycle_error(source, line_number, err))
    }
}

fn lifecycle_error(source: &str, line_number: usize, err: LifecycleError) -> InterpretError {
    InterpretError::Lifecycle {
        source_id: source.to_owned(),
        line_number,
        source: err,
    }
}

/// Interpret `text` with a one-off [`Interpreter`].
///
/// # Errors
///
/// See [`Interpreter::interpret`].
pub fn interpret<E, R>(
    executor: &mut E,
    reporter: &mut R,
    text: &str,
    source: &str,
) -> Result<(), InterpretError>
where
    E: ScenarioExecutor + ?Sized,
    R: Reporter + ?Sized,
{
    Interpreter::new(executor, reporter).interpret(text, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::RecordingReporter;
    use crate::{HookError, NullExecutor, StepKeyword, StepResult};
    use rstest::rstest;

    #[derive(Debug, Default)]
    struct Spy {
        calls: Vec<String>,
    }

    impl ScenarioExecutor for Spy {
        fn begin_scenario(&mut self) -> Result<(), HookError> {
            self.calls.push("begin".into());
            Ok(())
        }

        fn end_scenario(&mut self) -> Result<(), HookError> {
            self.calls.push("end".into());
            Ok(())
        }

        fn execute(&mut self, keyword: StepKeyword, text: &str) -> StepResult {
            self.calls.push(format!("{keyword} {text}"));
            StepResult::Pass {
                output: String::new(),
            }
        }
    }

    #[test]
    fn steps_before_any_scenario_run_without_hooks() {
        let mut spy = Spy::default();
        let mut reporter = RecordingReporter::new();
        let outcome = interpret(&mut spy, &mut reporter, "Given a\nWhen b\n", "t");
        assert!(outcome.is_ok());
        assert_eq!(spy.calls, ["Given a", "When b"]);
    }

    #[rstest]
    #[case("Given a\nAnd b\n")]
    #[case("Feature: f\nGiven a\nAnd b\n")]
    fn conjunction_before_any_scenario_follows_the_previous_step(#[case] script: &str) {
        let mut spy = Spy::default();
        let mut reporter = RecordingReporter::new();
        assert!(interpret(&mut spy, &mut reporter, script, "t").is_ok());
        assert_eq!(spy.calls, ["Given a", "Given b"]);
    }

    #[rstest]
    #[case("And b\n", 1)]
    #[case("Given a\nFeature: f\nBut b\n", 3)]
    fn leading_conjunction_outside_a_scenario_is_fatal(
        #[case] script: &str,
        #[case] line: usize,
    ) {
        let mut spy = Spy::default();
        let mut reporter = RecordingReporter::new();
        let outcome = interpret(&mut spy, &mut reporter, script, "t");
        assert!(matches!(
            outcome,
            Err(InterpretError::DanglingConjunction { line_number, .. }) if line_number == line
        ));
        assert!(!spy.calls.iter().any(|call| call.ends_with(" b")));
    }

    #[test]
    fn keyword_before_a_scenario_does_not_reach_into_it() {
        let mut spy = Spy::default();
        let mut reporter = RecordingReporter::new();
        let outcome = interpret(&mut spy, &mut reporter, "Given a\nScenario: s\nAnd b\n", "t");
        assert!(matches!(
            outcome,
            Err(InterpretError::DanglingConjunction { line_number: 3, .. })
        ));
        assert_eq!(spy.calls, ["Given a", "begin"]);
    }

    #[test]
    fn feature_heading_closes_the_scenario_before_reporting() {
        let mut spy = Spy::default();
        let mut reporter = RecordingReporter::new();
        let mut interpreter = Interpreter::new(&mut spy, &mut reporter);
        let script = "Scenario: one\nGiven a\nFeature: next\n";
        assert!(interpreter.interpret(script, "t").is_ok());
        assert_eq!(interpreter.lifecycle().opened(), 1);
        assert_eq!(interpreter.lifecycle().closed(), 1);
        assert_eq!(spy.calls, ["begin", "Given a", "end"]);
    }

    #[test]
    fn empty_input_touches_nothing() {
        let mut executor = NullExecutor;
        let mut reporter = RecordingReporter::new();
        assert!(interpret(&mut executor, &mut reporter, "", "t").is_ok());
        assert!(reporter.events().is_empty());
    }
}
