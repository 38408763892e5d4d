//! Scenario lifecycle control.
//!
//! A scenario opens at a `Scenario:` line and closes at the next heading or
//! at end of input. [`ScenarioLifecycle`] runs the executor's hooks at those
//! boundaries and owns the [`ScenarioSession`] that carries the `And`/`But`
//! resolution state, so that state never leaks from one scenario into the
//! next.

use crate::{LifecycleError, ScenarioExecutor, StepKeyword};

/// State scoped to one open scenario.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScenarioSession {
    last_keyword: Option<StepKeyword>,
}

impl ScenarioSession {
    /// Start a session with no remembered keyword.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `keyword` against the last primary keyword of this session.
    ///
    /// Primary keywords are remembered and returned unchanged. `And`/`But`
    /// return the remembered keyword, or `None` when no primary keyword has
    /// run yet.
    #[must_use]
    pub fn resolve(&mut self, keyword: StepKeyword) -> Option<StepKeyword> {
        keyword.resolve(&mut self.last_keyword)
    }

    /// Last primary keyword executed in this session.
    #[must_use]
    pub fn last_keyword(&self) -> Option<StepKeyword> {
        self.last_keyword
    }
}

/// Opens and closes scenarios around an executor.
///
/// At most one session is open at a time. `close` is a no-op when nothing
/// is open, so feature headings and end of input can share it.
#[derive(Debug, Default)]
pub struct ScenarioLifecycle {
    session: Option<ScenarioSession>,
    opened: usize,
    closed: usize,
}

impl ScenarioLifecycle {
    /// Create a controller with no open scenario.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Close any open scenario, then run set-up and open a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TearDown`] when closing the previous
    /// scenario fails, and [`LifecycleError::SetUp`] when set-up fails. A
    /// scenario whose set-up failed is not marked open.
    pub fn open<E>(&mut self, executor: &mut E) -> Result<(), LifecycleError>
    where
        E: ScenarioExecutor + ?Sized,
    {
        self.close(executor)?;
        executor.begin_scenario().map_err(LifecycleError::SetUp)?;
        self.session = Some(ScenarioSession::new());
        self.opened += 1;
        log::debug!("scenario opened ({} so far)", self.opened);
        Ok(())
    }

    /// Run tear-down for the open scenario, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TearDown`] when the hook fails. The
    /// scenario counts as closed either way.
    pub fn close<E>(&mut self, executor: &mut E) -> Result<(), LifecycleError>
    where
        E: ScenarioExecutor + ?Sized,
    {
        if self.session.take().is_none() {
            return Ok(());
        }
        self.closed += 1;
        log::debug!("scenario closed ({} so far)", self.closed);
        executor.end_scenario().map_err(LifecycleError::TearDown)
    }

    /// Session of the open scenario.
    pub fn session_mut(&mut self) -> Option<&mut ScenarioSession> {
        self.session.as_mut()
    }

    /// `true` while a scenario is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Number of scenarios opened so far.
    #[must_use]
    pub fn opened(&self) -> usize {
        self.opened
    }

    /// Number of scenarios closed so far.
    #[must_use]
    pub fn closed(&self) -> usize {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HookError, StepResult};
    use rstest::rstest;

    #[derive(Debug, Default)]
    struct Hooks {
        events: Vec<&'static str>,
        fail_set_up: bool,
        fail_tear_down: bool,
    }

    impl ScenarioExecutor for Hooks {
        fn begin_scenario(&mut self) -> Result<(), HookError> {
            self.events.push("begin");
            if self.fail_set_up {
                return Err(HookError::new("no database"));
            }
            Ok(())
        }

        fn end_scenario(&mut self) -> Result<(), HookError> {
            self.events.push("end");
            if self.fail_tear_down {
                return Err(HookError::new("still locked"));
            }
            Ok(())
        }

        fn execute(&mut self, keyword: StepKeyword, _text: &str) -> StepResult {
            StepResult::Missing { keyword }
        }
    }

    #[test]
    fn close_without_open_scenario_is_a_no_op() {
        let mut hooks = Hooks::default();
        let mut lifecycle = ScenarioLifecycle::new();
        assert!(lifecycle.close(&mut hooks).is_ok());
        assert!(hooks.events.is_empty());
        assert_eq!(lifecycle.closed(), 0);
    }

    #[test]
    fn reopening_tears_down_first() {
        let mut hooks = Hooks::default();
        let mut lifecycle = ScenarioLifecycle::new();
        assert!(lifecycle.open(&mut hooks).is_ok());
        assert!(lifecycle.open(&mut hooks).is_ok());
        assert!(lifecycle.close(&mut hooks).is_ok());
        assert!(lifecycle.close(&mut hooks).is_ok());
        assert_eq!(hooks.events, ["begin", "end", "begin", "end"]);
        assert_eq!((lifecycle.opened(), lifecycle.closed()), (2, 2));
    }

    #[test]
    fn failed_set_up_leaves_nothing_open() {
        let mut hooks = Hooks {
            fail_set_up: true,
            ..Hooks::default()
        };
        let mut lifecycle = ScenarioLifecycle::new();
        assert_eq!(
            lifecycle.open(&mut hooks),
            Err(LifecycleError::SetUp(HookError::new("no database")))
        );
        assert!(!lifecycle.is_open());
        assert_eq!(lifecycle.opened(), 0);
    }

    #[test]
    fn failed_tear_down_still_closes() {
        let mut hooks = Hooks {
            fail_tear_down: true,
            ..Hooks::default()
        };
        let mut lifecycle = ScenarioLifecycle::new();
        assert!(lifecycle.open(&mut hooks).is_ok());
        assert!(matches!(
            lifecycle.close(&mut hooks),
            Err(LifecycleError::TearDown(_))
        ));
        assert!(!lifecycle.is_open());
        assert!(lifecycle.close(&mut hooks).is_ok());
        assert_eq!(hooks.events, ["begin", "end"]);
    }

    #[rstest]
    #[case(&[StepKeyword::Given, StepKeyword::And], &[Some(StepKeyword::Given), Some(StepKeyword::Given)])]
    #[case(&[StepKeyword::But], &[None])]
    #[case(
        &[StepKeyword::When, StepKeyword::Then, StepKeyword::But],
        &[Some(StepKeyword::When), Some(StepKeyword::Then), Some(StepKeyword::Then)]
    )]
    fn session_resolves_conjunctions(
        #[case] written: &[StepKeyword],
        #[case] expected: &[Option<StepKeyword>],
    ) {
        let mut session = ScenarioSession::new();
        let resolved: Vec<_> = written.iter().map(|kw| session.resolve(*kw)).collect();
        assert_eq!(resolved, expected);
    }

    #[test]
    fn new_scenario_forgets_the_last_keyword() {
        let mut hooks = Hooks::default();
        let mut lifecycle = ScenarioLifecycle::new();
        assert!(lifecycle.open(&mut hooks).is_ok());
        if let Some(session) = lifecycle.session_mut() {
            let _ = session.resolve(StepKeyword::Given);
        }
        assert!(lifecycle.open(&mut hooks).is_ok());
        assert_eq!(
            lifecycle.session_mut().and_then(|s| s.last_keyword()),
            None
        );
    }
}
