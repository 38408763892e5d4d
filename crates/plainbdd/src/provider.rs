//! Step-definition providers.
//!
//! A provider pairs a world value (the state steps operate on) with the
//! [`StepRegistry`] declaring its patterns. The interpreter only sees the
//! object-safe [`ScenarioExecutor`] trait, so a runner can pick providers of
//! different world types per feature file at run time.

use crate::dispatch::dispatch_with;
use crate::{HookError, RegistryError, StepKeyword, StepRegistry, StepResult};

/// Set-up and tear-down hooks run around every scenario.
///
/// Both default to doing nothing.
pub trait ScenarioHooks {
    /// Called when a `Scenario:` line opens a scenario.
    ///
    /// # Errors
    ///
    /// A failing hook aborts interpretation.
    fn set_up(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    /// Called when a scenario closes at the next heading or end of input.
    ///
    /// # Errors
    ///
    /// A failing hook aborts interpretation.
    fn tear_down(&mut self) -> Result<(), HookError> {
        Ok(())
    }
}

/// World types that declare their own step definitions.
pub trait StepDefinitions: ScenarioHooks + Sized {
    /// Register every step definition, in precedence order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RegistryError`] raised while registering.
    fn register(steps: &mut StepRegistry<Self>) -> Result<(), RegistryError>;
}

/// The capability the interpreter drives.
pub trait ScenarioExecutor {
    /// Open a scenario.
    ///
    /// # Errors
    ///
    /// Returns the set-up hook's error.
    fn begin_scenario(&mut self) -> Result<(), HookError>;

    /// Close a scenario.
    ///
    /// # Errors
    ///
    /// Returns the tear-down hook's error.
    fn end_scenario(&mut self) -> Result<(), HookError>;

    /// Execute one step under an already-resolved keyword.
    fn execute(&mut self, keyword: StepKeyword, text: &str) -> StepResult;
}

impl<E: ScenarioExecutor + ?Sized> ScenarioExecutor for Box<E> {
    fn begin_scenario(&mut self) -> Result<(), HookError> {
        (**self).begin_scenario()
    }

    fn end_scenario(&mut self) -> Result<(), HookError> {
        (**self).end_scenario()
    }

    fn execute(&mut self, keyword: StepKeyword, text: &str) -> StepResult {
        (**self).execute(keyword, text)
    }
}

/// A world value together with its step definitions.
///
/// # Examples
///
/// ```
/// use plainbdd::{
///     RegistryError, ScenarioExecutor, ScenarioHooks, StepDefinitions, StepKeyword,
///     StepProvider, StepRegistry, StepResult,
/// };
///
/// #[derive(Default)]
/// struct Lamp {
///     on: bool,
/// }
///
/// impl ScenarioHooks for Lamp {}
///
/// impl StepDefinitions for Lamp {
///     fn register(steps: &mut StepRegistry<Self>) -> Result<(), RegistryError> {
///         steps.when("^I flip the switch$", |lamp, _| {
///             lamp.on = !lamp.on;
///             Ok(())
///         })?;
///         Ok(())
///     }
/// }
///
/// let mut provider = StepProvider::build(Lamp::default()).expect("valid steps");
/// let result = provider.execute(StepKeyword::When, "I flip the switch");
/// assert_eq!(result, StepResult::Pass { output: String::new() });
/// assert!(provider.world().on);
/// ```
#[derive(Debug)]
pub struct StepProvider<W> {
    registry: StepRegistry<W>,
    world: W,
}

impl<W> StepProvider<W> {
    /// Pair a world with an already-built registry.
    #[must_use]
    pub fn new(world: W, registry: StepRegistry<W>) -> Self {
        Self { registry, world }
    }

    /// Build the registry declared by `W` and pair it with `world`.
    ///
    /// # Errors
    ///
    /// Returns the first registration failure.
    pub fn build(world: W) -> Result<Self, RegistryError>
    where
        W: StepDefinitions,
    {
        let mut registry = StepRegistry::new();
        W::register(&mut registry)?;
        log::debug!("registered {} step definition(s)", registry.len());
        Ok(Self::new(world, registry))
    }

    /// Step definitions.
    #[must_use]
    pub fn registry(&self) -> &StepRegistry<W> {
        &self.registry
    }

    /// Shared access to the world.
    #[must_use]
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Exclusive access to the world.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Consume the provider, returning the world.
    pub fn into_world(self) -> W {
        self.world
    }

    pub(crate) fn parts(&mut self) -> (&StepRegistry<W>, &mut W) {
        (&self.registry, &mut self.world)
    }
}

impl<W: ScenarioHooks> ScenarioExecutor for StepProvider<W> {
    fn begin_scenario(&mut self) -> Result<(), HookError> {
        self.world.set_up()
    }

    fn end_scenario(&mut self) -> Result<(), HookError> {
        self.world.tear_down()
    }

    fn execute(&mut self, keyword: StepKeyword, text: &str) -> StepResult {
        dispatch_with(&self.registry, &mut self.world, keyword, text)
    }
}

/// Executor used when a feature file has no provider: hooks do nothing and
/// every step is missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullExecutor;

impl ScenarioExecutor for NullExecutor {
    fn begin_scenario(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    fn end_scenario(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    fn execute(&mut self, keyword: StepKeyword, _text: &str) -> StepResult {
        StepResult::Missing { keyword }
    }
}
