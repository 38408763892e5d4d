//! Plain-text Given/When/Then feature interpreter.
//!
//! Feature scripts are read line by line. `Feature:` and `Scenario:` lines
//! structure the file, `Given`/`When`/`Then`/`And`/`But` lines are steps and
//! everything else is narrative text. Each step is matched against the
//! regular expressions registered by a step provider, the first match in
//! declaration order runs, and its outcome is classified as passed, failed,
//! missing or "no assertions" before being handed to a [`Reporter`].
//!
//! ```
//! use plainbdd::reporting::RecordingReporter;
//! use plainbdd::{
//!     RegistryError, ScenarioHooks, StepDefinitions, StepProvider, StepRegistry, interpret,
//! };
//!
//! #[derive(Default)]
//! struct Basket {
//!     apples: u32,
//! }
//!
//! impl ScenarioHooks for Basket {
//!     fn set_up(&mut self) -> Result<(), plainbdd::HookError> {
//!         self.apples = 0;
//!         Ok(())
//!     }
//! }
//!
//! impl StepDefinitions for Basket {
//!     fn register(steps: &mut StepRegistry<Self>) -> Result<(), RegistryError> {
//!         steps
//!             .given(r"^I have (\d+) apples?$", |basket, step| {
//!                 basket.apples = step.parse(0)?;
//!                 Ok(())
//!             })?
//!             .then(r"^I should have (\d+) apples?$", |basket, step| {
//!                 let expected: u32 = step.parse(0)?;
//!                 step.check_eq(expected, basket.apples);
//!                 Ok(())
//!             })?;
//!         Ok(())
//!     }
//! }
//!
//! let script = "\
//! Feature: Basket
//!   Scenario: Counting
//!     Given I have 2 apples
//!     Then I should have 2 apples
//! ";
//! let mut provider = StepProvider::build(Basket::default()).expect("valid steps");
//! let mut reporter = RecordingReporter::new();
//! interpret(&mut provider, &mut reporter, script, "basket.feature").expect("well-formed");
//! assert_eq!(
//!     reporter.labels(),
//!     [(1, "feature"), (2, "scenario"), (3, "passed"), (4, "passed")]
//! );
//! ```

pub mod advise;
mod asserter;
mod context;
mod dispatch;
mod error;
mod interpreter;
mod lifecycle;
mod panic;
mod provider;
mod registry;
pub mod reporting;
pub mod runner;

pub use asserter::Asserter;
pub use context::StepContext;
pub use dispatch::{FailureDetail, OUTPUT_DIVIDER, StepResult, dispatch, render_failure};
pub use error::{HookError, InterpretError, LifecycleError, RegistryError, RunError, StepError};
pub use interpreter::{Interpreter, interpret};
pub use lifecycle::{ScenarioLifecycle, ScenarioSession};
pub use panic::panic_message;
pub use plainbdd_patterns::{
    FeatureLine, LineKind, LineToken, PatternError, StepKeyword, StepKeywordParseError, classify,
    feature_lines, literal_pattern,
};
pub use provider::{NullExecutor, ScenarioExecutor, ScenarioHooks, StepDefinitions, StepProvider};
pub use registry::{Resolved, StepDefinition, StepFn, StepRegistry};
pub use reporting::{Reporter, Tally};
pub use runner::{FeatureFileRunner, FeatureRunner, ProviderCatalog, RunSummary};
