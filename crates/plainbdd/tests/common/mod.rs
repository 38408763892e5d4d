//! Step providers shared by the integration tests.
//!
//! Every test binary compiles this module on its own and uses only part of
//! it, so unused helpers are expected.
#![allow(
    clippy::allow_attributes,
    reason = "dead code varies per test binary, so it cannot be an expectation"
)]
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::fmt::Write as _;

use plainbdd::{
    HookError, RegistryError, ScenarioExecutor, ScenarioHooks, StepContext, StepDefinitions,
    StepError, StepKeyword, StepRegistry, StepResult,
};

/// World counting apples, with hooks that keep a log.
#[derive(Debug, Default)]
pub struct ShoppingCart {
    /// Apples currently in the cart.
    pub apples: u32,
    /// Set-up hook calls.
    pub set_ups: usize,
    /// Tear-down hook calls.
    pub tear_downs: usize,
}

impl ScenarioHooks for ShoppingCart {
    fn set_up(&mut self) -> Result<(), HookError> {
        self.set_ups += 1;
        self.apples = 0;
        Ok(())
    }

    fn tear_down(&mut self) -> Result<(), HookError> {
        self.tear_downs += 1;
        Ok(())
    }
}

fn have(cart: &mut ShoppingCart, step: &mut StepContext<'_>) -> Result<(), StepError> {
    cart.apples = step.parse(0)?;
    step.pass();
    Ok(())
}

fn eat(cart: &mut ShoppingCart, step: &mut StepContext<'_>) -> Result<(), StepError> {
    let eaten: u32 = step.parse(0)?;
    cart.apples = cart.apples.saturating_sub(eaten);
    Ok(())
}

fn should_have(cart: &mut ShoppingCart, step: &mut StepContext<'_>) -> Result<(), StepError> {
    let expected: u32 = step.parse(0)?;
    step.check_eq(expected, cart.apples);
    Ok(())
}

fn nothing_happens(_: &mut ShoppingCart, _: &mut StepContext<'_>) -> Result<(), StepError> {
    Ok(())
}

fn count_aloud(cart: &mut ShoppingCart, step: &mut StepContext<'_>) -> Result<(), StepError> {
    write!(step, "{} apples", cart.apples).map_err(|err| StepError::failed(err.to_string()))?;
    step.pass();
    Ok(())
}

fn drop_basket(_: &mut ShoppingCart, _: &mut StepContext<'_>) -> Result<(), StepError> {
    Err(StepError::failed("basket dropped"))
}

fn trip(_: &mut ShoppingCart, _: &mut StepContext<'_>) -> Result<(), StepError> {
    panic!("tripped over the cart")
}

impl StepDefinitions for ShoppingCart {
    fn register(steps: &mut StepRegistry<Self>) -> Result<(), RegistryError> {
        steps
            .given(r"^I have (\d+) apples$", have)?
            .when(r"^I eat (\d+) apples?$", eat)?
            .when("^I count aloud$", count_aloud)?
            .when("^I drop the basket$", drop_basket)?
            .when("^I trip$", trip)?
            .then(r"^I should have (\d+) apples$", should_have)?
            .then("^nothing happens$", nothing_happens)?;
        Ok(())
    }
}

/// Executor that records every call and passes every step.
#[derive(Debug, Default)]
pub struct Recorder {
    /// `begin`, `end` and `<keyword> <text>` entries in call order.
    pub calls: Vec<String>,
    /// Make the set-up hook fail.
    pub fail_set_up: bool,
    /// Make the tear-down hook fail.
    pub fail_tear_down: bool,
}

impl Recorder {
    /// Number of calls equal to `name`.
    pub fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|call| *call == name).count()
    }
}

impl ScenarioExecutor for Recorder {
    fn begin_scenario(&mut self) -> Result<(), HookError> {
        self.calls.push("begin".into());
        if self.fail_set_up {
            return Err(HookError::new("fixture server offline"));
        }
        Ok(())
    }

    fn end_scenario(&mut self) -> Result<(), HookError> {
        self.calls.push("end".into());
        if self.fail_tear_down {
            return Err(HookError::new("temp dir still in use"));
        }
        Ok(())
    }

    fn execute(&mut self, keyword: StepKeyword, text: &str) -> StepResult {
        self.calls.push(format!("{keyword} {text}"));
        StepResult::Pass {
            output: String::new(),
        }
    }
}
