//! Step definitions and their ordered registry.
//!
//! A [`StepRegistry`] is an explicit list of `(keyword, regex, handler)`
//! entries, built once when a provider is constructed. Resolution walks the
//! list in declaration order and the first definition whose regex matches
//! wins; there is no specificity ranking. Authors control precedence by the
//! order in which they register patterns.

use std::fmt;

use regex::Regex;

use crate::{RegistryError, StepContext, StepError, StepKeyword};
use plainbdd_patterns::{compile_step_regex, extract_captures};

/// Type alias for a step handler.
///
/// Handlers receive the provider's world value and the step context; captures
/// are read from the context, so the dispatcher never needs to know how many
/// arguments a handler expects.
pub type StepFn<W> = fn(&mut W, &mut StepContext<'_>) -> Result<(), StepError>;

/// A single registered step definition.
pub struct StepDefinition<W> {
    keyword: StepKeyword,
    regex: Regex,
    handler: StepFn<W>,
}

impl<W> StepDefinition<W> {
    /// Keyword the definition answers to.
    #[must_use]
    pub fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// Pattern text as registered.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Compiled pattern.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Handler bound to the pattern.
    #[must_use]
    pub fn handler(&self) -> StepFn<W> {
        self.handler
    }
}

impl<W> fmt::Debug for StepDefinition<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("keyword", &self.keyword)
            .field("pattern", &self.regex.as_str())
            .finish_non_exhaustive()
    }
}

/// A definition selected for some step text, with its captures.
#[derive(Debug)]
pub struct Resolved<'r, W> {
    /// Matching definition.
    pub definition: &'r StepDefinition<W>,
    /// Capture groups, group 0 excluded.
    pub captures: Vec<String>,
}

/// Ordered collection of step definitions for world type `W`.
///
/// # Examples
///
/// ```
/// use plainbdd::{StepKeyword, StepRegistry};
///
/// struct Counter(u32);
///
/// let mut steps = StepRegistry::<Counter>::new();
/// steps
///     .given(r"^a counter at (\d+)$", |counter, step| {
///         counter.0 = step.parse(0)?;
///         Ok(())
///     })
///     .expect("valid pattern")
///     .then(r"^it reads (\d+)$", |counter, step| {
///         let expected: u32 = step.parse(0)?;
///         step.check_eq(expected, counter.0);
///         Ok(())
///     })
///     .expect("valid pattern");
///
/// let resolved = steps
///     .resolve(StepKeyword::Given, "a counter at 4")
///     .expect("pattern matches");
/// assert_eq!(resolved.captures, ["4"]);
/// assert!(steps.resolve(StepKeyword::When, "a counter at 4").is_none());
/// ```
pub struct StepRegistry<W> {
    definitions: Vec<StepDefinition<W>>,
}

impl<W> StepRegistry<W> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// Register `handler` for steps under `keyword` matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Conjunction`] for `And`/`But`, which are
    /// resolved to a primary keyword before lookup, and
    /// [`RegistryError::Pattern`] when `pattern` does not compile.
    pub fn register(
        &mut self,
        keyword: StepKeyword,
        pattern: &str,
        handler: StepFn<W>,
    ) -> Result<&mut Self, RegistryError> {
        if keyword.is_conjunction() {
            return Err(RegistryError::Conjunction {
                keyword,
                pattern: pattern.to_owned(),
            });
        }
        let regex = compile_step_regex(pattern)?;
        self.definitions.push(StepDefinition {
            keyword,
            regex,
            handler,
        });
        Ok(self)
    }

    /// Register a `Given` definition.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn given(&mut self, pattern: &str, handler: StepFn<W>) -> Result<&mut Self, RegistryError> {
        self.register(StepKeyword::Given, pattern, handler)
    }

    /// Register a `When` definition.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn when(&mut self, pattern: &str, handler: StepFn<W>) -> Result<&mut Self, RegistryError> {
        self.register(StepKeyword::When, pattern, handler)
    }

    /// Register a `Then` definition.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn then(&mut self, pattern: &str, handler: StepFn<W>) -> Result<&mut Self, RegistryError> {
        self.register(StepKeyword::Then, pattern, handler)
    }

    /// Find the first definition for `keyword` whose pattern matches `text`.
    #[must_use]
    pub fn resolve(&self, keyword: StepKeyword, text: &str) -> Option<Resolved<'_, W>> {
        self.definitions
            .iter()
            .filter(|definition| definition.keyword == keyword)
            .find_map(|definition| {
                extract_captures(&definition.regex, text).map(|captures| Resolved {
                    definition,
                    captures,
                })
            })
    }

    /// Definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition<W>> {
        self.definitions.iter()
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<W> Default for StepRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> fmt::Debug for StepRegistry<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.definitions).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[derive(Default)]
    struct Log(Vec<&'static str>);

    fn first(log: &mut Log, _: &mut StepContext<'_>) -> Result<(), StepError> {
        log.0.push("first");
        Ok(())
    }

    fn second(log: &mut Log, _: &mut StepContext<'_>) -> Result<(), StepError> {
        log.0.push("second");
        Ok(())
    }

    #[fixture]
    fn overlapping() -> StepRegistry<Log> {
        let mut steps = StepRegistry::new();
        let registered = steps
            .given(r"^I have (\d+) apples$", first)
            .and_then(|s| s.given(r"^I have (.+)$", second))
            .and_then(|s| s.then(r"^I have (\d+) apples$", second));
        assert!(registered.is_ok(), "fixture patterns must compile");
        steps
    }

    #[rstest]
    fn first_declared_match_wins(overlapping: StepRegistry<Log>) {
        let Some(resolved) = overlapping.resolve(StepKeyword::Given, "I have 2 apples") else {
            panic!("expected a match");
        };
        let mut log = Log::default();
        let captures = Vec::new();
        let mut asserter = crate::Asserter::new();
        let mut output = String::new();
        let mut ctx = StepContext::new(&captures, &mut asserter, &mut output);
        assert!((resolved.definition.handler())(&mut log, &mut ctx).is_ok());
        assert_eq!(log.0, ["first"]);
        assert_eq!(resolved.captures, ["2"]);
    }

    #[rstest]
    fn later_patterns_catch_what_earlier_ones_miss(overlapping: StepRegistry<Log>) {
        let Some(resolved) = overlapping.resolve(StepKeyword::Given, "I have pears") else {
            panic!("expected a match");
        };
        assert_eq!(resolved.definition.pattern(), "^I have (.+)$");
        assert_eq!(resolved.captures, ["pears"]);
    }

    #[rstest]
    fn keyword_filters_candidates(overlapping: StepRegistry<Log>) {
        let Some(resolved) = overlapping.resolve(StepKeyword::Then, "I have 3 apples") else {
            panic!("expected a match");
        };
        assert_eq!(resolved.definition.keyword(), StepKeyword::Then);
        assert!(overlapping.resolve(StepKeyword::When, "I have 3 apples").is_none());
    }

    #[rstest]
    #[case(StepKeyword::And)]
    #[case(StepKeyword::But)]
    fn rejects_conjunction_keywords(#[case] keyword: StepKeyword) {
        let mut steps = StepRegistry::<Log>::new();
        assert!(matches!(
            steps.register(keyword, "^x$", first),
            Err(RegistryError::Conjunction { .. })
        ));
        assert!(steps.is_empty());
    }

    #[test]
    fn rejects_invalid_patterns() {
        let mut steps = StepRegistry::<Log>::new();
        assert!(matches!(
            steps.when("(unclosed", first),
            Err(RegistryError::Pattern(_))
        ));
    }

    #[rstest]
    fn iterates_in_declaration_order(overlapping: StepRegistry<Log>) {
        let patterns: Vec<_> = overlapping.iter().map(StepDefinition::pattern).collect();
        assert_eq!(
            patterns,
            [r"^I have (\d+) apples$", r"^I have (.+)$", r"^I have (\d+) apples$"]
        );
        assert_eq!(overlapping.len(), 3);
    }
}
