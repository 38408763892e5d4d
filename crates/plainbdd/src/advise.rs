//! Suggestions for incomplete feature files.
//!
//! [`AdviseLog`] sits between the interpreter and the real reporter. It
//! forwards every callback unchanged while noting missing steps,
//! assertion-less steps and scenario headings; once the file is done,
//! [`AdviseLog::advice`] turns those notes into [`Advice`] entries whose
//! text includes a registration template to paste into a step provider.

use std::fmt;

use camino::Utf8PathBuf;

use crate::reporting::{Reporter, Tally};
use crate::{FailureDetail, FeatureLine, LineToken, StepKeyword, literal_pattern};

/// One suggestion shown under an `[Advise]` heading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Advice {
    /// The features directory does not exist.
    MissingFeaturesDir {
        /// Directory that was looked up.
        dir: Utf8PathBuf,
    },
    /// The features directory holds no `.feature` files.
    NoFeatures {
        /// Directory that was scanned.
        dir: Utf8PathBuf,
    },
    /// No provider is registered for a feature file.
    NoProvider {
        /// Helper name derived from the file name.
        helper: String,
        /// Conventional world type name for the helper.
        type_name: String,
        /// Feature file path.
        feature: Utf8PathBuf,
    },
    /// The file has no `Scenario:` line.
    NoScenarios,
    /// A step has no matching definition.
    MissingStep {
        /// 1-based line number.
        line_number: usize,
        /// Keyword the lookup ran under.
        keyword: StepKeyword,
        /// Step text without its keyword.
        text: String,
    },
    /// A `Then` step asserted nothing.
    NoAssertions {
        /// 1-based line number.
        line_number: usize,
    },
}

/// Handler name suggested for a missing step: the lowercase keyword, then
/// the ASCII letters of `text` in snake case.
///
/// # Examples
///
/// ```
/// use plainbdd::{StepKeyword, advise::handler_name};
///
/// assert_eq!(handler_name(StepKeyword::Given, "I have 2 apples!"), "given_i_have_apples");
/// assert_eq!(handler_name(StepKeyword::Then, "42"), "then");
/// ```
#[must_use]
pub fn handler_name(keyword: StepKeyword, text: &str) -> String {
    let mut name = keyword.as_str().to_ascii_lowercase();
    let words = text
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty());
    for word in words {
        name.push('_');
        name.push_str(&word.to_ascii_lowercase());
    }
    name
}

fn rust_string_literal(pattern: &str) -> String {
    if pattern.contains('"') {
        format!("r#\"{pattern}\"#")
    } else {
        format!("r\"{pattern}\"")
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFeaturesDir { dir } => {
                write!(f, "Directory {dir}/ not found. Create it with:\n    mkdir {dir}")
            }
            Self::NoFeatures { dir } => {
                writeln!(
                    f,
                    "No feature specs found. Start by creating one in {dir}/my_feature.feature. \
                     You can use the following template:"
                )?;
                writeln!(f, "Feature: ...")?;
                writeln!(f, "  In order ...")?;
                writeln!(f, "  As a ...")?;
                writeln!(f, "  I want ...")
            }
            Self::NoProvider {
                helper,
                type_name,
                feature,
            } => {
                writeln!(
                    f,
                    "No step definitions registered for {feature}. Register a world under \
                     \"{helper}\". You can use the following template:"
                )?;
                writeln!(f)?;
                writeln!(f, "#[derive(Default)]")?;
                writeln!(f, "struct {type_name};")?;
                writeln!(f)?;
                writeln!(f, "impl ScenarioHooks for {type_name} {{}}")?;
                writeln!(f)?;
                writeln!(f, "impl StepDefinitions for {type_name} {{")?;
                writeln!(
                    f,
                    "    fn register(steps: &mut StepRegistry<Self>) -> Result<(), RegistryError> {{"
                )?;
                writeln!(f, "        Ok(())")?;
                writeln!(f, "    }}")?;
                writeln!(f, "}}")?;
                writeln!(f)?;
                writeln!(f, "catalog.register_world::<{type_name}>(\"{helper}\");")
            }
            Self::NoScenarios => {
                writeln!(
                    f,
                    "You don't have any scenarios in your feature. You can use the following template:"
                )?;
                writeln!(f)?;
                writeln!(f, "  Scenario: ...")?;
                writeln!(f, "    Given ...")?;
                writeln!(f, "    When ...")?;
                writeln!(f, "    Then ...")
            }
            Self::MissingStep {
                line_number,
                keyword,
                text,
            } => {
                let method = keyword.as_str().to_ascii_lowercase();
                let pattern = rust_string_literal(&literal_pattern(text));
                let handler = handler_name(*keyword, text);
                writeln!(
                    f,
                    "You have an unrecognised step in line {line_number}. \
                     You can use the following template:"
                )?;
                writeln!(f)?;
                writeln!(f, "  steps.{method}({pattern}, {handler})?;")?;
                writeln!(f)?;
                writeln!(
                    f,
                    "  fn {handler}(world: &mut World, step: &mut StepContext<'_>) -> Result<(), StepError> {{"
                )?;
                writeln!(f, "      Ok(())")?;
                writeln!(f, "  }}")
            }
            Self::NoAssertions { line_number } => {
                write!(f, "Your test on line {line_number} does not make any assertions.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MissingNote {
    line_number: usize,
    keyword: StepKeyword,
    text: String,
}

/// Reporter proxy that gathers what [`Advice`] needs.
#[derive(Debug)]
pub struct AdviseLog<R> {
    inner: R,
    tally: Tally,
    missing: Vec<MissingNote>,
    no_assertions: Vec<usize>,
}

impl<R: Reporter> AdviseLog<R> {
    /// Wrap `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            tally: Tally::default(),
            missing: Vec::new(),
            no_assertions: Vec::new(),
        }
    }

    /// Counts of everything forwarded so far.
    #[must_use]
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Unwrap the inner reporter.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Advice for the file interpreted so far, in reporting order: missing
    /// scenarios, then missing steps, then assertion-less steps.
    #[must_use]
    pub fn advice(&self) -> Vec<Advice> {
        let mut advice = Vec::new();
        if self.tally.scenarios == 0 {
            advice.push(Advice::NoScenarios);
        }
        advice.extend(self.missing.iter().map(|note| Advice::MissingStep {
            line_number: note.line_number,
            keyword: note.keyword,
            text: note.text.clone(),
        }));
        advice.extend(
            self.no_assertions
                .iter()
                .map(|&line_number| Advice::NoAssertions { line_number }),
        );
        advice
    }
}

impl<R: Reporter> Reporter for AdviseLog<R> {
    fn on_feature_heading(&mut self, line: FeatureLine<'_>, label: &str) {
        self.inner.on_feature_heading(line, label);
    }

    fn on_scenario_heading(&mut self, line: FeatureLine<'_>, label: &str) {
        self.tally.on_scenario_heading(line, label);
        self.inner.on_scenario_heading(line, label);
    }

    fn on_plain_text(&mut self, line: FeatureLine<'_>) {
        self.inner.on_plain_text(line);
    }

    fn on_pass(&mut self, line: FeatureLine<'_>, output: &str) {
        self.tally.on_pass(line, output);
        self.inner.on_pass(line, output);
    }

    fn on_fail(&mut self, line: FeatureLine<'_>, output: &str, detail: &FailureDetail) {
        self.tally.on_fail(line, output, detail);
        self.inner.on_fail(line, output, detail);
    }

    fn on_missing(&mut self, line: FeatureLine<'_>, keyword: StepKeyword) {
        self.tally.on_missing(line, keyword);
        if let LineToken::Step { text, .. } = line.token() {
            self.missing.push(MissingNote {
                line_number: line.number,
                keyword,
                text: text.to_owned(),
            });
        }
        self.inner.on_missing(line, keyword);
    }

    fn on_no_assertions(&mut self, line: FeatureLine<'_>, output: &str) {
        self.tally.on_no_assertions(line, output);
        if let LineToken::Step {
            keyword: StepKeyword::Then | StepKeyword::And | StepKeyword::But,
            ..
        } = line.token()
        {
            self.no_assertions.push(line.number);
        }
        self.inner.on_no_assertions(line, output);
    }

    fn on_advise(&mut self, source: &str, message: &str) {
        self.inner.on_advise(source, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::RecordingReporter;
    use rstest::rstest;

    fn at(text: &str, number: usize) -> FeatureLine<'_> {
        FeatureLine::new(text, number, "cart.feature")
    }

    #[test]
    fn forwards_everything_and_collects_notes() {
        let mut log = AdviseLog::new(RecordingReporter::new());
        log.on_scenario_heading(at("Scenario: s", 1), "s");
        log.on_missing(at("  When I pay", 2), StepKeyword::When);
        log.on_no_assertions(at("  And it is fine", 3), "");
        log.on_pass(at("  Given ok", 4), "");

        assert_eq!(log.tally().scenarios, 1);
        assert_eq!(log.tally().steps(), 3);
        assert_eq!(
            log.advice(),
            [
                Advice::MissingStep {
                    line_number: 2,
                    keyword: StepKeyword::When,
                    text: "I pay".into(),
                },
                Advice::NoAssertions { line_number: 3 },
            ]
        );
        assert_eq!(log.into_inner().events().len(), 4);
    }

    #[test]
    fn no_scenarios_comes_first() {
        let mut log = AdviseLog::new(RecordingReporter::new());
        log.on_missing(at("Given x", 1), StepKeyword::Given);
        let advice = log.advice();
        assert_eq!(advice.first(), Some(&Advice::NoScenarios));
        assert_eq!(advice.len(), 2);
    }

    #[test]
    fn missing_step_template_escapes_the_pattern() {
        let advice = Advice::MissingStep {
            line_number: 7,
            keyword: StepKeyword::Then,
            text: "the total is $5".into(),
        };
        let text = advice.to_string();
        assert!(text.starts_with("You have an unrecognised step in line 7."));
        assert!(text.contains(r#"steps.then(r"^the total is \$5$", then_the_total_is)?;"#));
        assert!(text.contains("fn then_the_total_is(world: &mut World"));
    }

    #[test]
    fn quotes_switch_to_hashed_raw_strings() {
        let advice = Advice::MissingStep {
            line_number: 1,
            keyword: StepKeyword::Given,
            text: r#"a user named "bob""#.into(),
        };
        assert!(
            advice
                .to_string()
                .contains(r##"steps.given(r#"^a user named "bob"$"#, given_a_user_named_bob)?;"##)
        );
    }

    #[rstest]
    #[case(Advice::NoAssertions { line_number: 4 }, "Your test on line 4 does not make any assertions.")]
    #[case(
        Advice::MissingFeaturesDir { dir: "features".into() },
        "Directory features/ not found. Create it with:\n    mkdir features"
    )]
    fn short_advice_text(#[case] advice: Advice, #[case] expected: &str) {
        assert_eq!(advice.to_string(), expected);
    }

    #[test]
    fn provider_template_names_the_world() {
        let advice = Advice::NoProvider {
            helper: "shopping_cart".into(),
            type_name: "ShoppingCartHelper".into(),
            feature: "features/shopping_cart.feature".into(),
        };
        let text = advice.to_string();
        assert!(text.contains("impl StepDefinitions for ShoppingCartHelper {"));
        assert!(text.contains("catalog.register_world::<ShoppingCartHelper>(\"shopping_cart\");"));
    }
}
