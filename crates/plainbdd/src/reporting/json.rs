//! JSON reporter.
//!
//! Records are collected while features run and serialized in one go, so
//! the document stays valid even when several files are interpreted. Status
//! labels are lowercase and match [`StepResult::label`](crate::StepResult::label).

use std::io::Write;

use serde::Serialize;

use crate::{FailureDetail, FeatureLine, StepKeyword};

use super::{Reporter, Tally};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct JsonLine {
    source: String,
    line: usize,
    text: String,
    #[serde(flatten)]
    event: JsonEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonEvent {
    Feature {
        label: String,
    },
    Scenario {
        label: String,
    },
    Passed {
        #[serde(skip_serializing_if = "String::is_empty")]
        output: String,
    },
    Failed {
        #[serde(skip_serializing_if = "String::is_empty")]
        output: String,
        failure: FailureDetail,
    },
    Missing {
        keyword: &'static str,
    },
    NoAssertions {
        #[serde(skip_serializing_if = "String::is_empty")]
        output: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct JsonAdvice {
    source: String,
    message: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a Tally,
    lines: &'a [JsonLine],
    advice: &'a [JsonAdvice],
}

/// Reporter collecting headings, step results and advice for a JSON
/// document.
///
/// Plain text lines are not part of the document.
///
/// # Examples
/// ```
/// use plainbdd::reporting::{JsonReporter, Reporter};
/// use plainbdd::FeatureLine;
///
/// let mut reporter = JsonReporter::new();
/// reporter.on_pass(FeatureLine::new("Given a", 2, "demo.feature"), "");
/// let json = reporter.to_json().expect("serializable");
/// assert!(json.contains("\"status\":\"passed\""));
/// assert!(json.contains("\"passed\":1"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct JsonReporter {
    tally: Tally,
    lines: Vec<JsonLine>,
    advice: Vec<JsonAdvice>,
}

impl JsonReporter {
    /// Create an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts gathered so far.
    #[must_use]
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    fn report(&self) -> JsonReport<'_> {
        JsonReport {
            summary: &self.tally,
            lines: &self.lines,
            advice: &self.advice,
        }
    }

    /// Serialize the collected records into `writer`.
    ///
    /// # Errors
    /// Returns an error when serialization or writing fails.
    pub fn write<W: Write>(&self, writer: &mut W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, &self.report())
    }

    /// Serialize the collected records into a compact string.
    ///
    /// # Errors
    /// Returns an error when serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.report())
    }

    fn push(&mut self, line: FeatureLine<'_>, event: JsonEvent) {
        self.lines.push(JsonLine {
            source: line.source.to_owned(),
            line: line.number,
            text: line.text.to_owned(),
            event,
        });
    }
}

impl Reporter for JsonReporter {
    fn on_feature_heading(&mut self, line: FeatureLine<'_>, label: &str) {
        self.push(
            line,
            JsonEvent::Feature {
                label: label.to_owned(),
            },
        );
    }

    fn on_scenario_heading(&mut self, line: FeatureLine<'_>, label: &str) {
        self.tally.on_scenario_heading(line, label);
        self.push(
            line,
            JsonEvent::Scenario {
                label: label.to_owned(),
            },
        );
    }

    fn on_plain_text(&mut self, _line: FeatureLine<'_>) {}

    fn on_pass(&mut self, line: FeatureLine<'_>, output: &str) {
        self.tally.on_pass(line, output);
        self.push(
            line,
            JsonEvent::Passed {
                output: output.to_owned(),
            },
        );
    }

    fn on_fail(&mut self, line: FeatureLine<'_>, output: &str, detail: &FailureDetail) {
        self.tally.on_fail(line, output, detail);
        self.push(
            line,
            JsonEvent::Failed {
                output: output.to_owned(),
                failure: detail.clone(),
            },
        );
    }

    fn on_missing(&mut self, line: FeatureLine<'_>, keyword: StepKeyword) {
        self.tally.on_missing(line, keyword);
        self.push(
            line,
            JsonEvent::Missing {
                keyword: keyword.as_str(),
            },
        );
    }

    fn on_no_assertions(&mut self, line: FeatureLine<'_>, output: &str) {
        self.tally.on_no_assertions(line, output);
        self.push(
            line,
            JsonEvent::NoAssertions {
                output: output.to_owned(),
            },
        );
    }

    fn on_advise(&mut self, source: &str, message: &str) {
        self.advice.push(JsonAdvice {
            source: source.to_owned(),
            message: message.to_owned(),
        });
    }
}
