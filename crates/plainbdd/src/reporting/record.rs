//! Reporter that keeps every callback in memory.

use crate::{FailureDetail, FeatureLine, StepKeyword};

use super::Reporter;

/// Owned copy of a [`FeatureLine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedLine {
    /// Raw line text.
    pub text: String,
    /// 1-based line number.
    pub number: usize,
    /// Script identifier.
    pub source: String,
}

impl From<FeatureLine<'_>> for ReportedLine {
    fn from(line: FeatureLine<'_>) -> Self {
        Self {
            text: line.text.to_owned(),
            number: line.number,
            source: line.source.to_owned(),
        }
    }
}

/// One recorded reporter callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportedEvent {
    /// [`Reporter::on_feature_heading`].
    FeatureHeading {
        /// Heading line.
        line: ReportedLine,
        /// Heading label.
        label: String,
    },
    /// [`Reporter::on_scenario_heading`].
    ScenarioHeading {
        /// Heading line.
        line: ReportedLine,
        /// Heading label.
        label: String,
    },
    /// [`Reporter::on_plain_text`].
    PlainText {
        /// Text line.
        line: ReportedLine,
    },
    /// [`Reporter::on_pass`].
    Pass {
        /// Step line.
        line: ReportedLine,
        /// Captured output.
        output: String,
    },
    /// [`Reporter::on_fail`].
    Fail {
        /// Step line.
        line: ReportedLine,
        /// Captured output.
        output: String,
        /// Failure detail.
        detail: FailureDetail,
    },
    /// [`Reporter::on_missing`].
    Missing {
        /// Step line.
        line: ReportedLine,
        /// Keyword the lookup ran under.
        keyword: StepKeyword,
    },
    /// [`Reporter::on_no_assertions`].
    NoAssertions {
        /// Step line.
        line: ReportedLine,
        /// Captured output.
        output: String,
    },
    /// [`Reporter::on_advise`].
    Advise {
        /// Script or directory the advice is about.
        source: String,
        /// Advice text.
        message: String,
    },
}

impl ReportedEvent {
    /// Lowercase label for the callback.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FeatureHeading { .. } => "feature",
            Self::ScenarioHeading { .. } => "scenario",
            Self::PlainText { .. } => "text",
            Self::Pass { .. } => "passed",
            Self::Fail { .. } => "failed",
            Self::Missing { .. } => "missing",
            Self::NoAssertions { .. } => "no_assertions",
            Self::Advise { .. } => "advise",
        }
    }

    /// Line the event belongs to; `None` for advice.
    #[must_use]
    pub fn line(&self) -> Option<&ReportedLine> {
        match self {
            Self::FeatureHeading { line, .. }
            | Self::ScenarioHeading { line, .. }
            | Self::PlainText { line }
            | Self::Pass { line, .. }
            | Self::Fail { line, .. }
            | Self::Missing { line, .. }
            | Self::NoAssertions { line, .. } => Some(line),
            Self::Advise { .. } => None,
        }
    }
}

/// Reporter storing every callback as a [`ReportedEvent`].
///
/// # Examples
///
/// ```
/// use plainbdd::reporting::{RecordingReporter, Reporter};
/// use plainbdd::FeatureLine;
///
/// let mut reporter = RecordingReporter::new();
/// reporter.on_plain_text(FeatureLine::new("# note", 1, "demo"));
/// assert_eq!(reporter.labels(), [(1, "text")]);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingReporter {
    events: Vec<ReportedEvent>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in the order they were reported.
    #[must_use]
    pub fn events(&self) -> &[ReportedEvent] {
        &self.events
    }

    /// Consume the recorder, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<ReportedEvent> {
        self.events
    }

    /// `(line number, label)` for every line event; advice is skipped.
    #[must_use]
    pub fn labels(&self) -> Vec<(usize, &'static str)> {
        self.events
            .iter()
            .filter_map(|event| event.line().map(|line| (line.number, event.label())))
            .collect()
    }

    /// Advice messages in the order they were reported.
    #[must_use]
    pub fn advice(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportedEvent::Advise { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn on_feature_heading(&mut self, line: FeatureLine<'_>, label: &str) {
        self.events.push(ReportedEvent::FeatureHeading {
            line: line.into(),
            label: label.to_owned(),
        });
    }

    fn on_scenario_heading(&mut self, line: FeatureLine<'_>, label: &str) {
        self.events.push(ReportedEvent::ScenarioHeading {
            line: line.into(),
            label: label.to_owned(),
        });
    }

    fn on_plain_text(&mut self, line: FeatureLine<'_>) {
        self.events.push(ReportedEvent::PlainText { line: line.into() });
    }

    fn on_pass(&mut self, line: FeatureLine<'_>, output: &str) {
        self.events.push(ReportedEvent::Pass {
            line: line.into(),
            output: output.to_owned(),
        });
    }

    fn on_fail(&mut self, line: FeatureLine<'_>, output: &str, detail: &FailureDetail) {
        self.events.push(ReportedEvent::Fail {
            line: line.into(),
            output: output.to_owned(),
            detail: detail.clone(),
        });
    }

    fn on_missing(&mut self, line: FeatureLine<'_>, keyword: StepKeyword) {
        self.events.push(ReportedEvent::Missing {
            line: line.into(),
            keyword,
        });
    }

    fn on_no_assertions(&mut self, line: FeatureLine<'_>, output: &str) {
        self.events.push(ReportedEvent::NoAssertions {
            line: line.into(),
            output: output.to_owned(),
        });
    }

    fn on_advise(&mut self, source: &str, message: &str) {
        self.events.push(ReportedEvent::Advise {
            source: source.to_owned(),
            message: message.to_owned(),
        });
    }
}
