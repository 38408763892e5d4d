//! Console transcript of an interpreted feature file.
//!
//! Each line is echoed padded to [`COLUMN_WIDTH`] characters and coloured
//! by classification, followed by a dim `# <source> : <line>` comment.
//! Captured step output follows passing and assertion-less steps when there
//! is any; failure text always follows a failing step.

use std::io::{self, Write};

use crate::{FailureDetail, FeatureLine, StepKeyword, render_failure};

use super::{Reporter, Tally};

/// Width the echoed line is padded to before the location comment.
pub const COLUMN_WIDTH: usize = 60;

const RESET: &str = "\x1B[00m";
const RED: &str = "\x1B[1;31m";
const GREEN: &str = "\x1B[1;32m";
const YELLOW: &str = "\x1B[1;33m";
const BLUE: &str = "\x1B[1;34m";
const PURPLE: &str = "\x1B[0;35m";
const GREY: &str = "\x1B[1;30m";
const BOLD: &str = "\x1B[1m";
const BOLD_OFF: &str = "\x1B[22m";

/// Reporter writing a coloured transcript to any [`io::Write`].
///
/// Write errors do not interrupt interpretation: the first one is kept and
/// later output is dropped. Call [`finish`](Self::finish) to surface it.
///
/// # Examples
///
/// ```
/// use plainbdd::reporting::{ConsoleReporter, Reporter};
/// use plainbdd::FeatureLine;
///
/// let mut console = ConsoleReporter::new(Vec::new()).with_color(false);
/// console.on_pass(FeatureLine::new("Given a", 3, "demo.feature"), "");
/// let out = String::from_utf8(console.finish().expect("in-memory write")).expect("utf-8");
/// assert_eq!(out, format!("{:<60} # demo.feature : 3\n", "Given a"));
/// ```
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
    show_advise: bool,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    /// Write to `out` with colour on and advice hidden.
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: true,
            show_advise: false,
            error: None,
        }
    }

    /// Enable or disable ANSI colour sequences.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Print advice reported through [`Reporter::on_advise`].
    #[must_use]
    pub fn with_advise(mut self, show: bool) -> Self {
        self.show_advise = show;
        self
    }

    /// Write a closing summary line.
    pub fn write_summary(&mut self, tally: &Tally) {
        let text = tally.to_string();
        let painted = if tally.has_failures() {
            self.paint(RED, &text)
        } else {
            self.paint(GREEN, &text)
        };
        self.emit(|out| writeln!(out, "\n{painted}"));
    }

    /// Flush and return the writer, or the first write error.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error hit while reporting, or the flush error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, write: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = write(&mut self.out) {
            log::warn!("console output failed: {err}");
            self.error = Some(err);
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_owned()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            format!("{BOLD}{text}{BOLD_OFF}")
        } else {
            text.to_owned()
        }
    }

    fn located(&mut self, line: FeatureLine<'_>, code: Option<&str>) {
        let padded = format!("{:<width$}", line.text, width = COLUMN_WIDTH);
        let text = match code {
            Some(code) => self.paint(code, &padded),
            None => self.bold(&padded),
        };
        let comment = self.paint(GREY, &format!(" # {} : {}", line.source, line.number));
        self.emit(|out| writeln!(out, "{text}{comment}"));
    }

    fn trailing(&mut self, text: &str) {
        if !text.is_empty() {
            self.emit(|out| writeln!(out, "{text}"));
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_feature_heading(&mut self, line: FeatureLine<'_>, _label: &str) {
        self.located(line, None);
    }

    fn on_scenario_heading(&mut self, line: FeatureLine<'_>, _label: &str) {
        self.located(line, None);
    }

    fn on_plain_text(&mut self, line: FeatureLine<'_>) {
        let text = self.bold(line.text);
        self.emit(|out| writeln!(out, "{text}"));
    }

    fn on_pass(&mut self, line: FeatureLine<'_>, output: &str) {
        self.located(line, Some(GREEN));
        self.trailing(output);
    }

    fn on_fail(&mut self, line: FeatureLine<'_>, output: &str, detail: &FailureDetail) {
        self.located(line, Some(RED));
        let message = render_failure(output, detail);
        self.emit(|out| writeln!(out, "{message}"));
    }

    fn on_missing(&mut self, line: FeatureLine<'_>, _keyword: StepKeyword) {
        self.located(line, Some(BLUE));
    }

    fn on_no_assertions(&mut self, line: FeatureLine<'_>, output: &str) {
        self.located(line, Some(YELLOW));
        self.trailing(output);
    }

    fn on_advise(&mut self, _source: &str, message: &str) {
        if !self.show_advise {
            return;
        }
        let heading = self.bold("[Advise]\n");
        let text = self.paint(PURPLE, &format!("{heading}{message}"));
        self.emit(|out| writeln!(out, "{text}"));
    }
}
