//! Command line arguments for the `plainbdd` runner.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::config::{ColorChoice, LogLevel, OutputFormat, Overrides};

/// Run plain-text Given/When/Then feature files.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "plainbdd", author, version, about)]
pub struct Cli {
    /// Directory holding the `.feature` files [env: PLAINBDD_FEATURES_DIR].
    #[arg(long, value_name = "DIR")]
    pub features_dir: Option<Utf8PathBuf>,
    /// Print advice and registration templates after each file.
    #[arg(long)]
    pub advise: bool,
    /// Colour mode: auto, always or never [env: PLAINBDD_COLOR].
    #[arg(long, value_name = "WHEN")]
    pub color: Option<ColorChoice>,
    /// Report format: console or json [env: PLAINBDD_FORMAT].
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
    /// Log level: trace, debug, info, warn or error [env: PLAINBDD_LOG_LEVEL].
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl Cli {
    /// Flags that take precedence over the environment.
    ///
    /// `--advise` can only switch advice on; leaving it out keeps the
    /// environment's choice.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            features_dir: self.features_dir.clone(),
            show_advise: self.advise.then_some(true),
            color: self.color,
            format: self.format,
            log_level: self.log_level,
        }
    }
}
