//! Runner configuration parsed from environment variables.
//!
//! Every setting can be provided through a `PLAINBDD_` environment variable
//! and then overridden on the command line.
//!
//! # Environment Variables
//!
//! - `PLAINBDD_FEATURES_DIR`: directory holding the `.feature` files
//!   (default `features`)
//! - `PLAINBDD_SHOW_ADVISE`: print advice after each file (`1`/`0`,
//!   `true`/`false`, `yes`/`no`, `on`/`off`)
//! - `PLAINBDD_COLOR`: `auto`, `always` or `never`
//! - `PLAINBDD_FORMAT`: `console` or `json`
//! - `PLAINBDD_LOG_LEVEL`: `trace`, `debug`, `info`, `warn` or `error`

use std::env;
use std::io::IsTerminal;
use std::str::FromStr;

use camino::Utf8PathBuf;

use crate::error::ConfigError;

/// Default directory searched for feature files.
pub const DEFAULT_FEATURES_DIR: &str = "features";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so a plain run only prints the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes line classification.
    Trace,
    /// Pattern selection and scenario boundaries.
    Debug,
    /// Informational messages such as missing providers.
    Info,
    /// Step handlers that errored or panicked.
    #[default]
    Warn,
    /// Fatal run errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::Invalid(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// When the console transcript is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Colour when standard output is a terminal.
    #[default]
    Auto,
    /// Always emit ANSI sequences.
    Always,
    /// Never emit ANSI sequences.
    Never,
}

impl FromStr for ColorChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(ConfigError::Invalid(format!(
                "unknown colour mode '{s}', expected one of: auto, always, never"
            ))),
        }
    }
}

impl ColorChoice {
    /// Decide whether to colour output written to `stream`.
    #[must_use]
    pub fn enabled_for(self, stream: &impl IsTerminal) -> bool {
        match self {
            Self::Auto => stream.is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Shape of the report written to standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Annotated transcript of every line.
    #[default]
    Console,
    /// One JSON document for the whole run.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::Invalid(format!(
                "unknown output format '{s}', expected one of: console, json"
            ))),
        }
    }
}

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}

/// Values supplied on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replacement features directory.
    pub features_dir: Option<Utf8PathBuf>,
    /// Replacement advice switch.
    pub show_advise: Option<bool>,
    /// Replacement colour mode.
    pub color: Option<ColorChoice>,
    /// Replacement output format.
    pub format: Option<OutputFormat>,
    /// Replacement log level.
    pub log_level: Option<LogLevel>,
}

/// Configuration for one run of the feature runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory whose `.feature` files are run.
    pub features_dir: Utf8PathBuf,
    /// Print advice after each file.
    pub show_advise: bool,
    /// Console colour mode.
    pub color: ColorChoice,
    /// Report format.
    pub format: OutputFormat,
    /// Log level for the stderr subscriber.
    pub log_level: LogLevel,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            features_dir: Utf8PathBuf::from(DEFAULT_FEATURES_DIR),
            show_advise: false,
            color: ColorChoice::default(),
            format: OutputFormat::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from the process environment.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("PLAINBDD_FEATURES_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.features_dir = Utf8PathBuf::from(dir);
        }

        if let Some(val) = lookup("PLAINBDD_SHOW_ADVISE") {
            config.show_advise = parse_env_bool(&val).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "invalid PLAINBDD_SHOW_ADVISE value '{val}', expected a boolean"
                ))
            })?;
        }

        if let Some(val) = lookup("PLAINBDD_COLOR") {
            config.color = val.parse()?;
        }

        if let Some(val) = lookup("PLAINBDD_FORMAT") {
            config.format = val.parse()?;
        }

        if let Some(val) = lookup("PLAINBDD_LOG_LEVEL") {
            config.log_level = val.parse()?;
        }

        Ok(config)
    }

    /// Apply command line overrides on top of the environment.
    #[must_use]
    pub fn apply_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(dir) = overrides.features_dir {
            self.features_dir = dir;
        }
        if let Some(show) = overrides.show_advise {
            self.show_advise = show;
        }
        if let Some(color) = overrides.color {
            self.color = color;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
