//! Command line runner for plainbdd feature files.
//!
//! The stock `plainbdd` binary runs with an empty [`ProviderCatalog`], so
//! every step is reported as missing and the advice prints registration
//! templates. Projects build their own binary by registering their providers
//! and calling [`main_with_catalog`]:
//!
//! ```no_run
//! use plainbdd::ProviderCatalog;
//! # #[derive(Default)]
//! # struct ShoppingCartHelper;
//! # impl plainbdd::ScenarioHooks for ShoppingCartHelper {}
//! # impl plainbdd::StepDefinitions for ShoppingCartHelper {
//! #     fn register(
//! #         _: &mut plainbdd::StepRegistry<Self>,
//! #     ) -> Result<(), plainbdd::RegistryError> {
//! #         Ok(())
//! #     }
//! # }
//!
//! fn main() -> std::process::ExitCode {
//!     let mut catalog = ProviderCatalog::new();
//!     catalog.register_world::<ShoppingCartHelper>("shopping_cart");
//!     plainbdd_cli::main_with_catalog(&catalog)
//! }
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use eyre::{Context, Result};
use plainbdd::reporting::{ConsoleReporter, JsonReporter};
use plainbdd::{FeatureRunner, ProviderCatalog, RunSummary};

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

use cli::Cli;
use config::{OutputFormat, RunnerConfig};
use error::ConfigError;
use logging::init_logging;

/// Exit status when a step failed or the run aborted.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for an invalid configuration.
pub const EXIT_CONFIG: u8 = 2;

/// Parse the process arguments and environment, then run every feature.
///
/// Returns [`ExitCode::SUCCESS`] when no step failed, [`EXIT_FAILURE`] when a
/// step failed or a file aborted and [`EXIT_CONFIG`] for configuration
/// errors.
#[must_use]
pub fn main_with_catalog(catalog: &ProviderCatalog) -> ExitCode {
    let cli = Cli::parse();
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&RunnerConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    init_logging(&config);
    tracing::debug!(features_dir = %config.features_dir, "starting plainbdd");

    let mut stdout = io::stdout().lock();
    match run(catalog, &config, &mut stdout) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(summary) => {
            tracing::info!(failed = summary.tally.failed, "steps failed");
            ExitCode::from(EXIT_FAILURE)
        }
        Err(e) => {
            let message = format!("{e:#}");
            tracing::error!(error = %message, "run aborted");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Combine the environment with the command line flags.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when an environment variable is invalid.
pub fn build_config(cli: &Cli) -> Result<RunnerConfig, ConfigError> {
    let config = RunnerConfig::from_env()?;
    Ok(config.apply_overrides(cli.overrides()))
}

/// Run the features configured in `config`, writing the report to `out`.
///
/// # Errors
///
/// Returns an error when a feature file cannot be run or the report cannot
/// be written.
pub fn run<W: Write>(
    catalog: &ProviderCatalog,
    config: &RunnerConfig,
    out: &mut W,
) -> Result<RunSummary> {
    let runner = FeatureRunner::new(catalog);
    match config.format {
        OutputFormat::Console => {
            let mut console = ConsoleReporter::new(&mut *out)
                .with_color(config.color.enabled_for(&io::stdout()))
                .with_advise(config.show_advise);
            let outcome = runner.run(&config.features_dir, &mut console);
            if let Ok(summary) = &outcome {
                console.write_summary(&summary.tally);
            }
            console
                .finish()
                .wrap_err("failed to write the console report")?;
            outcome.wrap_err_with(|| format!("failed to run features in {}", config.features_dir))
        }
        OutputFormat::Json => {
            let mut json = JsonReporter::new();
            let summary = runner
                .run(&config.features_dir, &mut json)
                .wrap_err_with(|| format!("failed to run features in {}", config.features_dir))?;
            json.write(out).wrap_err("failed to write the JSON report")?;
            writeln!(out).wrap_err("failed to write the JSON report")?;
            out.flush().wrap_err("failed to flush the JSON report")?;
            Ok(summary)
        }
    }
}
