//! `plainbdd` binary: runs every feature without registered providers.

use std::process::ExitCode;

use plainbdd::ProviderCatalog;

fn main() -> ExitCode {
    plainbdd_cli::main_with_catalog(&ProviderCatalog::new())
}
