//! Core library entry for the `integrations-finder` CLI.
//!
//! Resolves an agent container tag (or bare revision id) to the revision of
//! the integrations repository it was built against, via the hosting API.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod github;
pub mod logging;
pub mod lookup;
pub mod pipeline;
pub mod ports;
pub mod revision;
pub mod worker;

use clap::Parser;

pub use config::FinderConfig;
pub use context::ServiceContext;
pub use pipeline::{IntegrationsFinder, ResolutionOutcome};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    logging::init_tracing(logging::level_for(cli.verbose));
    commands::dispatch(&cli)
}
