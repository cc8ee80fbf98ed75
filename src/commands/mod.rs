//! Command dispatch and handlers.

pub mod find;

use tracing::info;

use crate::cli::{Cli, Command, HostingArgs};
use crate::config::FinderConfig;
use crate::context::ServiceContext;
use crate::pipeline::IntegrationsFinder;

/// Dispatch a parsed command to its handler.
///
/// With `INTEGRATIONS_FINDER_RECORD` set, every hosting API exchange is
/// recorded to that cassette file; with `INTEGRATIONS_FINDER_REPLAY` set,
/// exchanges are served from it and the network is never touched.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = cli.hosting.to_config();
    config.validate().map_err(|e| e.to_string())?;
    let ctx = context_for(&cli.hosting, &config)?;
    let finder = IntegrationsFinder::new(ctx, config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime.block_on(dispatch_with_finder(&cli.command, finder))
}

/// Selects live, recording or replaying adapters.
fn context_for(hosting: &HostingArgs, config: &FinderConfig) -> Result<ServiceContext, String> {
    if let Some(path) = &hosting.replay {
        info!(cassette = %path.display(), "replaying hosting API exchanges");
        return ServiceContext::replaying(path);
    }
    if let Some(path) = &hosting.record {
        info!(cassette = %path.display(), "recording hosting API exchanges");
        return ServiceContext::recording(config, path);
    }
    ServiceContext::live(config)
}

/// Dispatch a command with the given finder.
async fn dispatch_with_finder(command: &Command, finder: IntegrationsFinder) -> Result<(), String> {
    match command {
        Command::Find(args) => find::run(args, finder).await,
    }
}
