//! CLI argument definitions.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use reqwest::Url;

use crate::config::{
    FinderConfig, Repository, DEFAULT_AGENT_REPO, DEFAULT_API_BASE, DEFAULT_INTEGRATIONS_REPO,
    DEFAULT_MANIFEST_PATH, DEFAULT_RAW_BASE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    DEFAULT_VERSION_KEY, DEFAULT_WEB_BASE,
};

/// Top-level CLI parser for `integrations-finder`.
#[derive(Debug, Parser)]
#[command(
    name = "integrations-finder",
    version,
    about = "Trace agent container tags to the integrations source code they were built from"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Where to look.
    #[command(flatten)]
    pub hosting: HostingArgs,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Hosting coordinates, overridable per invocation or via environment.
#[derive(Debug, Args)]
pub struct HostingArgs {
    /// Agent repository (OWNER/NAME).
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_AGENT_REPO", default_value = DEFAULT_AGENT_REPO)]
    pub agent_repo: Repository,
    /// Integrations repository (OWNER/NAME).
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_INTEGRATIONS_REPO", default_value = DEFAULT_INTEGRATIONS_REPO)]
    pub integrations_repo: Repository,
    /// REST API base URL.
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_url: Url,
    /// Web base URL for commit pages and tree links.
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_WEB_URL", default_value = DEFAULT_WEB_BASE)]
    pub web_url: Url,
    /// Raw file-content base URL.
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_RAW_URL", default_value = DEFAULT_RAW_BASE)]
    pub raw_url: Url,
    /// Dependency manifest path inside the agent repository.
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_MANIFEST", default_value = DEFAULT_MANIFEST_PATH)]
    pub manifest_path: String,
    /// Manifest key holding the integrations version.
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_VERSION_KEY", default_value = DEFAULT_VERSION_KEY)]
    pub version_key: String,
    /// User agent sent with every request.
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
    /// Per-request timeout in seconds.
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
    /// Record every hosting API exchange to this cassette file.
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_RECORD", hide = true)]
    pub record: Option<PathBuf>,
    /// Serve hosting API exchanges from this cassette file instead of the network.
    #[arg(long, global = true, env = "INTEGRATIONS_FINDER_REPLAY", hide = true, conflicts_with = "record")]
    pub replay: Option<PathBuf>,
}

impl HostingArgs {
    /// Builds the finder configuration from the parsed arguments.
    #[must_use]
    pub fn to_config(&self) -> FinderConfig {
        FinderConfig {
            agent_repo: self.agent_repo.clone(),
            integrations_repo: self.integrations_repo.clone(),
            api_base: self.api_url.clone(),
            web_base: self.web_url.clone(),
            raw_base: self.raw_url.clone(),
            manifest_path: self.manifest_path.clone(),
            version_key: self.version_key.clone(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find integrations source code from an agent SHA or container tag.
    Find(FindArgs),
}

/// Arguments of `find`.
#[derive(Debug, Args)]
pub struct FindArgs {
    /// Agent SHA, container tag or image path; several are resolved concurrently.
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<String>,
    /// Print outcomes as JSON.
    #[arg(long)]
    pub json: bool,
    /// Open the integrations URL in the browser without asking.
    #[arg(long, conflicts_with = "no_prompt")]
    pub open: bool,
    /// Never ask whether to open the browser.
    #[arg(long)]
    pub no_prompt: bool,
}
