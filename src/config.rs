//! Hosting coordinates and request settings for the finder.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Default agent repository.
pub const DEFAULT_AGENT_REPO: &str = "StackVista/stackstate-agent";
/// Default integrations repository.
pub const DEFAULT_INTEGRATIONS_REPO: &str = "StackVista/stackstate-agent-integrations";
/// Default REST API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Default human-facing web base.
pub const DEFAULT_WEB_BASE: &str = "https://github.com";
/// Default raw-content base.
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
/// Manifest committed in the agent repository.
pub const DEFAULT_MANIFEST_PATH: &str = "stackstate-deps.json";
/// Manifest key holding the integrations version.
pub const DEFAULT_VERSION_KEY: &str = "STACKSTATE_INTEGRATIONS_VERSION";
/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "SUSE-Observability-Integrations-Finder/1.0";
/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An `owner/name` repository on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Owning user or organisation.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl Repository {
    /// Creates repository coordinates.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self { owner: owner.into(), name: name.into() }
    }
}

impl FromStr for Repository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(ConfigError::Repository(s.to_string())),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything the finder needs to know about where to look.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Repository the container images are built from.
    pub agent_repo: Repository,
    /// Repository named by the manifest's version field.
    pub integrations_repo: Repository,
    /// REST API base.
    pub api_base: Url,
    /// Human-facing web base (commit pages, tree browsing).
    pub web_base: Url,
    /// Raw file-content base.
    pub raw_base: Url,
    /// Manifest path inside the agent repository.
    pub manifest_path: String,
    /// Manifest key holding the integrations version.
    pub version_key: String,
    /// User agent for all requests.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            agent_repo: Repository::new("StackVista", "stackstate-agent"),
            integrations_repo: Repository::new("StackVista", "stackstate-agent-integrations"),
            api_base: default_url(DEFAULT_API_BASE),
            web_base: default_url(DEFAULT_WEB_BASE),
            raw_base: default_url(DEFAULT_RAW_BASE),
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            version_key: DEFAULT_VERSION_KEY.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn default_url(raw: &str) -> Url {
    Url::parse(raw).expect("built-in base URL is valid")
}

impl FinderConfig {
    /// Checks that every base URL can have path segments appended.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BaseUrl`] naming the first unusable base.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for base in [&self.api_base, &self.web_base, &self.raw_base] {
            if base.cannot_be_a_base() {
                return Err(ConfigError::BaseUrl(base.to_string()));
            }
        }
        Ok(())
    }
}
