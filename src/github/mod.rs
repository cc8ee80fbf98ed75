//! Endpoint construction for the hosting service.
//!
//! Every URL the finder requests is built here so the lookups never
//! concatenate untrusted text into a URL by hand.

pub mod models;

use reqwest::Url;

use crate::config::{FinderConfig, Repository};
use crate::ports::HttpRequest;

/// Builds requests and browse URLs for the configured repositories.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints<'a> {
    config: &'a FinderConfig,
}

impl<'a> Endpoints<'a> {
    /// Wraps a validated configuration.
    #[must_use]
    pub fn new(config: &'a FinderConfig) -> Self {
        Self { config }
    }

    /// `GET /repos/{agent}/commits/{revision}`.
    #[must_use]
    pub fn agent_commit(&self, revision: &str) -> HttpRequest {
        HttpRequest::get(self.api(&self.config.agent_repo, &["commits", revision]))
    }

    /// Human-facing commit page for a revision of the agent repository.
    #[must_use]
    pub fn agent_commit_page(&self, revision: &str) -> String {
        repo_url(&self.config.web_base, &self.config.agent_repo, &["commit", revision])
    }

    /// `GET /repos/{agent}/contents/{manifest}?ref={revision}`.
    #[must_use]
    pub fn manifest_contents(&self, revision: &str) -> HttpRequest {
        let mut segments = vec!["contents"];
        segments.extend(self.config.manifest_path.split('/'));
        HttpRequest::get(self.api(&self.config.agent_repo, &segments)).with_query("ref", revision)
    }

    /// Raw manifest file at a revision.
    #[must_use]
    pub fn manifest_raw(&self, revision: &str) -> HttpRequest {
        let mut segments = vec![revision];
        segments.extend(self.config.manifest_path.split('/'));
        HttpRequest::get(repo_url(&self.config.raw_base, &self.config.agent_repo, &segments))
    }

    /// `GET /repos/{integrations}/commits?sha={version}&per_page=1`.
    #[must_use]
    pub fn integrations_latest_commit(&self, version: &str) -> HttpRequest {
        HttpRequest::get(self.api(&self.config.integrations_repo, &["commits"]))
            .with_query("sha", version)
            .with_query("per_page", "1")
    }

    /// `GET /repos/{integrations}/commits/{version}`.
    #[must_use]
    pub fn integrations_commit(&self, version: &str) -> HttpRequest {
        let mut segments = vec!["commits"];
        segments.extend(version.split('/'));
        HttpRequest::get(self.api(&self.config.integrations_repo, &segments))
    }

    /// `GET /repos/{integrations}/tags` (first page only).
    #[must_use]
    pub fn integrations_tags(&self) -> HttpRequest {
        HttpRequest::get(self.api(&self.config.integrations_repo, &["tags"]))
    }

    /// Browse URL of the integrations repository at `version`.
    #[must_use]
    pub fn integrations_tree(&self, version: &str) -> String {
        let mut segments = vec!["tree"];
        segments.extend(version.split('/'));
        repo_url(&self.config.web_base, &self.config.integrations_repo, &segments)
    }

    fn api(&self, repo: &Repository, segments: &[&str]) -> String {
        repo_url_with_prefix(&self.config.api_base, &["repos"], repo, segments)
    }
}

fn repo_url(base: &Url, repo: &Repository, segments: &[&str]) -> String {
    repo_url_with_prefix(base, &[], repo, segments)
}

fn repo_url_with_prefix(base: &Url, prefix: &[&str], repo: &Repository, rest: &[&str]) -> String {
    let mut url = base.clone();
    // Bases are validated up front; a cannot-be-a-base URL is returned unchanged.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty()
            .extend(prefix)
            .push(&repo.owner)
            .push(&repo.name)
            .extend(rest);
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_agent_endpoints() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);

        assert_eq!(
            endpoints.agent_commit("a1b2c3d4").url,
            "https://api.github.com/repos/StackVista/stackstate-agent/commits/a1b2c3d4"
        );
        assert_eq!(
            endpoints.agent_commit_page("a1b2c3d4"),
            "https://github.com/StackVista/stackstate-agent/commit/a1b2c3d4"
        );

        let contents = endpoints.manifest_contents("a1b2c3d4");
        assert_eq!(
            contents.url,
            "https://api.github.com/repos/StackVista/stackstate-agent/contents/stackstate-deps.json"
        );
        assert_eq!(contents.query, vec![("ref".to_string(), "a1b2c3d4".to_string())]);

        assert_eq!(
            endpoints.manifest_raw("a1b2c3d4").url,
            "https://raw.githubusercontent.com/StackVista/stackstate-agent/a1b2c3d4/stackstate-deps.json"
        );
    }

    #[test]
    fn builds_integrations_endpoints() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);

        let latest = endpoints.integrations_latest_commit("7.51.1-3");
        assert_eq!(
            latest.url,
            "https://api.github.com/repos/StackVista/stackstate-agent-integrations/commits"
        );
        assert_eq!(latest.query.len(), 2);
        assert_eq!(
            endpoints.integrations_tags().url,
            "https://api.github.com/repos/StackVista/stackstate-agent-integrations/tags"
        );
        assert_eq!(
            endpoints.integrations_tree("7.51.1-3"),
            "https://github.com/StackVista/stackstate-agent-integrations/tree/7.51.1-3"
        );
    }

    #[test]
    fn untrusted_versions_are_encoded_per_segment() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);

        assert_eq!(
            endpoints.integrations_tree("feature/new thing#1"),
            "https://github.com/StackVista/stackstate-agent-integrations/tree/feature/new%20thing%231"
        );
    }

    #[test]
    fn base_with_path_prefix_is_preserved() {
        let config = FinderConfig {
            api_base: Url::parse("https://ghe.example.com/api/v3/").unwrap(),
            ..FinderConfig::default()
        };
        let endpoints = Endpoints::new(&config);
        assert_eq!(
            endpoints.integrations_tags().url,
            "https://ghe.example.com/api/v3/repos/StackVista/stackstate-agent-integrations/tags"
        );
    }
}
