//! Commit metadata lookups for the agent and integrations repositories.

use serde::Serialize;
use tracing::{info, warn};

use super::{fetch_body, fetch_json};
use crate::config::FinderConfig;
use crate::context::ServiceContext;
use crate::error::TransportError;
use crate::github::models::{ApiCommit, CommitDate};
use crate::github::Endpoints;
use crate::ports::http::HttpRequest;
use crate::revision::RevisionId;

/// What is known about a commit. Fields the API did not provide stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    /// Full commit hash.
    pub sha: Option<String>,
    /// Human-facing commit page.
    pub url: Option<String>,
    /// Author name.
    pub author_name: Option<String>,
    /// Author date.
    pub author_date: Option<CommitDate>,
}

impl CommitInfo {
    /// Abbreviated hash, if the full hash is known.
    #[must_use]
    pub fn short_sha(&self) -> Option<&str> {
        self.sha.as_deref().map(|sha| sha.get(..8).unwrap_or(sha))
    }
}

impl From<ApiCommit> for CommitInfo {
    fn from(api: ApiCommit) -> Self {
        let author_name = api.author_name().map(str::to_string);
        let author_date = api.author_date();
        Self { sha: api.sha, url: api.html_url, author_name, author_date }
    }
}

/// Confirms `revision` exists in the agent repository and returns its metadata.
///
/// Tries the commit API first; when that does not answer 200 with a commit
/// body, a 200 from the human-facing commit page still confirms the revision,
/// with only the URL known.
///
/// # Errors
///
/// Returns the fallback tier's failure when neither tier confirms the revision.
pub async fn lookup_revision(
    ctx: &ServiceContext,
    config: &FinderConfig,
    revision: &RevisionId,
) -> Result<CommitInfo, TransportError> {
    let endpoints = Endpoints::new(config);

    match fetch_json::<ApiCommit>(ctx.http.as_ref(), &endpoints.agent_commit(revision.as_str())).await
    {
        Ok(api) => return Ok(api.into()),
        Err(e) => warn!(%revision, "commit API lookup failed, trying commit page: {e}"),
    }

    let page = endpoints.agent_commit_page(revision.as_str());
    fetch_body(ctx.http.as_ref(), &HttpRequest::get(page.clone())).await?;
    info!(%revision, "revision confirmed via commit page");
    Ok(CommitInfo { sha: Some(revision.to_string()), url: Some(page), ..CommitInfo::default() })
}

/// Latest commit of the integrations repository at `version` (branch or tag).
///
/// Uses the commits list filtered by `version`, then the commit-by-ref
/// endpoint.
///
/// # Errors
///
/// Returns the fallback tier's failure when neither tier yields a commit.
pub async fn latest_commit_for_version(
    ctx: &ServiceContext,
    config: &FinderConfig,
    version: &str,
) -> Result<CommitInfo, TransportError> {
    let endpoints = Endpoints::new(config);

    let listed = endpoints.integrations_latest_commit(version);
    match fetch_json::<Vec<ApiCommit>>(ctx.http.as_ref(), &listed).await {
        Ok(commits) => {
            if let Some(first) = commits.into_iter().next() {
                return Ok(first.into());
            }
            warn!(version, "commits list for version is empty, trying commit by ref");
        }
        Err(e) => warn!(version, "commits list lookup failed, trying commit by ref: {e}"),
    }

    let by_ref = endpoints.integrations_commit(version);
    fetch_json::<ApiCommit>(ctx.http.as_ref(), &by_ref).await.map(CommitInfo::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction, RecordedOutcome};
    use chrono::Utc;
    use serde_json::json;

    fn ctx(exchanges: Vec<(HttpRequest, RecordedOutcome)>) -> ServiceContext {
        let cassette = Cassette {
            name: "commit".into(),
            recorded_at: Utc::now(),
            interactions: exchanges
                .into_iter()
                .zip(0..)
                .map(|((request, response), seq)| Interaction { seq, request, response })
                .collect(),
        };
        ServiceContext::from_cassette(&cassette)
    }

    fn revision() -> RevisionId {
        RevisionId::parse("a1b2c3d4").unwrap()
    }

    #[tokio::test]
    async fn api_commit_yields_full_metadata() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);
        let body = json!({
            "sha": "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678",
            "html_url": "https://github.com/StackVista/stackstate-agent/commit/a1b2c3d4e5f6",
            "commit": {"author": {"name": "Jane Doe", "date": "2024-03-01T12:30:00Z"}}
        });
        let ctx = ctx(vec![(endpoints.agent_commit("a1b2c3d4"), RecordedOutcome::ok(body.to_string()))]);

        let info = lookup_revision(&ctx, &config, &revision()).await.unwrap();
        assert_eq!(info.author_name.as_deref(), Some("Jane Doe"));
        assert_eq!(info.short_sha(), Some("a1b2c3d4"));
        assert!(info.author_date.is_some());
    }

    #[tokio::test]
    async fn commit_page_confirms_when_api_refuses() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);
        let page = endpoints.agent_commit_page("a1b2c3d4");
        let ctx = ctx(vec![
            (endpoints.agent_commit("a1b2c3d4"), RecordedOutcome::status(403)),
            (HttpRequest::get(page.clone()), RecordedOutcome::ok("<html></html>")),
        ]);

        let info = lookup_revision(&ctx, &config, &revision()).await.unwrap();
        assert_eq!(info.url.as_deref(), Some(page.as_str()));
        assert_eq!(info.author_name, None);
        assert_eq!(info.author_date, None);
    }

    #[tokio::test]
    async fn network_failure_on_primary_still_tries_fallback() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);
        let page = endpoints.agent_commit_page("a1b2c3d4");
        let ctx = ctx(vec![
            (
                endpoints.agent_commit("a1b2c3d4"),
                RecordedOutcome::Error { message: "connection reset".into() },
            ),
            (HttpRequest::get(page), RecordedOutcome::status(404)),
        ]);

        let err = lookup_revision(&ctx, &config, &revision()).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn latest_commit_prefers_filtered_list() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);
        let list = json!([{"sha": "0123456789abcdef", "commit": {"author": {"name": "Bot"}}}]);
        let ctx = ctx(vec![(
            endpoints.integrations_latest_commit("7.51.1-3"),
            RecordedOutcome::ok(list.to_string()),
        )]);

        let info = latest_commit_for_version(&ctx, &config, "7.51.1-3").await.unwrap();
        assert_eq!(info.short_sha(), Some("01234567"));
        assert_eq!(info.author_name.as_deref(), Some("Bot"));
    }

    #[tokio::test]
    async fn empty_list_falls_back_to_commit_by_ref() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);
        let ctx = ctx(vec![
            (endpoints.integrations_latest_commit("main"), RecordedOutcome::ok("[]")),
            (
                endpoints.integrations_commit("main"),
                RecordedOutcome::ok(json!({"sha": "fedcba9876543210"}).to_string()),
            ),
        ]);

        let info = latest_commit_for_version(&ctx, &config, "main").await.unwrap();
        assert_eq!(info.short_sha(), Some("fedcba98"));
    }
}
