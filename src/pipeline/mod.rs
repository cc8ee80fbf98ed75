//! The resolution pipeline: input text to integrations source location.
//!
//! Steps run strictly in sequence because each consumes the previous one's
//! output. Extraction, revision lookup and manifest reading are mandatory
//! and stop the resolution with a [`ResolveError`]; the integrations commit
//! lookup and tag classification only degrade the report.

pub mod report;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::FinderConfig;
use crate::context::ServiceContext;
use crate::error::ResolveError;
use crate::github::Endpoints;
use crate::lookup::{self, CommitInfo};
use crate::revision::{self, RevisionId};

/// Everything gathered by a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Revision id extracted from the input.
    pub revision: RevisionId,
    /// Agent commit at that revision.
    pub agent_commit: CommitInfo,
    /// Integrations version named by the agent's manifest.
    pub integrations_version: String,
    /// Latest integrations commit at that version, when it could be fetched.
    pub integrations_commit: Option<CommitInfo>,
    /// Whether the version is not a released tag.
    pub is_branch: bool,
    /// Browse URL of the integrations repository at the version.
    pub integrations_url: String,
}

/// The single value handed to a front-end for every resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionOutcome {
    /// Whether a complete report was produced.
    pub success: bool,
    /// The report, or the reason the resolution stopped.
    pub report: String,
    /// Whether the integrations version looks like a development branch.
    pub is_branch: bool,
    /// Browse URL of the integrations source, on success.
    pub integrations_url: Option<String>,
}

impl ResolutionOutcome {
    /// Outcome for a completed resolution.
    #[must_use]
    pub fn completed(resolution: &Resolution) -> Self {
        Self {
            success: true,
            report: report::render(resolution),
            is_branch: resolution.is_branch,
            integrations_url: Some(resolution.integrations_url.clone()),
        }
    }

    /// Outcome for a resolution stopped by a mandatory step.
    #[must_use]
    pub fn failed(error: &ResolveError) -> Self {
        Self { success: false, report: error.to_string(), is_branch: false, integrations_url: None }
    }
}

/// Resolves agent container tags to integrations source locations.
///
/// Holds one [`ServiceContext`] for its lifetime, so every request of every
/// resolution reuses the same HTTP connection pool. Resolutions share no
/// other state and may run concurrently.
pub struct IntegrationsFinder {
    ctx: ServiceContext,
    config: FinderConfig,
}

impl IntegrationsFinder {
    /// Creates a finder over the given ports and configuration.
    #[must_use]
    pub fn new(ctx: ServiceContext, config: FinderConfig) -> Self {
        Self { ctx, config }
    }

    /// The ports this finder talks through.
    #[must_use]
    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Resolves `input` and renders the outcome.
    pub async fn resolve(&self, input: &str) -> ResolutionOutcome {
        match self.try_resolve(input).await {
            Ok(resolution) => ResolutionOutcome::completed(&resolution),
            Err(e) => {
                warn!("resolution failed: {e}");
                ResolutionOutcome::failed(&e)
            }
        }
    }

    /// Resolves `input`, returning the gathered data.
    ///
    /// # Errors
    ///
    /// Returns the first mandatory step that failed.
    pub async fn try_resolve(&self, input: &str) -> Result<Resolution, ResolveError> {
        let revision = revision::extract(input)
            .ok_or_else(|| ResolveError::Extraction { input: input.to_string() })?;
        info!(%revision, "extracted revision");

        let agent_commit = lookup::lookup_revision(&self.ctx, &self.config, &revision)
            .await
            .map_err(|reason| ResolveError::RevisionNotFound {
                revision: revision.to_string(),
                reason,
            })?;
        info!(url = agent_commit.url.as_deref().unwrap_or(report::UNKNOWN), "found agent commit");

        let integrations_version =
            lookup::read_dependency_version(&self.ctx, &self.config, &revision).await.map_err(
                |reason| ResolveError::ManifestUnavailable {
                    revision: revision.to_string(),
                    manifest: self.config.manifest_path.clone(),
                    reason,
                },
            )?;
        info!(version = %integrations_version, "found integrations version");

        let integrations_commit =
            match lookup::latest_commit_for_version(&self.ctx, &self.config, &integrations_version)
                .await
            {
                Ok(commit) => Some(commit),
                Err(e) => {
                    warn!(version = %integrations_version, "integrations commit unavailable: {e}");
                    None
                }
            };

        let is_branch = lookup::is_branch(&self.ctx, &self.config, &integrations_version).await;
        let integrations_url = Endpoints::new(&self.config).integrations_tree(&integrations_version);

        Ok(Resolution {
            revision,
            agent_commit,
            integrations_version,
            integrations_commit,
            is_branch,
            integrations_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction, RecordedOutcome};
    use crate::ports::http::HttpRequest;
    use chrono::Utc;
    use serde_json::json;

    fn finder(exchanges: Vec<(HttpRequest, RecordedOutcome)>) -> IntegrationsFinder {
        let cassette = Cassette {
            name: "pipeline".into(),
            recorded_at: Utc::now(),
            interactions: exchanges
                .into_iter()
                .zip(0..)
                .map(|((request, response), seq)| Interaction { seq, request, response })
                .collect(),
        };
        IntegrationsFinder::new(ServiceContext::from_cassette(&cassette), FinderConfig::default())
    }

    #[tokio::test]
    async fn unextractable_input_fails_without_requests() {
        let finder = finder(vec![]);
        let outcome = finder.resolve("invalid-input").await;
        assert!(!outcome.success);
        assert_eq!(outcome.report, "Could not extract 8-character SHA from: invalid-input");
        assert_eq!(outcome.integrations_url, None);
    }

    #[tokio::test]
    async fn unknown_revision_short_circuits() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);
        // Any manifest request would panic: none is recorded.
        let finder = finder(vec![
            (endpoints.agent_commit("deadbeef"), RecordedOutcome::status(422)),
            (
                HttpRequest::get(endpoints.agent_commit_page("deadbeef")),
                RecordedOutcome::status(404),
            ),
        ]);

        let outcome = finder.resolve("deadbeef").await;
        assert!(!outcome.success);
        assert!(outcome.report.contains("Could not find agent commit with SHA: deadbeef"));
        assert!(!outcome.is_branch);
    }

    #[tokio::test]
    async fn degraded_best_effort_steps_still_complete() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);
        let finder = finder(vec![
            (
                endpoints.agent_commit("a1b2c3d4"),
                RecordedOutcome::ok(json!({"sha": "a1b2c3d4aaaa"}).to_string()),
            ),
            (endpoints.manifest_contents("a1b2c3d4"), RecordedOutcome::status(500)),
            (
                endpoints.manifest_raw("a1b2c3d4"),
                RecordedOutcome::ok(json!({"STACKSTATE_INTEGRATIONS_VERSION": "main"}).to_string()),
            ),
            (
                endpoints.integrations_latest_commit("main"),
                RecordedOutcome::Error { message: "timed out".into() },
            ),
            (endpoints.integrations_commit("main"), RecordedOutcome::status(404)),
            (endpoints.integrations_tags(), RecordedOutcome::status(403)),
        ]);

        let resolution = finder.try_resolve("a1b2c3d4").await.unwrap();
        assert!(resolution.is_branch);
        assert_eq!(resolution.integrations_commit, None);
        assert_eq!(
            resolution.integrations_url,
            "https://github.com/StackVista/stackstate-agent-integrations/tree/main"
        );
    }
}
