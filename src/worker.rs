//! Background execution of resolutions for responsive front-ends.
//!
//! A submitted resolution runs as one task and delivers exactly one
//! [`ResolutionOutcome`]; nothing is streamed and it cannot be cancelled.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::error;

use crate::pipeline::{IntegrationsFinder, ResolutionOutcome};

/// Receiving end of a submitted resolution.
pub struct PendingResolution {
    input: String,
    receiver: oneshot::Receiver<ResolutionOutcome>,
}

impl PendingResolution {
    /// The input this resolution was submitted with.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Waits for the outcome.
    ///
    /// A task that died without reporting yields a failed outcome rather
    /// than an error, so front-ends always have something to render.
    pub async fn outcome(self) -> ResolutionOutcome {
        self.receiver.await.unwrap_or_else(|_| ResolutionOutcome {
            success: false,
            report: format!("Resolution of '{}' stopped unexpectedly", self.input),
            is_branch: false,
            integrations_url: None,
        })
    }
}

/// Runs resolutions on the current tokio runtime.
#[derive(Clone)]
pub struct ResolutionWorker {
    finder: Arc<IntegrationsFinder>,
}

impl ResolutionWorker {
    /// Creates a worker sharing `finder` (and its HTTP pool) across tasks.
    #[must_use]
    pub fn new(finder: Arc<IntegrationsFinder>) -> Self {
        Self { finder }
    }

    /// Starts resolving `input` in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, input: impl Into<String>) -> PendingResolution {
        let input = input.into();
        let (sender, receiver) = oneshot::channel();
        let finder = Arc::clone(&self.finder);
        let task_input = input.clone();

        tokio::spawn(async move {
            let outcome = finder.resolve(&task_input).await;
            if sender.send(outcome).is_err() {
                error!(input = %task_input, "resolution finished after its receiver was dropped");
            }
        });

        PendingResolution { input, receiver }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction, RecordedOutcome};
    use crate::config::FinderConfig;
    use crate::context::ServiceContext;
    use crate::github::Endpoints;
    use chrono::Utc;

    fn worker(interactions: Vec<Interaction>) -> ResolutionWorker {
        let cassette = Cassette { name: "worker".into(), recorded_at: Utc::now(), interactions };
        let finder =
            IntegrationsFinder::new(ServiceContext::from_cassette(&cassette), FinderConfig::default());
        ResolutionWorker::new(Arc::new(finder))
    }

    #[tokio::test]
    async fn delivers_a_single_outcome() {
        let pending = worker(vec![]).submit("no revision here");
        assert_eq!(pending.input(), "no revision here");
        let outcome = pending.outcome().await;
        assert!(!outcome.success);
        assert!(outcome.report.starts_with("Could not extract"));
    }

    #[tokio::test]
    async fn concurrent_submissions_are_independent() {
        let config = FinderConfig::default();
        let endpoints = Endpoints::new(&config);
        let worker = worker(vec![
            Interaction {
                seq: 0,
                request: endpoints.agent_commit("aaaaaaaa"),
                response: RecordedOutcome::status(404),
            },
            Interaction {
                seq: 1,
                request: crate::ports::HttpRequest::get(endpoints.agent_commit_page("aaaaaaaa")),
                response: RecordedOutcome::status(404),
            },
        ]);

        let first = worker.submit("aaaaaaaa");
        let second = worker.submit("");
        let (first, second) = tokio::join!(first.outcome(), second.outcome());
        assert!(first.report.contains("aaaaaaaa"));
        assert!(second.report.starts_with("Could not extract"));
    }

    #[tokio::test]
    async fn panicking_task_reports_failure() {
        // The cassette has nothing for this revision, so the replaying client panics.
        let outcome = worker(vec![]).submit("a1b2c3d4").outcome().await;
        assert!(!outcome.success);
        assert!(outcome.report.contains("stopped unexpectedly"));
    }
}
