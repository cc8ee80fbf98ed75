//! Replays recorded exchanges from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, RecordedOutcome};
use crate::ports::http::HttpRequest;

/// Serves recorded outcomes for identical requests, in recording order.
pub struct CassetteReplayer {
    queues: HashMap<HttpRequest, VecDeque<(u64, RecordedOutcome)>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<HttpRequest, VecDeque<(u64, RecordedOutcome)>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry(interaction.request.clone())
                .or_default()
                .push_back((interaction.seq, interaction.response.clone()));
        }
        Self { queues }
    }

    /// Return the next recorded outcome for `request`.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) outcomes for this exact request,
    /// listing the requests that are still available.
    pub fn next_outcome(&mut self, request: &HttpRequest) -> RecordedOutcome {
        let Some(queue) = self.queues.get_mut(request) else {
            let mut available: Vec<String> = self.queues.keys().map(describe).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for {}. Available requests: [{}]",
                describe(request),
                available.join(", ")
            );
        };

        let Some((_, outcome)) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: all interactions for {} have been consumed.",
                describe(request)
            );
        };
        outcome
    }

    /// Number of recorded outcomes not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}

fn describe(request: &HttpRequest) -> String {
    if request.query.is_empty() {
        return format!("GET {}", request.url);
    }
    let query: Vec<String> = request.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("GET {}?{}", request.url, query.join("&"))
}
