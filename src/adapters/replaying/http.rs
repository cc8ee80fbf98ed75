//! Replaying adapter for the `HttpClient` port.

use std::sync::{Mutex, PoisonError};

use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::http::{HttpClient, HttpFuture, HttpRequest};

/// Serves recorded responses from a cassette instead of the network.
pub struct ReplayingHttpClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpClient {
    /// Creates a replaying client from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self { replayer: Mutex::new(CassetteReplayer::new(cassette)) }
    }

    /// Number of recorded responses that were never requested.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replayer.lock().unwrap_or_else(PoisonError::into_inner).remaining()
    }
}

impl HttpClient for ReplayingHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        // A miss panics inside the lock; other requests keep replaying.
        let outcome =
            self.replayer.lock().unwrap_or_else(PoisonError::into_inner).next_outcome(request);
        let request = request.clone();
        Box::pin(async move { outcome.to_result(&request) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Interaction, RecordedOutcome};
    use crate::error::TransportError;
    use chrono::Utc;

    #[tokio::test]
    async fn replays_responses_and_errors() {
        let ok = HttpRequest::get("https://a.test/ok");
        let down = HttpRequest::get("https://a.test/down");
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            interactions: vec![
                Interaction { seq: 0, request: ok.clone(), response: RecordedOutcome::ok("hi") },
                Interaction {
                    seq: 1,
                    request: down.clone(),
                    response: RecordedOutcome::Error { message: "refused".into() },
                },
            ],
        };
        let client = ReplayingHttpClient::new(&cassette);

        assert_eq!(client.get(&ok).await.unwrap().body, "hi");
        assert!(matches!(client.get(&down).await, Err(TransportError::Network { .. })));
        assert_eq!(client.remaining(), 0);
    }

    #[tokio::test]
    async fn unrecorded_request_does_not_block_others() {
        let ok = HttpRequest::get("https://a.test/ok");
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            interactions: vec![Interaction { seq: 0, request: ok.clone(), response: RecordedOutcome::ok("hi") }],
        };
        let client = ReplayingHttpClient::new(&cassette);

        let missed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            drop(client.get(&HttpRequest::get("https://a.test/missing")));
        }));
        assert!(missed.is_err());

        assert_eq!(client.get(&ok).await.unwrap().body, "hi");
        assert_eq!(client.remaining(), 0);
    }
}
