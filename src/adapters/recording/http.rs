//! Recording adapter for the `HttpClient` port.

use std::sync::{Arc, Mutex};

use crate::cassette::format::RecordedOutcome;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::http::{HttpClient, HttpFuture, HttpRequest};

/// Records every exchange while delegating to an inner implementation.
pub struct RecordingHttpClient {
    inner: Box<dyn HttpClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpClient {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn HttpClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl HttpClient for RecordingHttpClient {
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.get(&request).await;
            let outcome = RecordedOutcome::from_result(&result);
            if let Ok(mut guard) = recorder.lock() {
                guard.record(request, outcome);
            }
            result
        })
    }
}
