//! HTTP port for read-only requests against the hosting API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Boxed future type alias used by [`HttpClient`] to keep the trait dyn-compatible.
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>;

/// An unauthenticated GET request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Absolute URL without query string.
    pub url: String,
    /// Query parameters in the order they are sent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a request for `url` with no query parameters.
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into(), query: Vec::new() }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Returns the body when the status is 200, otherwise a [`TransportError::Status`].
    ///
    /// # Errors
    ///
    /// Returns an error naming `request`'s URL for any other status.
    pub fn into_ok_body(self, request: &HttpRequest) -> Result<String, TransportError> {
        if self.status == 200 {
            Ok(self.body)
        } else {
            Err(TransportError::Status { url: request.url.clone(), status: self.status })
        }
    }
}

/// Issues GET requests.
///
/// Implementations are shared across every step of a resolution (and across
/// concurrent resolutions), so they must be usable through `&self`.
pub trait HttpClient: Send + Sync {
    /// Sends `request` and returns whatever status the server answered with.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] when no response was received.
    fn get(&self, request: &HttpRequest) -> HttpFuture<'_>;
}
