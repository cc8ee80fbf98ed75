//! Cassette data structures for recording and replaying HTTP exchanges.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::ports::http::{HttpRequest, HttpResponse};

/// What a recorded request produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordedOutcome {
    /// The server answered.
    Response {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// No response was received.
    Error {
        /// Client error message.
        message: String,
    },
}

impl RecordedOutcome {
    /// Captures the result of a live request.
    #[must_use]
    pub fn from_result(result: &Result<HttpResponse, TransportError>) -> Self {
        match result {
            Ok(response) => Self::Response { status: response.status, body: response.body.clone() },
            Err(TransportError::Network { message, .. }) => Self::Error { message: message.clone() },
            Err(other) => Self::Error { message: other.to_string() },
        }
    }

    /// Turns the recording back into what the live client returned.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] for recorded errors.
    pub fn to_result(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        match self {
            Self::Response { status, body } => Ok(HttpResponse { status: *status, body: body.clone() }),
            Self::Error { message } => {
                Err(TransportError::Network { url: request.url.clone(), message: message.clone() })
            }
        }
    }

    /// Convenience constructor for a 200 response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::Response { status: 200, body: body.into() }
    }

    /// Convenience constructor for a response with an arbitrary status.
    pub fn status(status: u16) -> Self {
        Self::Response { status, body: String::new() }
    }
}

/// A single recorded request and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// The request that was sent.
    pub request: HttpRequest,
    /// What came back.
    pub response: RecordedOutcome,
}

/// A cassette containing a sequence of recorded exchanges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads a YAML cassette from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}
