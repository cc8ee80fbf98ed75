//! Error taxonomy for remote lookups and the resolution pipeline.

use thiserror::Error;

/// Failure of a single request against the hosting API.
///
/// Expected failure modes (404s, timeouts, unexpected bodies) are values of
/// this type rather than panics; callers decide whether they are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        message: String,
    },
    /// The server answered with something other than 200.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },
    /// The body could not be interpreted.
    #[error("unexpected response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// What was wrong with the body.
        message: String,
    },
}

/// Why the dependency manifest could not be read at a revision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// The request for the manifest failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The contents endpoint described something other than a file.
    #[error("{path} is not a file")]
    NotAFile {
        /// Manifest path inside the repository.
        path: String,
    },
    /// The file body was not valid base64 or UTF-8.
    #[error("manifest content could not be decoded: {0}")]
    Encoding(String),
    /// The file body was not valid JSON.
    #[error("manifest is not valid JSON: {0}")]
    Json(String),
    /// The JSON document has no usable value under the version key.
    #[error("manifest has no {key} entry")]
    MissingKey {
        /// The key that was looked up.
        key: String,
    },
}

/// A mandatory pipeline step failed; the resolution stops here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No revision id could be found in the input text.
    #[error("Could not extract 8-character SHA from: {input}")]
    Extraction {
        /// The text that was searched.
        input: String,
    },
    /// Neither lookup tier confirmed the revision upstream.
    #[error("Could not find agent commit with SHA: {revision} ({reason})")]
    RevisionNotFound {
        /// The extracted revision id.
        revision: String,
        /// Failure of the last tier that was tried.
        reason: TransportError,
    },
    /// The manifest at the revision is missing or lacks the version field.
    #[error("Could not find integrations version in {manifest} for SHA: {revision} ({reason})")]
    ManifestUnavailable {
        /// The extracted revision id.
        revision: String,
        /// Manifest path inside the agent repository.
        manifest: String,
        /// Failure of the last tier that was tried.
        reason: ManifestError,
    },
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Repository coordinates are not of the form `owner/name`.
    #[error("invalid repository '{0}', expected OWNER/NAME")]
    Repository(String),
    /// A base URL cannot have path segments appended to it.
    #[error("base URL '{0}' cannot be used as a base")]
    BaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_not_found_names_the_revision_and_reason() {
        let err = ResolveError::RevisionNotFound {
            revision: "a1b2c3d4".into(),
            reason: TransportError::Status { url: "https://example.test/x".into(), status: 404 },
        };
        let message = err.to_string();
        assert!(message.starts_with("Could not find agent commit with SHA: a1b2c3d4"));
        assert!(message.contains("HTTP 404"));
    }

    #[test]
    fn manifest_transport_error_is_transparent() {
        let inner = TransportError::Network { url: "u".into(), message: "timed out".into() };
        let err = ManifestError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
