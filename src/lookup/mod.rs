//! Remote lookups against the hosting API.
//!
//! Each lookup tries a primary API endpoint and then a fallback, and reports
//! the last failure as a [`TransportError`] value instead of aborting.

pub mod classify;
pub mod commit;
pub mod manifest;

use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::ports::http::{HttpClient, HttpRequest};

pub use classify::is_branch;
pub use commit::{latest_commit_for_version, lookup_revision, CommitInfo};
pub use manifest::read_dependency_version;

/// Fetches `request` and returns its body if the status is 200.
async fn fetch_body(http: &dyn HttpClient, request: &HttpRequest) -> Result<String, TransportError> {
    http.get(request).await?.into_ok_body(request)
}

/// Fetches `request` and parses a 200 body as JSON.
async fn fetch_json<T: DeserializeOwned>(
    http: &dyn HttpClient,
    request: &HttpRequest,
) -> Result<T, TransportError> {
    let body = fetch_body(http, request).await?;
    serde_json::from_str(&body)
        .map_err(|e| TransportError::Decode { url: request.url.clone(), message: e.to_string() })
}
