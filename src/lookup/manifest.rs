//! Reads the integrations version from the dependency manifest at a revision.

use serde_json::Value;
use tracing::{info, warn};

use super::{fetch_body, fetch_json};
use crate::config::FinderConfig;
use crate::context::ServiceContext;
use crate::error::{ManifestError, TransportError};
use crate::github::models::ContentsEntry;
use crate::github::Endpoints;
use crate::revision::RevisionId;

/// Reads `config.version_key` from `config.manifest_path` as committed at `revision`.
///
/// The contents API is tried first; if it does not yield a decodable file,
/// the raw-content URL is used. A manifest that parses but has no usable
/// value under the key is final: the raw file would carry the same content.
///
/// # Errors
///
/// Returns the reason the last attempted tier failed.
pub async fn read_dependency_version(
    ctx: &ServiceContext,
    config: &FinderConfig,
    revision: &RevisionId,
) -> Result<String, ManifestError> {
    let endpoints = Endpoints::new(config);

    match contents_manifest(ctx, config, &endpoints, revision).await {
        Ok(manifest) => return version_from(&manifest, &config.version_key),
        Err(e) => warn!(%revision, "contents API manifest read failed, trying raw URL: {e}"),
    }

    let raw = endpoints.manifest_raw(revision.as_str());
    let body = fetch_body(ctx.http.as_ref(), &raw).await?;
    let manifest = parse_manifest(&body)?;
    info!(%revision, "manifest read from raw URL");
    version_from(&manifest, &config.version_key)
}

async fn contents_manifest(
    ctx: &ServiceContext,
    config: &FinderConfig,
    endpoints: &Endpoints<'_>,
    revision: &RevisionId,
) -> Result<Value, ManifestError> {
    let request = endpoints.manifest_contents(revision.as_str());
    let entry: ContentsEntry = fetch_json(ctx.http.as_ref(), &request).await?;
    if entry.kind != "file" {
        return Err(ManifestError::NotAFile { path: config.manifest_path.clone() });
    }
    let encoded = entry.content.ok_or_else(|| {
        ManifestError::from(TransportError::Decode {
            url: request.url.clone(),
            message: "file entry has no content".into(),
        })
    })?;
    parse_manifest(&decode_content(&encoded)?)
}

/// Decodes the contents API's line-wrapped base64 body.
fn decode_content(encoded: &str) -> Result<String, ManifestError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::decode(compact).map_err(|e| ManifestError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ManifestError::Encoding(e.to_string()))
}

fn parse_manifest(text: &str) -> Result<Value, ManifestError> {
    serde_json::from_str(text).map_err(|e| ManifestError::Json(e.to_string()))
}

fn version_from(manifest: &Value, key: &str) -> Result<String, ManifestError> {
    manifest
        .get(key)
        .and_then(Value::as_str)
        .filter(|version| !version.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ManifestError::MissingKey { key: key.to_string() })
}
