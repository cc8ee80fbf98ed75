//! Tag-versus-branch classification of an integrations version.

use tracing::{info, warn};

use super::fetch_json;
use crate::config::FinderConfig;
use crate::context::ServiceContext;
use crate::github::models::Tag;
use crate::github::Endpoints;

/// Returns `false` if `version` names a tag of the integrations repository,
/// `true` otherwise.
///
/// Only the first page of the tags list is inspected, so a tag beyond it is
/// reported as a branch. If the tags cannot be listed at all the answer is
/// `true`: an unverifiable version is never presented as a released tag.
pub async fn is_branch(ctx: &ServiceContext, config: &FinderConfig, version: &str) -> bool {
    let request = Endpoints::new(config).integrations_tags();
    match fetch_json::<Vec<Tag>>(ctx.http.as_ref(), &request).await {
        Ok(tags) => {
            let tagged = tags.iter().any(|tag| tag.name == version);
            info!(version, tagged, checked = tags.len(), "classified integrations version");
            !tagged
        }
        Err(e) => {
            warn!(version, "could not list tags, assuming a branch: {e}");
            true
        }
    }
}
