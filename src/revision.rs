//! Revision id extraction from container tags and free-form text.
//!
//! Matching is tiered so that a structural pattern (a versioned tag or the
//! known registry path) takes precedence over an arbitrary 8-character hex
//! run elsewhere in the input.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Registry path whose tags are bare revision ids.
pub const KNOWN_REGISTRY: &str = "quay.io/stackstate/stackstate-k8s-agent";

/// Length of an abbreviated revision id.
pub const REVISION_LEN: usize = 8;

static VERSIONED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+-([a-fA-F0-9]{8})").expect("versioned tag pattern")
});

static REGISTRY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{}:([a-fA-F0-9]{{8}})", regex::escape(KNOWN_REGISTRY)))
        .expect("registry tag pattern")
});

static HEX_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-fA-F0-9]+").expect("hex run pattern"));

/// An 8-character hexadecimal source revision id, case preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RevisionId(String);

impl RevisionId {
    /// Parses `text` as a revision id. The whole string must be 8 hex digits.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        is_revision(text).then(|| Self(text.to_string()))
    }

    /// Returns the id as written in the input.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RevisionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_revision(&value) {
            Ok(Self(value))
        } else {
            Err(format!("'{value}' is not an 8-character hex revision id"))
        }
    }
}

impl From<RevisionId> for String {
    fn from(id: RevisionId) -> Self {
        id.0
    }
}

fn is_revision(text: &str) -> bool {
    text.len() == REVISION_LEN && text.chars().all(|c| c.is_ascii_hexdigit())
}

/// Extracts a revision id from `text`.
///
/// Tiers, first match wins:
/// 1. the whole input is a revision id;
/// 2. a versioned tag such as `7.51.1-a1b2c3d4`;
/// 3. a tag on [`KNOWN_REGISTRY`];
/// 4. the first maximal hex run that is exactly 8 characters long.
#[must_use]
pub fn extract(text: &str) -> Option<RevisionId> {
    if let Some(id) = RevisionId::parse(text) {
        return Some(id);
    }

    let structured = VERSIONED_TAG.captures(text).or_else(|| REGISTRY_TAG.captures(text));
    if let Some(group) = structured.and_then(|caps| caps.get(1)) {
        return Some(RevisionId(group.as_str().to_string()));
    }

    HEX_RUN
        .find_iter(text)
        .find(|run| run.as_str().len() == REVISION_LEN)
        .map(|run| RevisionId(run.as_str().to_string()))
}
