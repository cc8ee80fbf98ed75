//! Subsets of the hosting API's JSON bodies the finder reads.
//!
//! Every field is optional or defaulted: partial bodies degrade to unknown
//! metadata instead of failing the lookup.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body of the commit endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCommit {
    /// Full commit hash.
    #[serde(default)]
    pub sha: Option<String>,
    /// Human-facing commit page.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Git-level commit data.
    #[serde(default)]
    pub commit: Option<CommitDetail>,
}

/// The `commit` object nested in [`ApiCommit`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    /// Author signature.
    #[serde(default)]
    pub author: Option<Signature>,
}

/// A git signature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Signature {
    /// Author name.
    #[serde(default)]
    pub name: Option<String>,
    /// ISO-8601 timestamp as sent by the API.
    #[serde(default)]
    pub date: Option<String>,
}

impl ApiCommit {
    /// Author name, if the body carried one.
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.signature().and_then(|s| s.name.as_deref())
    }

    /// Author date, if present. Text that is not RFC 3339 is kept verbatim.
    #[must_use]
    pub fn author_date(&self) -> Option<CommitDate> {
        self.signature()
            .and_then(|s| s.date.as_deref())
            .filter(|raw| !raw.is_empty())
            .map(CommitDate::parse)
    }

    fn signature(&self) -> Option<&Signature> {
        self.commit.as_ref().and_then(|c| c.author.as_ref())
    }
}

/// A commit timestamp as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommitDate {
    /// A well-formed RFC 3339 timestamp, normalized to UTC.
    Parsed(DateTime<Utc>),
    /// Anything else, shown as sent.
    Raw(String),
}

impl CommitDate {
    /// Parses `raw`, falling back to the text itself.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        DateTime::parse_from_rfc3339(raw)
            .map(|date| Self::Parsed(date.with_timezone(&Utc)))
            .unwrap_or_else(|_| Self::Raw(raw.to_string()))
    }
}

impl fmt::Display for CommitDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(date) => f.write_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

/// Body of the file-contents endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsEntry {
    /// `file`, `dir`, `symlink` or `submodule`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Base64 file body, wrapped at 60 columns.
    #[serde(default)]
    pub content: Option<String>,
}

/// One entry of the tags list.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
}
