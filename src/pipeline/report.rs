//! Human-readable rendering of a completed resolution.

use std::fmt::Write as _;

use super::Resolution;
use crate::github::models::CommitDate;

/// Placeholder for metadata the hosting API did not provide.
pub const UNKNOWN: &str = "N/A";

/// Headline of the branch warning block; front-ends may search for it.
pub const BRANCH_WARNING_HEADLINE: &str = "WARNING: This integrations version";

/// Warning shown when the integrations version is not a released tag.
#[must_use]
pub fn branch_warning(version: &str) -> String {
    format!(
        "⚠️  {BRANCH_WARNING_HEADLINE} ({version}) appears to be a development branch, \
         not a released tag.\n   This means you're working with an unofficial/unreleased \
         development version of the integrations."
    )
}

/// Renders the full success report.
#[must_use]
pub fn render(resolution: &Resolution) -> String {
    let mut out = String::from("Success! Found integrations source code:");
    if resolution.is_branch {
        let _ = write!(out, "\n{}", branch_warning(&resolution.integrations_version));
    }
    out.push_str("\n\n");

    let agent = &resolution.agent_commit;
    let _ = writeln!(out, "SUSE Observability Agent Commit:");
    let _ = writeln!(out, "  SHA: {}", resolution.revision);
    let _ = writeln!(out, "  URL: {}", agent.url.as_deref().unwrap_or(UNKNOWN));
    let _ = writeln!(out, "  Date: {}", date(agent.author_date.as_ref()));
    let _ = writeln!(out, "  Committer: {}", agent.author_name.as_deref().unwrap_or(UNKNOWN));
    out.push('\n');

    let integrations = resolution.integrations_commit.as_ref();
    let kind = if resolution.is_branch { "(DEVELOPMENT BRANCH)" } else { "(RELEASED TAG)" };
    let _ = writeln!(out, "Integrations Commit:");
    let _ = writeln!(out, "  Version: {} {kind}", resolution.integrations_version);
    let _ = writeln!(
        out,
        "  SHA: {}",
        integrations.and_then(|c| c.short_sha()).unwrap_or(UNKNOWN)
    );
    let _ = writeln!(out, "  URL: {}", resolution.integrations_url);
    let _ = writeln!(out, "  Date: {}", date(integrations.and_then(|c| c.author_date.as_ref())));
    let _ = writeln!(
        out,
        "  Committer: {}",
        integrations.and_then(|c| c.author_name.as_deref()).unwrap_or(UNKNOWN)
    );
    out.push('\n');
    out.push_str("Click the integrations URL above to view the source code.");
    out
}

fn date(value: Option<&CommitDate>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::CommitInfo;
    use crate::revision::RevisionId;

    fn resolution(is_branch: bool, integrations_commit: Option<CommitInfo>) -> Resolution {
        Resolution {
            revision: RevisionId::parse("a1b2c3d4").unwrap(),
            agent_commit: CommitInfo {
                sha: Some("a1b2c3d4ffff".into()),
                url: Some("https://github.com/o/agent/commit/a1b2c3d4ffff".into()),
                author_name: Some("Jane Doe".into()),
                author_date: Some(CommitDate::parse("2024-03-01T12:30:00Z")),
            },
            integrations_version: "7.51.1-3".into(),
            integrations_commit,
            is_branch,
            integrations_url: "https://github.com/o/integrations/tree/7.51.1-3".into(),
        }
    }

    #[test]
    fn tag_report_has_no_warning() {
        let report = render(&resolution(false, None));
        assert!(!report.contains(BRANCH_WARNING_HEADLINE));
        assert!(report.contains("Version: 7.51.1-3 (RELEASED TAG)"));
        assert!(report.contains("  Date: 2024-03-01T12:30:00Z"));
        assert!(report.contains("  Committer: Jane Doe"));
    }

    #[test]
    fn branch_report_leads_with_warning() {
        let report = render(&resolution(true, None));
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("Success! Found integrations source code:"));
        assert!(lines.next().unwrap().contains(BRANCH_WARNING_HEADLINE));
        assert!(report.contains("(DEVELOPMENT BRANCH)"));
    }

    #[test]
    fn raw_dates_are_shown_as_sent() {
        let integrations = CommitInfo {
            author_date: Some(CommitDate::parse("last tuesday")),
            ..CommitInfo::default()
        };
        let report = render(&resolution(false, Some(integrations)));
        let integrations = report.split("Integrations Commit:").nth(1).unwrap();
        assert!(integrations.contains("  Date: last tuesday"));
    }

    #[test]
    fn unknown_integrations_metadata_renders_placeholders() {
        let report = render(&resolution(false, None));
        let integrations = report.split("Integrations Commit:").nth(1).unwrap();
        assert!(integrations.contains("  SHA: N/A"));
        assert!(integrations.contains("  Date: N/A"));
        assert!(integrations.contains("  Committer: N/A"));
        assert!(integrations.contains("  URL: https://github.com/o/integrations/tree/7.51.1-3"));
    }
}
