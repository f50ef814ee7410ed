//! Typed GitHub webhook payloads.
//!
//! Every field the handlers read is `#[serde(default)]`: the provider omits
//! optional fields freely and a missing value must fall back to a documented
//! default rather than fail deserialization.

use serde::Deserialize;

/// Repository block common to all event payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRepository {
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitRef {
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
}

/// `pull_request` event payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestEvent {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub pull_request: PullRequest,
    #[serde(default)]
    pub repository: EventRepository,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub user: Actor,
    #[serde(default)]
    pub base: GitRef,
    #[serde(default)]
    pub head: GitRef,
    /// Absent on non-close actions; defaults to false.
    #[serde(default)]
    pub merged: bool,
}

/// `push` event payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushEvent {
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub pusher: Pusher,
    #[serde(default)]
    pub forced: bool,
    #[serde(default)]
    pub commits: Vec<PushCommit>,
    #[serde(default)]
    pub repository: EventRepository,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pusher {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushCommit {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

/// `workflow_run` event payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowRunEvent {
    #[serde(default)]
    pub workflow_run: WorkflowRun,
    #[serde(default)]
    pub repository: EventRepository,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowRun {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub head_branch: Option<String>,
    #[serde(default)]
    pub head_sha: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub head_commit: Option<HeadCommit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadCommit {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub author: CommitAuthor,
}

/// Strips a `refs/<kind>/` prefix from a push ref, e.g. `refs/heads/main`
/// becomes `main`. Anything without the prefix is used as-is.
pub fn branch_from_ref(git_ref: &str) -> String {
    git_ref
        .strip_prefix("refs/")
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, branch)| branch.to_string())
        .unwrap_or_else(|| git_ref.to_string())
}

/// Shortens a commit sha for display.
///
/// Truncates on a char boundary; the field is provider-controlled and not
/// guaranteed to be hex.
pub fn short_sha(sha: &str) -> &str {
    sha.char_indices().nth(7).map_or(sha, |(i, _)| &sha[..i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_from_ref_strips_known_prefixes() {
        assert_eq!(branch_from_ref("refs/heads/main"), "main");
        assert_eq!(branch_from_ref("refs/heads/release/1.0"), "release/1.0");
        assert_eq!(branch_from_ref("refs/tags/v1.2.3"), "v1.2.3");
        assert_eq!(branch_from_ref("main"), "main");
    }

    #[test]
    fn short_sha_truncates_on_char_boundaries() {
        assert_eq!(short_sha("a1b2c3d4e5f60718"), "a1b2c3d");
        assert_eq!(short_sha("a1b2c3d"), "a1b2c3d");
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(short_sha(""), "");
        // Multibyte input must not panic mid-character.
        assert_eq!(short_sha("aaaaaaé0000"), "aaaaaaé");
        assert_eq!(short_sha("ééééééé-tail"), "ééééééé");
    }

    #[test]
    fn pull_request_merged_defaults_to_false() {
        let payload: PullRequestEvent = serde_json::from_value(serde_json::json!({
            "action": "closed",
            "pull_request": {"number": 7},
            "repository": {"full_name": "acme/widgets"}
        }))
        .unwrap();
        assert!(!payload.pull_request.merged);
        assert_eq!(payload.pull_request.number, 7);
    }

    #[test]
    fn push_event_tolerates_missing_commits() {
        let payload: PushEvent = serde_json::from_value(serde_json::json!({
            "ref": "refs/heads/main",
            "repository": {"full_name": "acme/widgets"}
        }))
        .unwrap();
        assert!(payload.commits.is_empty());
        assert!(!payload.forced);
    }
}
