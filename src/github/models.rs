//! Data models exchanged with the GitHub REST API.
//!
//! Response types mirror GitHub's documented schemas; fields the service may
//! omit are optional and unknown fields are ignored. Request payloads only
//! serialise the fields a caller set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub account attached to comments and commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Account login.
    pub login: String,
    /// Numeric account identifier.
    pub id: u64,
    /// GraphQL node identifier.
    pub node_id: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Profile page URL.
    pub html_url: Option<String>,
    /// Account kind (`User`, `Bot`, `Organization`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Whether the account is a site administrator.
    pub site_admin: Option<bool>,
}

/// Review comment attached to a pull request diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestComment {
    /// Comment identifier.
    pub id: u64,
    /// GraphQL node identifier.
    pub node_id: Option<String>,
    /// API URL of the comment.
    pub url: Option<String>,
    /// Web URL of the comment.
    pub html_url: Option<String>,
    /// API URL of the pull request.
    pub pull_request_url: Option<String>,
    /// Comment body.
    pub body: Option<String>,
    /// Comment author.
    pub user: Option<User>,
    /// File path the comment is attached to.
    pub path: Option<String>,
    /// Diff hunk context for this comment.
    pub diff_hunk: Option<String>,
    /// Position in the diff.
    pub position: Option<u32>,
    /// Position in the diff when the comment was created.
    pub original_position: Option<u32>,
    /// Line of the blob the comment applies to.
    pub line: Option<u32>,
    /// Original line before any changes.
    pub original_line: Option<u32>,
    /// First line of a multi-line comment.
    pub start_line: Option<u32>,
    /// Side of the diff (`LEFT` or `RIGHT`).
    pub side: Option<String>,
    /// Side of the first line of a multi-line comment.
    pub start_side: Option<String>,
    /// Commit SHA the comment refers to.
    pub commit_id: Option<String>,
    /// Commit SHA the comment was originally made against.
    pub original_commit_id: Option<String>,
    /// ID of the comment this is replying to, if any.
    pub in_reply_to_id: Option<u64>,
    /// Relationship of the author to the repository.
    pub author_association: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Discussion comment on an issue or pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueComment {
    /// Comment identifier.
    pub id: u64,
    /// GraphQL node identifier.
    pub node_id: Option<String>,
    /// API URL of the comment.
    pub url: Option<String>,
    /// Web URL of the comment.
    pub html_url: Option<String>,
    /// API URL of the issue.
    pub issue_url: Option<String>,
    /// Comment body.
    pub body: Option<String>,
    /// Comment author.
    pub user: Option<User>,
    /// Relationship of the author to the repository.
    pub author_association: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Label attached to an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    /// Label identifier.
    pub id: u64,
    /// GraphQL node identifier.
    pub node_id: Option<String>,
    /// API URL of the label.
    pub url: Option<String>,
    /// Label name.
    pub name: String,
    /// Hex colour without the leading `#`.
    pub color: Option<String>,
    /// Label description.
    pub description: Option<String>,
    /// Whether this is one of the repository's default labels.
    pub default: Option<bool>,
}

impl Label {
    /// Creates a label carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Comment attached to a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitComment {
    /// Comment identifier.
    pub id: u64,
    /// GraphQL node identifier.
    pub node_id: Option<String>,
    /// API URL of the comment.
    pub url: Option<String>,
    /// Web URL of the comment.
    pub html_url: Option<String>,
    /// Comment body.
    pub body: Option<String>,
    /// Comment author.
    pub user: Option<User>,
    /// File path the comment refers to.
    pub path: Option<String>,
    /// Position in the diff.
    pub position: Option<u32>,
    /// Line in the file.
    pub line: Option<u32>,
    /// Commit SHA the comment is attached to.
    pub commit_id: Option<String>,
    /// Relationship of the author to the repository.
    pub author_association: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Git signature recorded on a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    /// Author or committer name.
    pub name: Option<String>,
    /// Author or committer email.
    pub email: Option<String>,
    /// Signature timestamp.
    pub date: Option<DateTime<Utc>>,
}

/// Reference to another git object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitRef {
    /// Object SHA.
    pub sha: String,
    /// API URL of the object.
    pub url: Option<String>,
    /// Web URL of the object.
    pub html_url: Option<String>,
}

/// Git-level commit details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitDetail {
    /// Commit message.
    pub message: Option<String>,
    /// Git author.
    pub author: Option<Signature>,
    /// Git committer.
    pub committer: Option<Signature>,
    /// Tree the commit points at.
    pub tree: Option<CommitRef>,
    /// Number of commit comments.
    pub comment_count: Option<u32>,
    /// API URL of the git commit.
    pub url: Option<String>,
}

/// Line statistics for a commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitStats {
    /// Lines added.
    pub additions: u64,
    /// Lines removed.
    pub deletions: u64,
    /// Lines changed in total.
    pub total: u64,
}

/// File touched by a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitFile {
    /// Path of the file.
    pub filename: String,
    /// Change kind (`added`, `modified`, `removed`, `renamed`, ...).
    pub status: Option<String>,
    /// Lines added.
    pub additions: u64,
    /// Lines removed.
    pub deletions: u64,
    /// Lines changed in total.
    pub changes: u64,
    /// Unified diff for the file, when GitHub includes it.
    pub patch: Option<String>,
    /// Path before a rename.
    pub previous_filename: Option<String>,
    /// Blob SHA.
    pub sha: Option<String>,
    /// Web URL of the blob.
    pub blob_url: Option<String>,
    /// Raw download URL.
    pub raw_url: Option<String>,
}

/// Commit as returned by the repository commits endpoints.
///
/// `stats` and `files` are only populated when a single commit is fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryCommit {
    /// Commit SHA.
    pub sha: String,
    /// GraphQL node identifier.
    pub node_id: Option<String>,
    /// API URL of the commit.
    pub url: Option<String>,
    /// Web URL of the commit.
    pub html_url: Option<String>,
    /// API URL of the commit's comments.
    pub comments_url: Option<String>,
    /// Git-level details.
    pub commit: Option<CommitDetail>,
    /// GitHub account matched to the git author.
    pub author: Option<User>,
    /// GitHub account matched to the git committer.
    pub committer: Option<User>,
    /// Parent commits.
    pub parents: Vec<CommitRef>,
    /// Line statistics.
    pub stats: Option<CommitStats>,
    /// Files touched by the commit.
    pub files: Vec<CommitFile>,
}

/// Payload for creating a pull request review comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewPullRequestComment {
    /// Comment body.
    pub body: String,
    /// Commit SHA the comment refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
    /// File path to comment on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Position in the diff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// Line of the blob to comment on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Side of the diff (`LEFT` or `RIGHT`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// First line of a multi-line comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    /// Side of the first line of a multi-line comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_side: Option<String>,
    /// Review comment this one replies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<u64>,
}

impl NewPullRequestComment {
    /// Creates a payload carrying only a body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }
}

/// Payload for creating an issue comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewIssueComment {
    /// Comment body.
    pub body: String,
}

impl NewIssueComment {
    /// Creates a payload with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Payload for creating a commit comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewCommitComment {
    /// Comment body.
    pub body: String,
    /// File path to comment on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Position in the diff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// Line in the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl NewCommitComment {
    /// Creates a payload carrying only a body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{
        IssueComment, NewCommitComment, NewPullRequestComment, PullRequestComment,
        RepositoryCommit,
    };

    #[rstest]
    fn review_comment_deserialises_from_json() {
        let value = json!({
            "id": 456,
            "body": "Consider using a constant here.",
            "user": { "login": "reviewer", "id": 9, "type": "User" },
            "path": "src/main.rs",
            "line": 42,
            "original_line": 40,
            "side": "RIGHT",
            "diff_hunk": "@@ -38,6 +38,8 @@\n+    let x = 1;",
            "commit_id": "abc123",
            "in_reply_to_id": null,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-02T00:00:00Z",
            "_links": { "self": { "href": "ignored" } }
        });

        let comment: PullRequestComment =
            serde_json::from_value(value).expect("review comment should deserialise");
        assert_eq!(comment.id, 456);
        assert_eq!(comment.body.as_deref(), Some("Consider using a constant here."));
        let user = comment.user.expect("user should be present");
        assert_eq!(user.login, "reviewer");
        assert_eq!(user.kind.as_deref(), Some("User"));
        assert_eq!(comment.line, Some(42));
        assert_eq!(comment.original_line, Some(40));
        assert_eq!(comment.commit_id.as_deref(), Some("abc123"));
        assert!(comment.in_reply_to_id.is_none());
        assert!(comment.created_at.is_some());
    }

    #[rstest]
    fn issue_comment_tolerates_sparse_payload() {
        let comment: IssueComment =
            serde_json::from_value(json!({ "id": 7 })).expect("sparse comment should deserialise");
        assert_eq!(comment.id, 7);
        assert!(comment.body.is_none());
        assert!(comment.user.is_none());
    }

    #[rstest]
    fn single_commit_carries_stats_and_files() {
        let value = json!({
            "sha": "abc123",
            "commit": {
                "message": "Fix parser",
                "author": { "name": "Octo", "email": "octo@example.com", "date": "2025-01-01T00:00:00Z" },
                "comment_count": 0
            },
            "author": { "login": "octocat", "id": 1 },
            "parents": [{ "sha": "def456" }],
            "stats": { "additions": 3, "deletions": 1, "total": 4 },
            "files": [{ "filename": "src/lib.rs", "status": "modified", "additions": 3, "deletions": 1, "changes": 4 }]
        });

        let commit: RepositoryCommit =
            serde_json::from_value(value).expect("commit should deserialise");
        assert_eq!(commit.sha, "abc123");
        assert_eq!(
            commit.commit.and_then(|detail| detail.message).as_deref(),
            Some("Fix parser")
        );
        assert_eq!(commit.parents.len(), 1);
        assert_eq!(commit.stats.map(|stats| stats.total), Some(4));
        assert_eq!(
            commit.files.first().map(|file| file.filename.as_str()),
            Some("src/lib.rs")
        );
    }

    #[rstest]
    fn new_comment_payloads_omit_unset_fields() {
        let review = serde_json::to_value(NewPullRequestComment::new("LGTM"))
            .expect("payload should serialise");
        assert_eq!(review, json!({ "body": "LGTM" }));

        let commit = serde_json::to_value(NewCommitComment {
            path: Some("README.md".to_owned()),
            line: Some(3),
            ..NewCommitComment::new("typo")
        })
        .expect("payload should serialise");
        assert_eq!(
            commit,
            json!({ "body": "typo", "path": "README.md", "line": 3 })
        );
    }
}
