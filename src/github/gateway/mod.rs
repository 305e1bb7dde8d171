//! The forge capability set and its Octocrab implementation.
//!
//! [`ForgeApi`] lists every remote action the notifier needs. The trait-based
//! design lets callers run against a substitute in tests while
//! [`OctocrabForge`] handles real HTTP requests.

mod client;
mod error_mapping;
mod octocrab_forge;
mod transport;

pub use octocrab_forge::OctocrabForge;

use async_trait::async_trait;

use crate::github::models::{
    CommitComment, IssueComment, Label, NewCommitComment, NewIssueComment, NewPullRequestComment,
    PullRequestComment, RepositoryCommit,
};
use crate::github::options::{
    CommitListOptions, IssueCommentListOptions, ListOptions, PullRequestCommentListOptions,
};
use crate::github::response::ForgeResult;

/// Forge operations scoped to one repository.
///
/// Implementations attach their fixed repository identity to each call and
/// return the service's answer unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForgeApi: Send + Sync {
    /// Create a review comment on pull request `number`.
    async fn create_pull_request_comment(
        &self,
        number: u64,
        comment: &NewPullRequestComment,
    ) -> ForgeResult<PullRequestComment>;

    /// Delete the review comment `comment_id`.
    async fn delete_pull_request_comment(&self, comment_id: u64) -> ForgeResult<()>;

    /// List one page of review comments on pull request `number`.
    async fn list_pull_request_comments(
        &self,
        number: u64,
        options: &PullRequestCommentListOptions,
    ) -> ForgeResult<Vec<PullRequestComment>>;

    /// Create a comment on issue (or pull request) `number`.
    async fn create_issue_comment(
        &self,
        number: u64,
        comment: &NewIssueComment,
    ) -> ForgeResult<IssueComment>;

    /// Delete the issue comment `comment_id`.
    async fn delete_issue_comment(&self, comment_id: u64) -> ForgeResult<()>;

    /// List one page of comments on issue `number`.
    async fn list_issue_comments(
        &self,
        number: u64,
        options: &IssueCommentListOptions,
    ) -> ForgeResult<Vec<IssueComment>>;

    /// Add `labels` to issue `number`, returning the issue's labels afterwards.
    async fn add_labels(&self, number: u64, labels: &[String]) -> ForgeResult<Vec<Label>>;

    /// List one page of labels on issue `number`.
    async fn list_labels(&self, number: u64, options: &ListOptions) -> ForgeResult<Vec<Label>>;

    /// Remove the label named `label` from issue `number`.
    async fn remove_label(&self, number: u64, label: &str) -> ForgeResult<()>;

    /// Create a comment on commit `sha`.
    async fn create_commit_comment(
        &self,
        sha: &str,
        comment: &NewCommitComment,
    ) -> ForgeResult<CommitComment>;

    /// List one page of repository commits.
    async fn list_commits(&self, options: &CommitListOptions)
    -> ForgeResult<Vec<RepositoryCommit>>;

    /// Fetch a single commit by SHA.
    async fn get_commit(&self, sha: &str) -> ForgeResult<RepositoryCommit>;
}
