//! Narrow GitHub REST facade for notifier components.
//!
//! The crate exposes a fixed set of forge operations (pull request comments,
//! issue comments, issue labels, commit comments and commit lookups) behind
//! the [`ForgeApi`] trait. [`OctocrabForge`] forwards each call to Octocrab
//! for a single configured repository, while callers under test can swap in
//! a substitute such as the in-memory forge shipped with the `test-support`
//! feature.

pub mod config;
pub mod github;

pub use config::{ForgeConfig, load_config};
pub use github::{
    CommitComment, CommitListOptions, ForgeApi, ForgeError, ForgeResponse, ForgeResult,
    IssueComment, IssueCommentListOptions, Label, ListOptions, NewCommitComment,
    NewIssueComment, NewPullRequestComment, OctocrabForge, PageLinks, PersonalAccessToken,
    PullRequestComment, PullRequestCommentListOptions, RateLimitInfo, RepositoryCommit,
    RepositoryLocator, ResponseMeta, SortDirection,
};

#[cfg(feature = "test-support")]
pub use github::substitute::{InMemoryForge, RecordedCall};
