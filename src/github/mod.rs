//! GitHub facade built on Octocrab.
//!
//! This module defines the [`ForgeApi`] capability set, the Octocrab-backed
//! implementation bound to a single repository, and the request, response
//! and model types that flow through it. Failures are returned as
//! [`ForgeError`] values that keep the service's status and message intact.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod options;
pub mod pagination;
pub mod rate_limit;
pub mod response;

#[cfg(feature = "test-support")]
pub mod substitute;

pub use error::ForgeError;
pub use gateway::{ForgeApi, OctocrabForge};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{
    CommitComment, IssueComment, Label, NewCommitComment, NewIssueComment, NewPullRequestComment,
    PullRequestComment, RepositoryCommit,
};
pub use options::{
    CommitListOptions, IssueCommentListOptions, ListOptions, PullRequestCommentListOptions,
    SortDirection,
};
pub use pagination::PageLinks;
pub use rate_limit::RateLimitInfo;
pub use response::{ForgeResponse, ForgeResult, ResponseMeta};

#[cfg(test)]
pub use gateway::MockForgeApi;

#[cfg(test)]
mod tests;
