//! Octocrab implementation of the forge capability set.

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::config::ForgeConfig;
use crate::github::error::ForgeError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::{
    CommitComment, IssueComment, Label, NewCommitComment, NewIssueComment, NewPullRequestComment,
    PullRequestComment, RepositoryCommit,
};
use crate::github::options::{
    CommitListOptions, IssueCommentListOptions, ListOptions, PullRequestCommentListOptions,
};
use crate::github::response::ForgeResult;

use super::ForgeApi;
use super::client::build_octocrab_client;
use super::transport::{delete, get, post, with_query};

/// Octocrab-backed facade bound to a single repository.
#[derive(Clone)]
pub struct OctocrabForge {
    client: Octocrab,
    repository: RepositoryLocator,
}

impl OctocrabForge {
    /// Creates a facade from an already configured Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab, repository: RepositoryLocator) -> Self {
        Self { client, repository }
    }

    /// Builds an Octocrab client for the given token and repository.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::InvalidUrl` when the base URI cannot be parsed,
    /// `ForgeError::Configuration` when Octocrab rejects the base URI, and
    /// `ForgeError::Network` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        repository: RepositoryLocator,
    ) -> Result<Self, ForgeError> {
        let octocrab = build_octocrab_client(token, repository.api_base().as_str())?;
        Ok(Self::new(octocrab, repository))
    }

    /// Builds the facade from layered configuration.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::MissingToken` when no token is configured,
    /// `ForgeError::Configuration` when the repository cannot be determined,
    /// and any error from [`Self::for_token`].
    pub fn from_config(config: &ForgeConfig) -> Result<Self, ForgeError> {
        let token = PersonalAccessToken::new(config.resolve_token()?)?;
        let repository = config.repository_locator()?;
        Self::for_token(&token, repository)
    }

    /// Repository every call is scoped to.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryLocator {
        &self.repository
    }
}

#[async_trait]
impl ForgeApi for OctocrabForge {
    async fn create_pull_request_comment(
        &self,
        number: u64,
        comment: &NewPullRequestComment,
    ) -> ForgeResult<PullRequestComment> {
        const OPERATION: &str = "create pull request comment";
        let route = self.repository.pull_request_comments_path(number);
        post(&self.client, OPERATION, &route, comment)
            .await?
            .decode(OPERATION)
    }

    async fn delete_pull_request_comment(&self, comment_id: u64) -> ForgeResult<()> {
        const OPERATION: &str = "delete pull request comment";
        let route = self.repository.pull_request_comment_path(comment_id);
        Ok(delete(&self.client, OPERATION, &route).await?.empty())
    }

    async fn list_pull_request_comments(
        &self,
        number: u64,
        options: &PullRequestCommentListOptions,
    ) -> ForgeResult<Vec<PullRequestComment>> {
        const OPERATION: &str = "list pull request comments";
        let route = with_query(
            self.repository.pull_request_comments_path(number),
            &options.to_query(),
        );
        get(&self.client, OPERATION, &route).await?.decode(OPERATION)
    }

    async fn create_issue_comment(
        &self,
        number: u64,
        comment: &NewIssueComment,
    ) -> ForgeResult<IssueComment> {
        const OPERATION: &str = "create issue comment";
        let route = self.repository.issue_comments_path(number);
        post(&self.client, OPERATION, &route, comment)
            .await?
            .decode(OPERATION)
    }

    async fn delete_issue_comment(&self, comment_id: u64) -> ForgeResult<()> {
        const OPERATION: &str = "delete issue comment";
        let route = self.repository.issue_comment_path(comment_id);
        Ok(delete(&self.client, OPERATION, &route).await?.empty())
    }

    async fn list_issue_comments(
        &self,
        number: u64,
        options: &IssueCommentListOptions,
    ) -> ForgeResult<Vec<IssueComment>> {
        const OPERATION: &str = "list issue comments";
        let route = with_query(
            self.repository.issue_comments_path(number),
            &options.to_query(),
        );
        get(&self.client, OPERATION, &route).await?.decode(OPERATION)
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> ForgeResult<Vec<Label>> {
        const OPERATION: &str = "add labels";
        let route = self.repository.issue_labels_path(number);
        post(&self.client, OPERATION, &route, labels)
            .await?
            .decode(OPERATION)
    }

    async fn list_labels(&self, number: u64, options: &ListOptions) -> ForgeResult<Vec<Label>> {
        const OPERATION: &str = "list labels";
        let route = with_query(
            self.repository.issue_labels_path(number),
            &options.to_query(),
        );
        get(&self.client, OPERATION, &route).await?.decode(OPERATION)
    }

    async fn remove_label(&self, number: u64, label: &str) -> ForgeResult<()> {
        const OPERATION: &str = "remove label";
        let route = self.repository.issue_label_path(number, label);
        Ok(delete(&self.client, OPERATION, &route).await?.empty())
    }

    async fn create_commit_comment(
        &self,
        sha: &str,
        comment: &NewCommitComment,
    ) -> ForgeResult<CommitComment> {
        const OPERATION: &str = "create commit comment";
        let route = self.repository.commit_comments_path(sha);
        post(&self.client, OPERATION, &route, comment)
            .await?
            .decode(OPERATION)
    }

    async fn list_commits(
        &self,
        options: &CommitListOptions,
    ) -> ForgeResult<Vec<RepositoryCommit>> {
        const OPERATION: &str = "list commits";
        let route = with_query(self.repository.commits_path(), &options.to_query());
        get(&self.client, OPERATION, &route).await?.decode(OPERATION)
    }

    async fn get_commit(&self, sha: &str) -> ForgeResult<RepositoryCommit> {
        const OPERATION: &str = "get commit";
        let route = self.repository.commit_path(sha);
        get(&self.client, OPERATION, &route).await?.decode(OPERATION)
    }
}
