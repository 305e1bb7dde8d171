//! In-memory stand-in for the forge, for tests that must not touch the network.
//!
//! [`InMemoryForge`] keeps comments, labels and commits for one repository in
//! memory and answers the [`ForgeApi`] operations the way GitHub would for the
//! same data: identifiers are assigned on creation, listings are paged with
//! the requested [`ListOptions`], and unknown items produce a 404 `Api` error.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::StatusCode;

use super::error::ForgeError;
use super::gateway::ForgeApi;
use super::models::{
    CommitComment, IssueComment, Label, NewCommitComment, NewIssueComment, NewPullRequestComment,
    PullRequestComment, RepositoryCommit, User,
};
use super::options::{
    CommitListOptions, IssueCommentListOptions, ListOptions, PullRequestCommentListOptions,
    SortDirection,
};
use super::pagination::PageLinks;
use super::response::{ForgeResponse, ForgeResult, ResponseMeta};

const DEFAULT_PER_PAGE: usize = 30;
const MAX_PER_PAGE: usize = 100;
const DEFAULT_LOGIN: &str = "octocat";

/// One call received by an [`InMemoryForge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `create_pull_request_comment` on pull request `number`.
    CreatePullRequestComment {
        /// Pull request number.
        number: u64,
        /// Comment body.
        body: String,
    },
    /// `delete_pull_request_comment` for `comment_id`.
    DeletePullRequestComment {
        /// Review comment identifier.
        comment_id: u64,
    },
    /// `list_pull_request_comments` on pull request `number`.
    ListPullRequestComments {
        /// Pull request number.
        number: u64,
    },
    /// `create_issue_comment` on issue `number`.
    CreateIssueComment {
        /// Issue number.
        number: u64,
        /// Comment body.
        body: String,
    },
    /// `delete_issue_comment` for `comment_id`.
    DeleteIssueComment {
        /// Issue comment identifier.
        comment_id: u64,
    },
    /// `list_issue_comments` on issue `number`.
    ListIssueComments {
        /// Issue number.
        number: u64,
    },
    /// `add_labels` on issue `number`.
    AddLabels {
        /// Issue number.
        number: u64,
        /// Label names as supplied.
        labels: Vec<String>,
    },
    /// `list_labels` on issue `number`.
    ListLabels {
        /// Issue number.
        number: u64,
    },
    /// `remove_label` on issue `number`.
    RemoveLabel {
        /// Issue number.
        number: u64,
        /// Label name.
        label: String,
    },
    /// `create_commit_comment` on commit `sha`.
    CreateCommitComment {
        /// Commit SHA.
        sha: String,
        /// Comment body.
        body: String,
    },
    /// `list_commits`.
    ListCommits,
    /// `get_commit` for `sha`.
    GetCommit {
        /// Commit SHA.
        sha: String,
    },
}

#[derive(Debug, Default)]
struct State {
    last_id: u64,
    pull_request_comments: Vec<(u64, PullRequestComment)>,
    issue_comments: Vec<(u64, IssueComment)>,
    catalogue: Vec<Label>,
    issue_labels: BTreeMap<u64, Vec<Label>>,
    commits: Vec<RepositoryCommit>,
    commit_comments: Vec<CommitComment>,
    pending_failure: Option<ForgeError>,
    calls: Vec<RecordedCall>,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.last_id = self.last_id.saturating_add(1);
        self.last_id
    }

    /// Keeps seeded identifiers and allocates fresh ones for zero.
    fn claim_id(&mut self, requested: u64) -> u64 {
        if requested == 0 {
            return self.next_id();
        }
        self.last_id = self.last_id.max(requested);
        requested
    }

    fn catalogue_label(&mut self, name: &str) -> Label {
        if let Some(existing) = self.catalogue.iter().find(|label| label.name == name) {
            return existing.clone();
        }
        let label = Label {
            id: self.next_id(),
            ..Label::named(name)
        };
        self.catalogue.push(label.clone());
        label
    }

    fn labels_mut(&mut self, number: u64) -> &mut Vec<Label> {
        self.issue_labels.entry(number).or_default()
    }

    fn labels(&self, number: u64) -> &[Label] {
        self.issue_labels.get(&number).map_or(&[], Vec::as_slice)
    }

    fn find_commit(&self, sha: &str) -> Option<&RepositoryCommit> {
        self.commits.iter().find(|commit| commit.sha == sha)
    }

    /// Records the call and hands back a primed failure, if any.
    fn begin(&mut self, call: RecordedCall) -> Result<(), ForgeError> {
        self.calls.push(call);
        self.pending_failure.take().map_or(Ok(()), Err)
    }
}

/// In-memory [`ForgeApi`] implementation for tests.
///
/// # Example
///
/// ```
/// use forge_facade::{ForgeApi, InMemoryForge, NewPullRequestComment};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let forge = InMemoryForge::new();
/// let created = forge
///     .create_pull_request_comment(5, &NewPullRequestComment::new("LGTM"))
///     .await
///     .expect("substitute accepts comments");
/// assert_eq!(created.body.body.as_deref(), Some("LGTM"));
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryForge {
    login: String,
    state: Mutex<State>,
}

impl InMemoryForge {
    /// Creates an empty forge whose comments are authored by `octocat`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_login(DEFAULT_LOGIN)
    }

    /// Creates an empty forge whose comments are authored by `login`.
    #[must_use]
    pub fn with_login(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            state: Mutex::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut State {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a review comment on pull request `number`.
    ///
    /// A zero `id` is replaced with a fresh identifier.
    #[must_use]
    pub fn with_pull_request_comment(mut self, number: u64, comment: PullRequestComment) -> Self {
        let state = self.state_mut();
        let id = state.claim_id(comment.id);
        state
            .pull_request_comments
            .push((number, PullRequestComment { id, ..comment }));
        self
    }

    /// Seeds a comment on issue `number`.
    ///
    /// A zero `id` is replaced with a fresh identifier.
    #[must_use]
    pub fn with_issue_comment(mut self, number: u64, comment: IssueComment) -> Self {
        let state = self.state_mut();
        let id = state.claim_id(comment.id);
        state
            .issue_comments
            .push((number, IssueComment { id, ..comment }));
        self
    }

    /// Attaches labels to issue `number`, skipping names already present.
    #[must_use]
    pub fn with_labels(mut self, number: u64, names: &[&str]) -> Self {
        let state = self.state_mut();
        for name in names {
            attach_label(state, number, name);
        }
        self
    }

    /// Seeds a commit, replacing any commit with the same SHA.
    #[must_use]
    pub fn with_commit(mut self, commit: RepositoryCommit) -> Self {
        let state = self.state_mut();
        state.commits.retain(|existing| existing.sha != commit.sha);
        state.commits.push(commit);
        self
    }

    /// Makes the next call fail with `error`, whatever the operation.
    pub fn fail_next(&self, error: ForgeError) {
        self.state().pending_failure = Some(error);
    }

    /// Calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    /// Commit comments created so far.
    #[must_use]
    pub fn commit_comments(&self) -> Vec<CommitComment> {
        self.state().commit_comments.clone()
    }

    fn author(&self) -> User {
        User {
            login: self.login.clone(),
            kind: Some("User".to_owned()),
            ..User::default()
        }
    }
}

impl Default for InMemoryForge {
    fn default() -> Self {
        Self::new()
    }
}

fn attach_label(state: &mut State, number: u64, name: &str) {
    let label = state.catalogue_label(name);
    let labels = state.labels_mut(number);
    if labels.iter().all(|existing| existing.name != label.name) {
        labels.push(label);
    }
}

fn respond<T>(body: T, status: StatusCode) -> ForgeResult<T> {
    Ok(ForgeResponse::new(body, ResponseMeta::with_status(status.as_u16())))
}

/// Returns the requested page of `items` with GitHub-style page links.
fn paginate<T: Clone>(items: &[T], options: &ListOptions) -> ForgeResponse<Vec<T>> {
    let per_page = options
        .per_page
        .map_or(DEFAULT_PER_PAGE, usize::from)
        .clamp(1, MAX_PER_PAGE);
    let page = options.page.unwrap_or(1).max(1);
    let total_pages = u32::try_from(items.len().div_ceil(per_page).max(1)).unwrap_or(u32::MAX);

    let skip = usize::try_from(page.saturating_sub(1))
        .unwrap_or(usize::MAX)
        .saturating_mul(per_page);
    let body = items.iter().skip(skip).take(per_page).cloned().collect();

    let forward = if page < total_pages {
        PageLinks::EMPTY
            .with_next(Some(page.saturating_add(1)))
            .with_last(Some(total_pages))
    } else {
        PageLinks::EMPTY
    };
    let pages = if page > 1 {
        forward
            .with_prev(Some(page.saturating_sub(1).min(total_pages)))
            .with_first(Some(1))
    } else {
        forward
    };

    ForgeResponse::new(
        body,
        ResponseMeta {
            pages,
            ..ResponseMeta::with_status(StatusCode::OK.as_u16())
        },
    )
}

/// Applies the `sort`, `direction` and `since` comment filters.
fn order_comments<T>(
    mut comments: Vec<T>,
    sort: Option<&str>,
    direction: Option<SortDirection>,
    since: Option<DateTime<Utc>>,
    timestamps: impl Fn(&T) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>),
) -> Vec<T> {
    if let Some(threshold) = since {
        comments.retain(|comment| {
            let (created, updated) = timestamps(comment);
            updated.or(created).is_some_and(|at| at >= threshold)
        });
    }
    if sort == Some("updated") {
        comments.sort_by_key(|comment| {
            let (created, updated) = timestamps(comment);
            updated.or(created)
        });
    }
    if sort.is_some() && direction == Some(SortDirection::Descending) {
        comments.reverse();
    }
    comments
}

fn commit_matches(commit: &RepositoryCommit, options: &CommitListOptions) -> bool {
    let author_matches = options.author.as_deref().is_none_or(|wanted| {
        commit
            .author
            .as_ref()
            .is_some_and(|user| user.login == wanted)
            || commit
                .commit
                .as_ref()
                .and_then(|detail| detail.author.as_ref())
                .and_then(|signature| signature.email.as_deref())
                .is_some_and(|email| email == wanted)
    });
    let path_matches = options.path.as_deref().is_none_or(|wanted| {
        commit.files.is_empty() || commit.files.iter().any(|file| file.filename == wanted)
    });
    author_matches && path_matches
}

#[async_trait]
impl ForgeApi for InMemoryForge {
    async fn create_pull_request_comment(
        &self,
        number: u64,
        comment: &NewPullRequestComment,
    ) -> ForgeResult<PullRequestComment> {
        let mut state = self.state();
        state.begin(RecordedCall::CreatePullRequestComment {
            number,
            body: comment.body.clone(),
        })?;
        let now = Utc::now();
        let created = PullRequestComment {
            id: state.next_id(),
            body: Some(comment.body.clone()),
            user: Some(self.author()),
            path: comment.path.clone(),
            position: comment.position,
            line: comment.line,
            side: comment.side.clone(),
            start_line: comment.start_line,
            start_side: comment.start_side.clone(),
            commit_id: comment.commit_id.clone(),
            in_reply_to_id: comment.in_reply_to,
            created_at: Some(now),
            updated_at: Some(now),
            ..PullRequestComment::default()
        };
        state
            .pull_request_comments
            .push((number, created.clone()));
        respond(created, StatusCode::CREATED)
    }

    async fn delete_pull_request_comment(&self, comment_id: u64) -> ForgeResult<()> {
        let mut state = self.state();
        state.begin(RecordedCall::DeletePullRequestComment { comment_id })?;
        let before = state.pull_request_comments.len();
        state
            .pull_request_comments
            .retain(|(_, comment)| comment.id != comment_id);
        if state.pull_request_comments.len() == before {
            return Err(ForgeError::not_found("Not Found"));
        }
        respond((), StatusCode::NO_CONTENT)
    }

    async fn list_pull_request_comments(
        &self,
        number: u64,
        options: &PullRequestCommentListOptions,
    ) -> ForgeResult<Vec<PullRequestComment>> {
        let mut state = self.state();
        state.begin(RecordedCall::ListPullRequestComments { number })?;
        let comments = state
            .pull_request_comments
            .iter()
            .filter(|(pull, _)| *pull == number)
            .map(|(_, comment)| comment.clone())
            .collect();
        let ordered = order_comments(
            comments,
            options.sort.as_deref(),
            options.direction,
            options.since,
            |comment: &PullRequestComment| (comment.created_at, comment.updated_at),
        );
        Ok(paginate(&ordered, &options.list))
    }

    async fn create_issue_comment(
        &self,
        number: u64,
        comment: &NewIssueComment,
    ) -> ForgeResult<IssueComment> {
        let mut state = self.state();
        state.begin(RecordedCall::CreateIssueComment {
            number,
            body: comment.body.clone(),
        })?;
        let now = Utc::now();
        let created = IssueComment {
            id: state.next_id(),
            body: Some(comment.body.clone()),
            user: Some(self.author()),
            created_at: Some(now),
            updated_at: Some(now),
            ..IssueComment::default()
        };
        state.issue_comments.push((number, created.clone()));
        respond(created, StatusCode::CREATED)
    }

    async fn delete_issue_comment(&self, comment_id: u64) -> ForgeResult<()> {
        let mut state = self.state();
        state.begin(RecordedCall::DeleteIssueComment { comment_id })?;
        let before = state.issue_comments.len();
        state
            .issue_comments
            .retain(|(_, comment)| comment.id != comment_id);
        if state.issue_comments.len() == before {
            return Err(ForgeError::not_found("Not Found"));
        }
        respond((), StatusCode::NO_CONTENT)
    }

    async fn list_issue_comments(
        &self,
        number: u64,
        options: &IssueCommentListOptions,
    ) -> ForgeResult<Vec<IssueComment>> {
        let mut state = self.state();
        state.begin(RecordedCall::ListIssueComments { number })?;
        let comments = state
            .issue_comments
            .iter()
            .filter(|(issue, _)| *issue == number)
            .map(|(_, comment)| comment.clone())
            .collect();
        let ordered = order_comments(
            comments,
            options.sort.as_deref(),
            options.direction,
            options.since,
            |comment: &IssueComment| (comment.created_at, comment.updated_at),
        );
        Ok(paginate(&ordered, &options.list))
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> ForgeResult<Vec<Label>> {
        let mut state = self.state();
        state.begin(RecordedCall::AddLabels {
            number,
            labels: labels.to_vec(),
        })?;
        for name in labels {
            attach_label(&mut state, number, name);
        }
        respond(state.labels(number).to_vec(), StatusCode::OK)
    }

    async fn list_labels(&self, number: u64, options: &ListOptions) -> ForgeResult<Vec<Label>> {
        let mut state = self.state();
        state.begin(RecordedCall::ListLabels { number })?;
        Ok(paginate(state.labels(number), options))
    }

    async fn remove_label(&self, number: u64, label: &str) -> ForgeResult<()> {
        let mut state = self.state();
        state.begin(RecordedCall::RemoveLabel {
            number,
            label: label.to_owned(),
        })?;
        let labels = state.labels_mut(number);
        let before = labels.len();
        labels.retain(|existing| existing.name != label);
        if labels.len() == before {
            return Err(ForgeError::not_found("Label does not exist"));
        }
        respond((), StatusCode::OK)
    }

    async fn create_commit_comment(
        &self,
        sha: &str,
        comment: &NewCommitComment,
    ) -> ForgeResult<CommitComment> {
        let mut state = self.state();
        state.begin(RecordedCall::CreateCommitComment {
            sha: sha.to_owned(),
            body: comment.body.clone(),
        })?;
        if state.find_commit(sha).is_none() {
            return Err(ForgeError::not_found(format!("No commit found for SHA: {sha}")));
        }
        let now = Utc::now();
        let created = CommitComment {
            id: state.next_id(),
            body: Some(comment.body.clone()),
            user: Some(self.author()),
            path: comment.path.clone(),
            position: comment.position,
            line: comment.line,
            commit_id: Some(sha.to_owned()),
            created_at: Some(now),
            updated_at: Some(now),
            ..CommitComment::default()
        };
        state.commit_comments.push(created.clone());
        respond(created, StatusCode::CREATED)
    }

    async fn list_commits(
        &self,
        options: &CommitListOptions,
    ) -> ForgeResult<Vec<RepositoryCommit>> {
        let mut state = self.state();
        state.begin(RecordedCall::ListCommits)?;
        let matching: Vec<RepositoryCommit> = state
            .commits
            .iter()
            .filter(|commit| commit_matches(commit, options))
            .cloned()
            .collect();
        Ok(paginate(&matching, &options.list))
    }

    async fn get_commit(&self, sha: &str) -> ForgeResult<RepositoryCommit> {
        let mut state = self.state();
        state.begin(RecordedCall::GetCommit {
            sha: sha.to_owned(),
        })?;
        state.find_commit(sha).cloned().map_or_else(
            || Err(ForgeError::not_found(format!("No commit found for SHA: {sha}"))),
            |commit| respond(commit, StatusCode::OK),
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{InMemoryForge, RecordedCall};
    use crate::github::error::ForgeError;
    use crate::github::gateway::ForgeApi;
    use crate::github::models::{
        IssueComment, NewCommitComment, NewIssueComment, NewPullRequestComment,
        RepositoryCommit,
    };
    use crate::github::options::{
        CommitListOptions, IssueCommentListOptions, ListOptions, PullRequestCommentListOptions,
    };

    #[fixture]
    fn forge() -> InMemoryForge {
        InMemoryForge::new()
            .with_labels(7, &["bug", "triage"])
            .with_commit(RepositoryCommit {
                sha: "abc123".to_owned(),
                ..RepositoryCommit::default()
            })
    }

    #[rstest]
    #[tokio::test]
    async fn created_comments_get_distinct_ids(forge: InMemoryForge) {
        let first = forge
            .create_pull_request_comment(5, &NewPullRequestComment::new("one"))
            .await
            .expect("first comment");
        let second = forge
            .create_pull_request_comment(5, &NewPullRequestComment::new("two"))
            .await
            .expect("second comment");

        assert_ne!(first.body.id, second.body.id);
        assert_eq!(first.meta.status, 201);
        assert_eq!(
            first.body.user.map(|user| user.login).as_deref(),
            Some("octocat")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn deleted_comment_disappears_from_listing(forge: InMemoryForge) {
        let created = forge
            .create_issue_comment(3, &NewIssueComment::new("hello"))
            .await
            .expect("comment should be created");

        let deleted = forge
            .delete_issue_comment(created.body.id)
            .await
            .expect("delete should succeed");
        assert_eq!(deleted.meta.status, 204);

        let listed = forge
            .list_issue_comments(3, &IssueCommentListOptions::default())
            .await
            .expect("listing should succeed");
        assert!(listed.body.is_empty());

        let again = forge.delete_issue_comment(created.body.id).await;
        assert!(
            again.as_ref().is_err_and(ForgeError::is_not_found),
            "second delete should be not found, got {again:?}"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn labels_stay_unique_per_issue(forge: InMemoryForge) {
        let added = forge
            .add_labels(7, &["bug".to_owned(), "docs".to_owned()])
            .await
            .expect("labels should be added");

        let names: Vec<&str> = added.body.iter().map(|label| label.name.as_str()).collect();
        assert_eq!(names, vec!["bug", "triage", "docs"]);
    }

    #[rstest]
    #[tokio::test]
    async fn removing_unknown_label_is_not_found(forge: InMemoryForge) {
        forge
            .remove_label(7, "bug")
            .await
            .expect("known label should be removed");

        let error = forge
            .remove_label(7, "bug")
            .await
            .expect_err("label is already gone");
        assert!(error.is_not_found());
    }

    #[rstest]
    #[case::first_page(1, vec![1, 2], Some(2), None)]
    #[case::last_page(2, vec![3], None, Some(1))]
    #[case::past_the_end(4, vec![], None, Some(2))]
    #[tokio::test]
    async fn listings_are_paged(
        #[case] page: u32,
        #[case] expected_ids: Vec<u64>,
        #[case] next: Option<u32>,
        #[case] prev: Option<u32>,
    ) {
        let forge = InMemoryForge::new()
            .with_pull_request_comment(9, Default::default())
            .with_pull_request_comment(9, Default::default())
            .with_pull_request_comment(9, Default::default());
        let options = PullRequestCommentListOptions {
            list: ListOptions::page(page, 2),
            ..PullRequestCommentListOptions::default()
        };

        let listed = forge
            .list_pull_request_comments(9, &options)
            .await
            .expect("listing should succeed");

        let ids: Vec<u64> = listed.body.iter().map(|comment| comment.id).collect();
        assert_eq!(ids, expected_ids);
        assert_eq!(listed.meta.pages.next(), next);
        assert_eq!(listed.meta.pages.prev(), prev);
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_ids_are_kept(forge: InMemoryForge) {
        let seeded = forge.with_issue_comment(
            2,
            IssueComment {
                id: 500,
                ..IssueComment::default()
            },
        );
        let created = seeded
            .create_issue_comment(2, &NewIssueComment::new("next"))
            .await
            .expect("comment should be created");

        assert_eq!(created.body.id, 501);
    }

    #[rstest]
    #[tokio::test]
    async fn commit_comments_require_known_commit(forge: InMemoryForge) {
        let created = forge
            .create_commit_comment("abc123", &NewCommitComment::new("nice"))
            .await
            .expect("comment on known commit");
        assert_eq!(created.body.commit_id.as_deref(), Some("abc123"));
        assert_eq!(forge.commit_comments().len(), 1);

        let error = forge
            .create_commit_comment("ffffff", &NewCommitComment::new("nope"))
            .await
            .expect_err("unknown commit");
        assert!(error.is_not_found());
    }

    #[rstest]
    #[tokio::test]
    async fn primed_failure_applies_once(forge: InMemoryForge) {
        forge.fail_next(ForgeError::Network {
            message: "connection reset".to_owned(),
        });

        let failed = forge.list_commits(&CommitListOptions::default()).await;
        assert!(matches!(failed, Err(ForgeError::Network { .. })));

        let listed = forge
            .list_commits(&CommitListOptions::default())
            .await
            .expect("second call should succeed");
        assert_eq!(listed.body.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn records_calls_in_order(forge: InMemoryForge) {
        let _unused = forge.get_commit("abc123").await;
        let _labels = forge.list_labels(7, &ListOptions::default()).await;

        assert_eq!(
            forge.calls(),
            vec![
                RecordedCall::GetCommit {
                    sha: "abc123".to_owned()
                },
                RecordedCall::ListLabels { number: 7 },
            ]
        );
    }
}
