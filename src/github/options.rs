//! Listing options forwarded as query parameters.
//!
//! Unset fields are left out of the query string so that GitHub applies its
//! own defaults. Values are passed through without range checks.

use chrono::{DateTime, SecondsFormat, Utc};
use url::form_urlencoded::Serializer;

/// Sort direction for comment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

impl SortDirection {
    /// Returns the GitHub API query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Page selection shared by every listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u8>,
}

impl ListOptions {
    /// Selects a page and page size.
    #[must_use]
    pub const fn page(page: u32, per_page: u8) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    fn append_to(&self, query: &mut Query) {
        query.push_number("page", self.page);
        query.push_number("per_page", self.per_page);
    }

    /// Renders the options as a query string (without the leading `?`).
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = Query::default();
        self.append_to(&mut query);
        query.finish()
    }
}

/// Options for listing review comments on a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestCommentListOptions {
    /// Sort field (`created` or `updated`).
    pub sort: Option<String>,
    /// Sort direction; only honoured together with `sort`.
    pub direction: Option<SortDirection>,
    /// Only comments updated at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Page selection.
    pub list: ListOptions,
}

impl PullRequestCommentListOptions {
    /// Renders the options as a query string (without the leading `?`).
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = Query::default();
        query.push_str("sort", self.sort.as_deref());
        query.push_str("direction", self.direction.map(SortDirection::as_str));
        query.push_time("since", self.since);
        self.list.append_to(&mut query);
        query.finish()
    }
}

/// Options for listing comments on an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueCommentListOptions {
    /// Sort field (`created` or `updated`).
    pub sort: Option<String>,
    /// Sort direction; only honoured together with `sort`.
    pub direction: Option<SortDirection>,
    /// Only comments updated at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Page selection.
    pub list: ListOptions,
}

impl IssueCommentListOptions {
    /// Renders the options as a query string (without the leading `?`).
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = Query::default();
        query.push_str("sort", self.sort.as_deref());
        query.push_str("direction", self.direction.map(SortDirection::as_str));
        query.push_time("since", self.since);
        self.list.append_to(&mut query);
        query.finish()
    }
}

/// Options for listing repository commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitListOptions {
    /// SHA or branch to start listing from.
    pub sha: Option<String>,
    /// Only commits touching this path.
    pub path: Option<String>,
    /// Only commits by this GitHub login or email address.
    pub author: Option<String>,
    /// Only commits after this time.
    pub since: Option<DateTime<Utc>>,
    /// Only commits before this time.
    pub until: Option<DateTime<Utc>>,
    /// Page selection.
    pub list: ListOptions,
}

impl CommitListOptions {
    /// Renders the options as a query string (without the leading `?`).
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = Query::default();
        query.push_str("sha", self.sha.as_deref());
        query.push_str("path", self.path.as_deref());
        query.push_str("author", self.author.as_deref());
        query.push_time("since", self.since);
        query.push_time("until", self.until);
        self.list.append_to(&mut query);
        query.finish()
    }
}

struct Query(Serializer<'static, String>);

impl Default for Query {
    fn default() -> Self {
        Self(Serializer::new(String::new()))
    }
}

impl Query {
    fn push_str(&mut self, key: &str, value: Option<&str>) {
        if let Some(present) = value {
            self.0.append_pair(key, present);
        }
    }

    fn push_number<T: ToString>(&mut self, key: &str, value: Option<T>) {
        if let Some(present) = value {
            self.0.append_pair(key, &present.to_string());
        }
    }

    fn push_time(&mut self, key: &str, value: Option<DateTime<Utc>>) {
        if let Some(present) = value {
            self.0
                .append_pair(key, &present.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }

    fn finish(mut self) -> String {
        self.0.finish()
    }
}
