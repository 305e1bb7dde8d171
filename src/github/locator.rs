//! Repository identity and credential wrappers.
//!
//! A [`RepositoryLocator`] fixes the API base, owner and repository name once;
//! every facade call builds its route from it.

use url::Url;
use url::form_urlencoded::byte_serialize;

use super::error::ForgeError;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, ForgeError> {
        if value.trim().is_empty() {
            return Err(ForgeError::InvalidRepository {
                message: "owner must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, ForgeError> {
        if value.trim().is_empty() {
            return Err(ForgeError::InvalidRepository {
                message: "repository name must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ForgeError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ForgeError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Derives the GitHub API base URL from a parsed web URL.
///
/// `github.com` maps to the public API; any other host is treated as GitHub
/// Enterprise and served from `/api/v3`.
fn derive_api_base(parsed: &Url) -> Result<Url, ForgeError> {
    let host = parsed
        .host_str()
        .ok_or_else(|| ForgeError::InvalidUrl("URL must include a host".to_owned()))?;

    if host.eq_ignore_ascii_case("github.com") {
        return parse_api_base(GITHUB_API_BASE);
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{}://{authority}", parsed.scheme()))
        .map_err(|error| ForgeError::InvalidUrl(error.to_string()))?;

    api_url
        .set_port(parsed.port())
        .map_err(|()| ForgeError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}

fn parse_api_base(value: &str) -> Result<Url, ForgeError> {
    Url::parse(value).map_err(|error| ForgeError::InvalidUrl(error.to_string()))
}

/// Percent-encodes a single path segment.
pub(crate) fn encode_segment(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Fixed repository identity threaded into every facade call.
///
/// # Example
///
/// ```
/// use forge_facade::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/octo/repo")
///     .expect("should parse repository URL");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a repository locator from owner and repository name strings.
    ///
    /// Uses `api.github.com` as the API base.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::InvalidRepository` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, ForgeError> {
        Self::with_api_base(GITHUB_API_BASE, owner, repo)
    }

    /// Creates a repository locator against an explicit API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::InvalidUrl` when the base cannot be parsed and
    /// `ForgeError::InvalidRepository` when owner or repo is empty.
    pub fn with_api_base(api_base: &str, owner: &str, repo: &str) -> Result<Self, ForgeError> {
        let validated_owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;
        let parsed_base = parse_api_base(api_base)?;

        Ok(Self {
            api_base: parsed_base,
            owner: validated_owner,
            repository,
        })
    }

    /// Parses a GitHub repository URL in the form
    /// `https://github.com/<owner>/<repo>`.
    ///
    /// Trailing path segments (e.g. `/pulls`) are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::InvalidUrl` when parsing fails or
    /// `ForgeError::InvalidRepository` when the path does not start with
    /// `/owner/repo`.
    pub fn parse(input: &str) -> Result<Self, ForgeError> {
        let parsed = Url::parse(input).map_err(|error| ForgeError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or_else(|| ForgeError::InvalidUrl("URL cannot carry a path".to_owned()))?;

        let owner = RepositoryOwner::new(segments.next().unwrap_or_default())?;
        let repository_segment = segments.next().unwrap_or_default();
        let repository = RepositoryName::new(
            repository_segment
                .strip_suffix(".git")
                .unwrap_or(repository_segment),
        )?;
        let api_base = derive_api_base(&parsed)?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// API base URL for the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Route of the repository itself; every operation extends it.
    pub(crate) fn repository_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            encode_segment(self.owner.as_str()),
            encode_segment(self.repository.as_str())
        )
    }

    pub(crate) fn pull_request_comments_path(&self, number: u64) -> String {
        format!("{}/pulls/{number}/comments", self.repository_path())
    }

    pub(crate) fn pull_request_comment_path(&self, comment_id: u64) -> String {
        format!("{}/pulls/comments/{comment_id}", self.repository_path())
    }

    pub(crate) fn issue_comments_path(&self, number: u64) -> String {
        format!("{}/issues/{number}/comments", self.repository_path())
    }

    pub(crate) fn issue_comment_path(&self, comment_id: u64) -> String {
        format!("{}/issues/comments/{comment_id}", self.repository_path())
    }

    pub(crate) fn issue_labels_path(&self, number: u64) -> String {
        format!("{}/issues/{number}/labels", self.repository_path())
    }

    pub(crate) fn issue_label_path(&self, number: u64, label: &str) -> String {
        format!(
            "{}/{}",
            self.issue_labels_path(number),
            encode_segment(label)
        )
    }

    pub(crate) fn commits_path(&self) -> String {
        format!("{}/commits", self.repository_path())
    }

    pub(crate) fn commit_path(&self, sha: &str) -> String {
        format!("{}/{}", self.commits_path(), encode_segment(sha))
    }

    pub(crate) fn commit_comments_path(&self, sha: &str) -> String {
        format!("{}/comments", self.commit_path(sha))
    }
}
