//! Error types surfaced by the forge facade.

use http::StatusCode;
use thiserror::Error;

use super::rate_limit::RateLimitInfo;
use super::response::ResponseMeta;

/// Errors surfaced while configuring the facade or talking to GitHub.
///
/// Service failures keep the status code and message GitHub returned so that
/// callers observe exactly what the remote side reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForgeError {
    /// The provided URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The repository identity is incomplete.
    #[error("repository identity is invalid: {message}")]
    InvalidRepository {
        /// Which part of the identity was rejected.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// HTTP status returned with the rejection (401 or 403).
        status: u16,
        /// GitHub error message returned with the response.
        message: String,
        /// Documentation link GitHub attached to the error, if any.
        documentation_url: Option<String>,
        /// Metadata of the failing response.
        meta: ResponseMeta,
    },

    /// Rate limit exceeded - the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// HTTP status returned with the rejection (403 or 429).
        status: u16,
        /// Rate limit info if available from response headers.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitHub.
        message: String,
        /// Documentation link GitHub attached to the error, if any.
        documentation_url: Option<String>,
        /// Metadata of the failing response.
        meta: ResponseMeta,
    },

    /// GitHub answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message from the response body, or the canonical reason phrase.
        message: String,
        /// Documentation link GitHub attached to the error, if any.
        documentation_url: Option<String>,
        /// Metadata of the failing response.
        meta: ResponseMeta,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The response body did not match the expected schema.
    #[error("failed to decode GitHub response: {message}")]
    Decode {
        /// Deserialisation error detail.
        message: String,
    },
}

impl ForgeError {
    /// Builds the error GitHub would return for a missing resource.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Api {
            status: StatusCode::NOT_FOUND.as_u16(),
            message: message.into(),
            documentation_url: None,
            meta: ResponseMeta::with_status(StatusCode::NOT_FOUND.as_u16()),
        }
    }

    /// HTTP status code attached to the failure, when GitHub answered at all.
    ///
    /// Every service failure carries one; construction, transport and decode
    /// failures do not.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::RateLimitExceeded { status, .. }
            | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true when GitHub reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}
