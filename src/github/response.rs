//! Response envelope returned by every facade operation.

use http::HeaderMap;

use super::error::ForgeError;
use super::pagination::PageLinks;
use super::rate_limit::RateLimitInfo;

/// Result type returned by [`crate::ForgeApi`] operations.
pub type ForgeResult<T> = Result<ForgeResponse<T>, ForgeError>;

/// Response metadata GitHub attached to a call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: u16,
    /// Rate limit snapshot from the response headers.
    pub rate_limit: Option<RateLimitInfo>,
    /// Neighbouring pages advertised by the `Link` header.
    pub pages: PageLinks,
}

impl ResponseMeta {
    /// Metadata carrying only a status code.
    #[must_use]
    pub const fn with_status(status: u16) -> Self {
        Self {
            status,
            rate_limit: None,
            pages: PageLinks::EMPTY,
        }
    }

    /// Collects the metadata from a status code and response headers.
    #[must_use]
    pub fn from_parts(status: u16, headers: &HeaderMap) -> Self {
        Self {
            status,
            rate_limit: RateLimitInfo::from_headers(headers),
            pages: PageLinks::from_headers(headers),
        }
    }
}

/// A decoded response body together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeResponse<T> {
    /// Decoded body.
    pub body: T,
    /// Status, rate limit and pagination details.
    pub meta: ResponseMeta,
}

impl<T> ForgeResponse<T> {
    /// Pairs a body with its metadata.
    #[must_use]
    pub const fn new(body: T, meta: ResponseMeta) -> Self {
        Self { body, meta }
    }

    /// Discards the metadata and returns the body.
    #[must_use]
    pub fn into_body(self) -> T {
        self.body
    }
}
