//! Error classification for responses and Octocrab failures.

use http::StatusCode;

use crate::github::error::ForgeError;
use crate::github::response::ResponseMeta;

use super::transport::GitHubErrorBody;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether a failure is a rate limit rejection based on the HTTP
/// status and the message / documentation URL content, or an exhausted
/// rate limit header.
pub(super) fn is_rate_limit_error(
    status: StatusCode,
    message: &str,
    documentation_url: Option<&str>,
    meta: &ResponseMeta,
) -> bool {
    let is_rate_limit_status = matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = message.to_lowercase().contains("rate limit")
        || documentation_url.is_some_and(|url| url.contains("rate-limit"))
        || meta.rate_limit.is_some_and(|info| info.is_exhausted());

    is_rate_limit_status && message_indicates_rate_limit
}

/// Classifies a non-success response.
///
/// The service message is kept verbatim; when the body carries none, the
/// canonical reason phrase is used instead.
pub(super) fn map_status_error(
    status: StatusCode,
    body: &GitHubErrorBody,
    meta: ResponseMeta,
) -> ForgeError {
    let message = body.message.clone().unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned()
    });
    let documentation_url = body.documentation_url.clone();

    if is_rate_limit_error(status, &message, documentation_url.as_deref(), &meta) {
        return ForgeError::RateLimitExceeded {
            status: status.as_u16(),
            rate_limit: meta.rate_limit,
            message,
            documentation_url,
            meta,
        };
    }

    if is_auth_failure(status) {
        return ForgeError::Authentication {
            status: status.as_u16(),
            message,
            documentation_url,
            meta,
        };
    }

    ForgeError::Api {
        status: status.as_u16(),
        message,
        documentation_url,
        meta,
    }
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ForgeError {
    if let octocrab::Error::GitHub { source, .. } = error {
        let body = GitHubErrorBody {
            message: Some(source.message.clone()),
            documentation_url: source.documentation_url.clone(),
        };
        return map_status_error(
            source.status_code,
            &body,
            ResponseMeta::with_status(source.status_code.as_u16()),
        );
    }

    if is_network_error(error) {
        return ForgeError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    ForgeError::Network {
        message: format!("{operation} could not be sent: {error}"),
    }
}
