//! Raw request helpers shared by the Octocrab facade.
//!
//! Requests go through Octocrab's raw `_get` / `_post` / `_delete` methods so
//! that status codes and headers stay visible and can be reported alongside
//! the decoded body.

use http::{HeaderMap, StatusCode, Uri};
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::github::error::ForgeError;
use crate::github::response::{ForgeResponse, ForgeResult, ResponseMeta};

use super::error_mapping::{is_network_error, map_octocrab_error, map_status_error};

/// Error envelope GitHub returns with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct GitHubErrorBody {
    pub(super) message: Option<String>,
    pub(super) documentation_url: Option<String>,
}

impl GitHubErrorBody {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

/// A successful response whose body has not been decoded yet.
pub(super) struct RawResponse {
    meta: ResponseMeta,
    body: String,
}

impl RawResponse {
    /// Decodes the JSON body into `T`.
    pub(super) fn decode<T: DeserializeOwned>(self, operation: &str) -> ForgeResult<T> {
        serde_json::from_str::<T>(&self.body)
            .map(|decoded| ForgeResponse::new(decoded, self.meta))
            .map_err(|error| ForgeError::Decode {
                message: format!("{operation} response: {error}"),
            })
    }

    /// Drops the body, keeping only the metadata.
    pub(super) fn empty(self) -> ForgeResponse<()> {
        ForgeResponse::new((), self.meta)
    }
}

/// Appends a query string to a route when one is present.
pub(super) fn with_query(route: String, query: &str) -> String {
    if query.is_empty() {
        route
    } else {
        format!("{route}?{query}")
    }
}

fn parse_route(route: &str) -> Result<Uri, ForgeError> {
    route
        .parse::<Uri>()
        .map_err(|error| ForgeError::InvalidUrl(format!("{route}: {error}")))
}

pub(super) async fn get(
    client: &Octocrab,
    operation: &str,
    route: &str,
) -> Result<RawResponse, ForgeError> {
    let uri = parse_route(route)?;
    debug!(operation, method = "GET", route, "forwarding forge request");
    let response = client
        ._get(uri)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;
    let (status, meta) = inspect(operation, response.status(), response.headers());
    let body = client
        .body_to_string(response)
        .await
        .map_err(|error| map_body_error(operation, &error))?;
    settle(operation, status, meta, body)
}

pub(super) async fn post<B>(
    client: &Octocrab,
    operation: &str,
    route: &str,
    payload: &B,
) -> Result<RawResponse, ForgeError>
where
    B: Serialize + Sync + ?Sized,
{
    let uri = parse_route(route)?;
    debug!(operation, method = "POST", route, "forwarding forge request");
    let response = client
        ._post(uri, Some(payload))
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;
    let (status, meta) = inspect(operation, response.status(), response.headers());
    let body = client
        .body_to_string(response)
        .await
        .map_err(|error| map_body_error(operation, &error))?;
    settle(operation, status, meta, body)
}

pub(super) async fn delete(
    client: &Octocrab,
    operation: &str,
    route: &str,
) -> Result<RawResponse, ForgeError> {
    let uri = parse_route(route)?;
    debug!(operation, method = "DELETE", route, "forwarding forge request");
    let response = client
        ._delete(uri, None::<&()>)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;
    let (status, meta) = inspect(operation, response.status(), response.headers());
    let body = client
        .body_to_string(response)
        .await
        .map_err(|error| map_body_error(operation, &error))?;
    settle(operation, status, meta, body)
}

/// Classifies a failure to read the response body.
///
/// A connection dropped mid-body is a network failure; a body that is not
/// valid UTF-8 is a decode failure.
fn map_body_error(operation: &str, error: &octocrab::Error) -> ForgeError {
    if is_network_error(error) {
        return map_octocrab_error(operation, error);
    }
    ForgeError::Decode {
        message: format!("{operation} response: {error}"),
    }
}

fn inspect(operation: &str, status: StatusCode, headers: &HeaderMap) -> (StatusCode, ResponseMeta) {
    let meta = ResponseMeta::from_parts(status.as_u16(), headers);
    debug!(operation, status = status.as_u16(), "forge responded");

    if let Some(rate_limit) = meta.rate_limit
        && rate_limit.is_exhausted()
    {
        warn!(
            operation,
            reset_at = rate_limit.reset_at(),
            "GitHub rate limit exhausted"
        );
    }

    (status, meta)
}

fn settle(
    operation: &str,
    status: StatusCode,
    meta: ResponseMeta,
    body: String,
) -> Result<RawResponse, ForgeError> {
    if status.is_success() {
        return Ok(RawResponse { meta, body });
    }

    let error = map_status_error(status, &GitHubErrorBody::parse(&body), meta);
    if matches!(error, ForgeError::RateLimitExceeded { .. }) {
        warn!(operation, status = status.as_u16(), "GitHub rejected the request: rate limited");
    }
    Err(error)
}
