//! Octocrab client construction.

use http::Uri;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

use crate::github::error::ForgeError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// Octocrab's retry layer is disabled: every facade call sends exactly one
/// request, so a failed POST is never replayed.
///
/// # Errors
///
/// Returns `ForgeError::InvalidUrl` when the base URI cannot be parsed,
/// `ForgeError::Configuration` when Octocrab rejects the base URI, and
/// `ForgeError::Network` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, ForgeError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| ForgeError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .add_retry_config(RetryConfig::None)
        .base_uri(base_uri)
        .map_err(|error| ForgeError::Configuration {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
