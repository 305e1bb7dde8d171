//! Facade configuration loaded from CLI-style arguments, environment, and files.
//!
//! Values merge with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in defaults
//! 2. **Configuration file** – `.forge-facade.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `FORGE_TOKEN`, `FORGE_OWNER`, `FORGE_REPO`,
//!    `FORGE_REPOSITORY_URL`, `FORGE_API_BASE`, or legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`, `--owner`/`-o`,
//!    `--repo`/`-r`, `--repository-url`/`-u`, `--api-base`
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! owner = "octocat"
//! repo = "hello-world"
//! api_base = "https://ghe.example.com/api/v3"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::ForgeError;
use crate::github::locator::RepositoryLocator;

/// Facade configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use forge_facade::{OctocrabForge, load_config};
///
/// let config = load_config().expect("failed to load configuration");
/// let forge = OctocrabForge::from_config(&config).expect("forge should build");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "FORGE",
    discovery(
        dotfile_name = ".forge-facade.toml",
        config_file_name = "forge-facade.toml",
        app_name = "forge-facade"
    )
)]
pub struct ForgeConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `FORGE_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository owner (e.g., "octocat").
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hello-world").
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Repository web URL (e.g., `https://github.com/octocat/hello-world`).
    ///
    /// Takes precedence over `owner`/`repo` and derives the API base from
    /// the host.
    #[ortho_config(cli_short = 'u')]
    pub repository_url: Option<String>,

    /// API base URL used with `owner`/`repo`; defaults to the public API.
    pub api_base: Option<String>,
}

impl ForgeConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, ForgeError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(ForgeError::MissingToken)
    }

    /// Returns owner and repo if both are configured.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Configuration`] when owner or repo is missing.
    pub fn require_repository_info(&self) -> Result<(&str, &str), ForgeError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok((owner.as_str(), repo.as_str())),
            (None, _) => Err(ForgeError::Configuration {
                message: "repository owner is required (use --owner or -o)".to_owned(),
            }),
            (_, None) => Err(ForgeError::Configuration {
                message: "repository name is required (use --repo or -r)".to_owned(),
            }),
        }
    }

    /// Builds the repository identity the facade is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Configuration`] when neither a repository URL
    /// nor owner and repo are configured, and propagates locator parsing
    /// errors.
    pub fn repository_locator(&self) -> Result<RepositoryLocator, ForgeError> {
        if let Some(url) = self.repository_url.as_deref() {
            return RepositoryLocator::parse(url);
        }

        let (owner, repo) = self.require_repository_info()?;
        match self.api_base.as_deref() {
            Some(api_base) => RepositoryLocator::with_api_base(api_base, owner, repo),
            None => RepositoryLocator::from_owner_repo(owner, repo),
        }
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ForgeError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
pub fn load_config() -> Result<ForgeConfig, ForgeError> {
    ForgeConfig::load().map_err(|error| ForgeError::Configuration {
        message: error.to_string(),
    })
}
