//! Project list configuration.
//!
//! The site is driven by a single `projects.toml` in the working directory:
//!
//! ```toml
//! projects = [
//!     "https://github.com/acme/widget",
//!     "https://github.com/acme/gadget",
//! ]
//!
//! # Optional - defaults shown below
//! [fetch]
//! api_url = "https://api.github.com"  # GitHub Enterprise: https://host/api/v3
//! manifest = "pyproject.toml"         # Manifest file read from the repo root
//! readme = "README.md"                # README file read from the repo root
//! ```
//!
//! The `projects` list is returned exactly as written: no deduplication and
//! no checking of the identifiers themselves. Entries that are not GitHub
//! URLs are dropped later, by the fetcher. Other top-level keys are ignored,
//! but unknown keys inside `[fetch]` are rejected to catch typos.
//!
//! The access token is never read from the file. It comes from the
//! `GITHUB_TOKEN` environment variable, see [`github_token`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the optional API token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Contents of `projects.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// Repository identifiers, in configured order.
    pub projects: Vec<String>,
    /// Where and what to fetch.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// API endpoint and the repository files to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Base URL of the REST API, without trailing slash.
    pub api_url: String,
    /// Manifest file name, parsed as TOML.
    pub manifest: String,
    /// README file name, kept as raw text.
    pub readme: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            manifest: "pyproject.toml".to_string(),
            readme: "README.md".to_string(),
        }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "fetch.api_url must be an http(s) URL, got {:?}",
                self.api_url
            )));
        }
        if self.manifest.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fetch.manifest must not be empty".into(),
            ));
        }
        if self.readme.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fetch.readme must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Parse config text. Split from [`load_config`] so tests need no files.
pub fn parse_config(content: &str) -> Result<ProjectsConfig, ConfigError> {
    let config: ProjectsConfig = toml::from_str(content)?;
    config.fetch.validate()?;
    Ok(config)
}

/// Load and validate `projects.toml`.
///
/// Unlike optional site settings, the project list is required: a missing
/// file is an error.
pub fn load_config(path: &Path) -> Result<ProjectsConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// The API token from the environment. Unset and empty both mean anonymous.
pub fn github_token() -> Option<String> {
    token_from(std::env::var(TOKEN_VAR).ok())
}

fn token_from(value: Option<String>) -> Option<String> {
    value.filter(|t| !t.trim().is_empty())
}
