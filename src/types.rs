//! Shared types used across the pipeline.
//!
//! [`Project`] is what the fetcher produces, what the cache stores, and what
//! the template sees under `projects`. The JSON field names are therefore
//! part of both the cache format and the template contract.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifiers must start with this prefix to be fetched; everything else
/// in the config is skipped.
pub const GITHUB_PREFIX: &str = "https://github.com/";

/// One tracked repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// The configured identifier, e.g. `https://github.com/acme/widget`
    pub url: String,
    /// Raw repository payload from the API, passed through untouched
    #[serde(default)]
    pub github: Map<String, Value>,
    /// Parsed manifest file, empty when the repo has none
    #[serde(default, alias = "pyproject_toml")]
    pub manifest: Map<String, Value>,
    /// README text, empty when the repo has none
    #[serde(default)]
    pub readme: String,
}

impl Project {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            github: Map::new(),
            manifest: Map::new(),
            readme: String::new(),
        }
    }

    /// `owner/name` path of the repository, or `None` if the URL is not a
    /// hosted repository.
    pub fn repo_path(&self) -> Option<&str> {
        repo_path(&self.url)
    }

    /// Whether the manifest/README pair was found.
    pub fn has_documents(&self) -> bool {
        !self.manifest.is_empty() || !self.readme.is_empty()
    }
}

/// Strip the hosting prefix from an identifier.
///
/// ```text
/// https://github.com/acme/widget   → Some("acme/widget")
/// https://github.com/acme/widget/  → Some("acme/widget")
/// https://gitlab.com/acme/widget   → None
/// not-a-url                        → None
/// ```
pub fn repo_path(identifier: &str) -> Option<&str> {
    identifier
        .strip_prefix(GITHUB_PREFIX)
        .map(|path| path.trim_end_matches('/'))
}
