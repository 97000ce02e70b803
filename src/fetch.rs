//! Repository metadata fetching.
//!
//! Turns the configured identifiers into [`Project`] records by asking a
//! [`RepoHost`] for three things per repository:
//!
//! 1. The raw repository payload (`GET /repos/{owner}/{name}`), stored as-is.
//! 2. The manifest file from the default branch root, parsed as TOML.
//! 3. The README from the default branch root, stored as raw text.
//!
//! ## Failure policy
//!
//! Exactly one condition is recovered: a "not found" for the manifest or the
//! README. Either one missing leaves *both* at their empty defaults, so a
//! project never carries a manifest without a README or vice versa.
//!
//! Everything else aborts the run: transport errors, auth failures, rate
//! limits, a missing repository, a manifest that is not valid TOML. There is
//! no retry and no partial result, so a failed fetch never reaches the cache.
//!
//! ## Host seam
//!
//! [`GitHub`] is the production host, a blocking reqwest client against the
//! REST API. Tests substitute an in-memory host through the same trait.

use crate::config::FetchConfig;
use crate::types::{Project, repo_path};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use serde_json::{Map, Value};
use thiserror::Error;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// JSON metadata responses.
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
/// Contents responses as raw file bytes instead of base64-wrapped JSON.
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("invalid manifest {file} in {repo}: {source}")]
    Manifest {
        repo: String,
        file: String,
        source: toml::de::Error,
    },
}

/// A source-control host that can describe repositories and serve files
/// from their default branch.
pub trait RepoHost {
    /// Full raw metadata payload for `repo` (`owner/name`).
    fn repository(&self, repo: &str) -> Result<Map<String, Value>, FetchError>;

    /// Contents of `path` at the root of the default branch.
    ///
    /// `Ok(None)` means the file does not exist; any other failure is an
    /// error.
    fn file(&self, repo: &str, path: &str) -> Result<Option<String>, FetchError>;
}

impl<T: RepoHost + ?Sized> RepoHost for &T {
    fn repository(&self, repo: &str) -> Result<Map<String, Value>, FetchError> {
        (**self).repository(repo)
    }

    fn file(&self, repo: &str, path: &str) -> Result<Option<String>, FetchError> {
        (**self).file(repo, path)
    }
}

/// GitHub REST API host.
pub struct GitHub {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHub {
    /// Build a client for `settings.api_url`. With a token, every request is
    /// authenticated.
    pub fn new(settings: &FetchConfig, token: Option<String>) -> Result<Self, FetchError> {
        if token.is_some() {
            println!("Using authentication");
        }
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn get(&self, url: &str, media_type: &str) -> RequestBuilder {
        let request = self.client.get(url).header(ACCEPT, media_type);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl RepoHost for GitHub {
    fn repository(&self, repo: &str) -> Result<Map<String, Value>, FetchError> {
        let url = format!("{}/repos/{}", self.api_url, repo);
        let response = self.get(&url, JSON_MEDIA_TYPE).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status(),
            });
        }
        Ok(response.json()?)
    }

    fn file(&self, repo: &str, path: &str) -> Result<Option<String>, FetchError> {
        let url = format!("{}/repos/{}/contents/{}", self.api_url, repo, path);
        let response = self.get(&url, RAW_MEDIA_TYPE).send()?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.text()?)),
            status => Err(FetchError::Status { url, status }),
        }
    }
}

/// Fetch a [`Project`] for every identifier with the hosting prefix, in
/// input order. Other identifiers are skipped without a warning.
pub fn fetch_projects<H: RepoHost + ?Sized>(
    identifiers: &[String],
    host: &H,
    settings: &FetchConfig,
) -> Result<Vec<Project>, FetchError> {
    let mut projects = Vec::new();
    for identifier in identifiers {
        let Some(repo) = repo_path(identifier) else {
            continue;
        };
        let mut project = Project::new(identifier.as_str());
        project.github = host.repository(repo)?;
        if let Some((manifest, readme)) = fetch_documents(host, repo, settings)? {
            project.manifest = manifest;
            project.readme = readme;
        }
        projects.push(project);
    }
    Ok(projects)
}

/// Fetch the manifest and README as a pair. `None` if either is missing.
fn fetch_documents<H: RepoHost + ?Sized>(
    host: &H,
    repo: &str,
    settings: &FetchConfig,
) -> Result<Option<(Map<String, Value>, String)>, FetchError> {
    let Some(manifest_text) = host.file(repo, &settings.manifest)? else {
        return Ok(None);
    };
    let manifest: toml::Table =
        toml::from_str(&manifest_text).map_err(|source| FetchError::Manifest {
            repo: repo.to_string(),
            file: settings.manifest.clone(),
            source,
        })?;
    let manifest = manifest
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect();
    let Some(readme) = host.file(repo, &settings.readme)? else {
        return Ok(None);
    };
    Ok(Some((manifest, readme)))
}

/// Convert a TOML value to JSON. Datetimes become their TOML text form
/// (`2024-01-02`, `1979-05-27T07:32:00Z`); non-finite floats become null.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
