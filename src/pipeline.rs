//! The build pipeline: config → fetch → cache → render.
//!
//! ```text
//! project_cache.json exists?
//!   yes → load it                                   (no config read, no network)
//!   no  → projects.toml → fetch each repo → write project_cache.json
//! then  → shuffle → templates/index.html → index.html
//! ```
//!
//! The template directory is loaded before anything else, so a broken
//! template fails the run before any network traffic. A failed fetch leaves
//! neither a cache file nor a page behind.

use crate::cache::{CACHE_FILENAME, CacheError, ProjectCache};
use crate::config::{ConfigError, FetchConfig, load_config};
use crate::fetch::{FetchError, RepoHost, fetch_projects};
use crate::render::{PageRenderer, RenderError};
use crate::types::Project;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),
    #[error("cache: {0}")]
    Cache(#[from] CacheError),
    #[error("render: {0}")]
    Render(#[from] RenderError),
    #[error("IO error writing {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Fixed input and output locations of a site.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePaths {
    pub config: PathBuf,
    pub templates: PathBuf,
    pub cache: PathBuf,
    pub output: PathBuf,
}

impl SitePaths {
    /// Standard layout rooted at `root`.
    pub fn in_dir(root: &Path) -> Self {
        Self {
            config: root.join("projects.toml"),
            templates: root.join("templates"),
            cache: root.join(CACHE_FILENAME),
            output: root.join("index.html"),
        }
    }
}

impl Default for SitePaths {
    /// Relative to the working directory.
    fn default() -> Self {
        Self::in_dir(Path::new(""))
    }
}

/// Where the rendered projects came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSource {
    Cache,
    /// Fresh fetch; `skipped` identifiers lacked the hosting prefix.
    Fetched { skipped: usize },
}

/// What a build did.
#[derive(Debug)]
pub struct BuildSummary {
    pub source: ProjectSource,
    /// Projects in rendered (shuffled) order.
    pub projects: Vec<Project>,
    pub output: PathBuf,
}

/// Run the whole pipeline.
///
/// `connect` builds the host from the `[fetch]` settings; it is only called
/// when there is no cache. `rng` drives the shuffle.
pub fn build<H, F, R>(paths: &SitePaths, connect: F, rng: &mut R) -> Result<BuildSummary, BuildError>
where
    H: RepoHost,
    F: FnOnce(&FetchConfig) -> Result<H, FetchError>,
    R: Rng + ?Sized,
{
    let renderer = PageRenderer::from_dir(&paths.templates)?;
    let cache = ProjectCache::new(paths.cache.clone());

    let (mut projects, source) = match cache.load()? {
        Some(projects) => (projects, ProjectSource::Cache),
        None => {
            let config = load_config(&paths.config)?;
            let host = connect(&config.fetch)?;
            let projects = fetch_projects(&config.projects, &host, &config.fetch)?;
            cache.store(&projects)?;
            let skipped = config.projects.len() - projects.len();
            (projects, ProjectSource::Fetched { skipped })
        }
    };

    let page = renderer.render(&mut projects, rng)?;
    fs::write(&paths.output, page).map_err(|source| BuildError::Write {
        path: paths.output.clone(),
        source,
    })?;

    Ok(BuildSummary {
        source,
        projects,
        output: paths.output.clone(),
    })
}
