//! Project metadata cache.
//!
//! Fetching hits the API several times per repository, and anonymous access
//! is rate limited to 60 requests an hour. The first successful run therefore
//! snapshots the whole project list to `project_cache.json`, and every later
//! run renders from that snapshot without touching the network.
//!
//! # Contract
//!
//! [`ProjectCache`] is a single-blob store with one operation pair:
//!
//! - [`load`](ProjectCache::load): `None` if the file does not exist,
//!   otherwise its contents exactly as written.
//! - [`store`](ProjectCache::store): write the full list, replacing any
//!   existing file. Only called after a complete fetch.
//!
//! There is **no invalidation**: no TTL, no version field, no staleness check,
//! no partial refresh. Delete the file to force a refetch. Unlike a build
//! cache, a file that exists but cannot be parsed is an error rather than a
//! miss, so a damaged snapshot never triggers a silent refetch.
//!
//! Writes are plain overwrites, without temp-file renames or locking; two
//! concurrent runs in the same directory are not supported.

use crate::types::Project;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the cache file within the site root.
pub const CACHE_FILENAME: &str = "project_cache.json";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("corrupt cache {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The on-disk project snapshot.
#[derive(Debug, Clone)]
pub struct ProjectCache {
    path: PathBuf,
}

impl ProjectCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache at the standard location inside `root`.
    pub fn in_dir(root: &Path) -> Self {
        Self::new(root.join(CACHE_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot, or `None` if there is none.
    pub fn load(&self) -> Result<Option<Vec<Project>>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };
        let projects = serde_json::from_str(&content).map_err(|source| CacheError::Json {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(projects))
    }

    /// Write the snapshot, replacing any existing file.
    pub fn store(&self, projects: &[Project]) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(projects).map_err(|source| CacheError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
