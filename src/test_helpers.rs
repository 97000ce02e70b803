//! Shared test utilities for the project-showcase test suite.
//!
//! Provides an in-memory [`RepoHost`] that records every call, a local HTTP
//! server standing in for the REST API, payload builders, and a site
//! directory scaffold for pipeline tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let host = FakeHost::new()
//!     .with_repo("acme/widget", 42)
//!     .with_file("acme/widget", "README.md", "# Widget");
//!
//! let tmp = setup_site(&["https://github.com/acme/widget"]);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::{self, JoinHandle};

use reqwest::StatusCode;
use serde_json::{Map, Value, json};
use tempfile::TempDir;

use crate::fetch::{FetchError, RepoHost};
use crate::types::Project;

pub const SAMPLE_MANIFEST: &str = r#"
[project]
name = "widget"
version = "1.2.0"
description = "A widget"
"#;

/// Template exercising every field the page uses.
pub const SAMPLE_TEMPLATE: &str = r#"<ul>
{% for project in projects %}<li data-url="{{ project.url }}">{{ project.github.full_name }} ({{ project.github.stargazers_count }})
{% if project.readme %}<div class="readme">{{ project.readme | markdownify }}</div>{% endif %}</li>
{% endfor %}</ul>
"#;

// =========================================================================
// Fake host
// =========================================================================

/// In-memory host. Unknown repositories fail with HTTP 404, unknown files
/// come back as not found.
#[derive(Default)]
pub struct FakeHost {
    repos: HashMap<String, Map<String, Value>>,
    files: HashMap<(String, String), String>,
    calls: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, repo: &str, stars: u64) -> Self {
        self.repos.insert(repo.to_string(), repo_payload(repo, stars));
        self
    }

    pub fn with_file(mut self, repo: &str, path: &str, content: &str) -> Self {
        self.files
            .insert((repo.to_string(), path.to_string()), content.to_string());
        self
    }

    /// Every call in order, as `repo` or `repo:path`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Only the repository lookups, in order.
    pub fn repository_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.contains(':'))
            .collect()
    }
}

impl RepoHost for FakeHost {
    fn repository(&self, repo: &str) -> Result<Map<String, Value>, FetchError> {
        self.calls.borrow_mut().push(repo.to_string());
        self.repos
            .get(repo)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: format!("fake://repos/{repo}"),
                status: StatusCode::NOT_FOUND,
            })
    }

    fn file(&self, repo: &str, path: &str) -> Result<Option<String>, FetchError> {
        self.calls.borrow_mut().push(format!("{repo}:{path}"));
        Ok(self
            .files
            .get(&(repo.to_string(), path.to_string()))
            .cloned())
    }
}

// =========================================================================
// Local API server
// =========================================================================

/// A one-shot HTTP server on `127.0.0.1` answering from a fixed route table.
///
/// Serves exactly `expected` requests, one connection each, then stops.
/// Paths without a route get `404 {}`. [`MockApi::finish`] returns the
/// request heads in order, lowercased.
pub struct MockApi {
    pub url: String,
    handle: JoinHandle<Vec<String>>,
}

impl MockApi {
    pub fn serve(routes: &[(&str, u16, &str)], expected: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let routes: Vec<(String, u16, String)> = routes
            .iter()
            .map(|(path, status, body)| (path.to_string(), *status, body.to_string()))
            .collect();

        let handle = thread::spawn(move || {
            let mut requests = Vec::new();
            for stream in listener.incoming().take(expected) {
                let mut stream = stream.unwrap();
                let mut head = String::new();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                        break;
                    }
                    head.push_str(&line);
                }

                let path = head.split_whitespace().nth(1).unwrap_or("").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .map(|(_, status, body)| (*status, body.clone()))
                    .unwrap_or((404, "{}".to_string()));
                write!(
                    stream,
                    "HTTP/1.1 {status} MOCK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                )
                .unwrap();
                stream.flush().unwrap();
                requests.push(head.to_lowercase());
            }
            requests
        });

        Self { url, handle }
    }

    /// Wait for all expected requests and return their heads.
    pub fn finish(self) -> Vec<String> {
        self.handle.join().unwrap()
    }
}

// =========================================================================
// Payload builders
// =========================================================================

/// A trimmed-down repository payload with the fields templates tend to use.
pub fn repo_payload(repo: &str, stars: u64) -> Map<String, Value> {
    let name = repo.rsplit('/').next().unwrap_or(repo);
    match json!({
        "full_name": repo,
        "name": name,
        "html_url": format!("https://github.com/{repo}"),
        "description": format!("The {name} repository"),
        "stargazers_count": stars,
        "topics": ["rust"],
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// A fetched project with all fields populated.
pub fn full_project(repo: &str, stars: u64) -> Project {
    let mut project = Project::new(format!("https://github.com/{repo}"));
    project.github = repo_payload(repo, stars);
    project.manifest = toml::from_str(SAMPLE_MANIFEST).unwrap();
    project.readme = format!("# {repo}\n\nSome *emphasis*.");
    project
}

// =========================================================================
// Site scaffold
// =========================================================================

/// Temp directory with `projects.toml` and `templates/index.html`.
pub fn setup_site(projects: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_projects_toml(tmp.path(), projects);
    write_template(tmp.path(), SAMPLE_TEMPLATE);
    tmp
}

pub fn write_projects_toml(root: &Path, projects: &[&str]) {
    let list: Vec<String> = projects.iter().map(|p| format!("{p:?}")).collect();
    std::fs::write(
        root.join("projects.toml"),
        format!("projects = [{}]\n", list.join(", ")),
    )
    .unwrap();
}

pub fn write_template(root: &Path, source: &str) {
    let dir = root.join("templates");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), source).unwrap();
}
