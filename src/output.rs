//! CLI output formatting for the build report.
//!
//! # Information-First Display
//!
//! Each project is listed by its identity (positional index, `owner/name`,
//! star count) in rendered order, with the configured URL, description and
//! document status as indented context lines. The footer says where the data
//! came from and where the page went.
//!
//! ```text
//! Projects
//! 001 acme/widget (42 stars)
//!     Source: https://github.com/acme/widget
//!     Description: A widget
//!     Documents: manifest, README
//! 002 acme/bare (3 stars)
//!     Source: https://github.com/acme/bare
//!     Documents: none
//!
//! Data: fetched 2 projects, skipped 1 identifier
//! Page: index.html
//! ```
//!
//! # Architecture
//!
//! [`format_build_output`] returns `Vec<String>` and is pure, for
//! testability; [`print_build_output`] writes it to stdout.

use crate::pipeline::{BuildSummary, ProjectSource};
use crate::types::Project;

const MAX_DESCRIPTION: usize = 72;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional stars.
///
/// ```text
/// 001 acme/widget (42 stars)
/// 002 https://github.com/acme/new
/// ```
fn entity_header(index: usize, title: &str, stars: Option<u64>) -> String {
    match stars {
        Some(1) => format!("{} {} (1 star)", format_index(index), title),
        Some(n) => format!("{} {} ({} stars)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Display title: API `full_name`, then the repo path, then the raw URL.
fn project_title(project: &Project) -> &str {
    project
        .github
        .get("full_name")
        .and_then(|v| v.as_str())
        .or_else(|| project.repo_path())
        .unwrap_or(&project.url)
}

fn project_lines(index: usize, project: &Project) -> Vec<String> {
    let stars = project
        .github
        .get("stargazers_count")
        .and_then(|v| v.as_u64());
    let mut lines = vec![entity_header(index, project_title(project), stars)];
    lines.push(format!("{}Source: {}", indent(1), project.url));
    if let Some(desc) = project
        .github
        .get("description")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        lines.push(format!(
            "{}Description: {}",
            indent(1),
            truncate_desc(desc, MAX_DESCRIPTION)
        ));
    }
    let documents = if project.has_documents() {
        "manifest, README"
    } else {
        "none"
    };
    lines.push(format!("{}Documents: {}", indent(1), documents));
    lines
}

/// Format the report for a finished build.
pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec!["Projects".to_string()];
    for (i, project) in summary.projects.iter().enumerate() {
        lines.extend(project_lines(i + 1, project));
    }
    lines.push(String::new());

    let data = match summary.source {
        ProjectSource::Cache => format!("cache ({})", plural(summary.projects.len(), "project")),
        ProjectSource::Fetched { skipped: 0 } => {
            format!("fetched {}", plural(summary.projects.len(), "project"))
        }
        ProjectSource::Fetched { skipped } => format!(
            "fetched {}, skipped {}",
            plural(summary.projects.len(), "project"),
            plural(skipped, "identifier")
        ),
    };
    lines.push(format!("Data: {}", data));
    lines.push(format!("Page: {}", summary.output.display()));
    lines
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}
