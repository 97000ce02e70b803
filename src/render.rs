//! Page rendering.
//!
//! Renders the project list through `templates/index.html` with
//! [Tera](https://keats.github.io/tera/). The layout lives in a user-editable
//! template directory rather than in code, so restyling the page never needs
//! a rebuild.
//!
//! ## Template contract
//!
//! The context has a single key, `projects`: the list of [`Project`]s in
//! shuffled order. Each entry exposes `url`, `github` (raw API payload, any
//! key may be missing), `manifest` and `readme`.
//!
//! One custom filter is registered:
//!
//! ```text
//! {{ project.readme | markdownify }}
//! ```
//!
//! It converts Markdown to HTML and marks the result safe. All other
//! interpolations in `.html` templates remain autoescaped.
//!
//! ## Ordering
//!
//! The list is shuffled in place before rendering, using the random source
//! the caller passes in. Production uses the thread RNG, so the order changes
//! on every run; tests pass a seeded RNG to get reproducible pages.

use crate::types::Project;
use pulldown_cmark::{Options, Parser, html as md_html};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tera::{Context, Tera, Value};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Name of the page template inside the template directory.
pub const TEMPLATE_NAME: &str = "index.html";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template {} not found", .0.display())]
    MissingTemplate(PathBuf),
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("cannot read template directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Convert Markdown to HTML.
///
/// READMEs are written for GitHub, so tables, strikethrough and task lists
/// are enabled on top of CommonMark.
pub fn markdownify(input: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(input, options);
    let mut html = String::with_capacity(input.len() * 3 / 2);
    md_html::push_html(&mut html, parser);
    html
}

/// The `markdownify` template filter.
struct Markdownify;

impl tera::Filter for Markdownify {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        match value {
            Value::String(s) => Ok(Value::String(markdownify(s))),
            Value::Null => Ok(Value::String(String::new())),
            other => Err(tera::Error::msg(format!(
                "markdownify expects a string, got {other}"
            ))),
        }
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Renders the showcase page.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Load every template under `dir`. `dir/index.html` must exist.
    ///
    /// Templates are named by their `/`-separated path relative to `dir`.
    /// Dotfiles, dot-directories and `~` backups are skipped, so editor
    /// swap files never reach the parser.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let index = dir.join(TEMPLATE_NAME);
        if !index.is_file() {
            return Err(RenderError::MissingTemplate(index));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push((entry.into_path(), Some(name)));
        }

        let mut tera = Tera::default();
        tera.add_template_files(files)?;
        Ok(Self::with_tera(tera))
    }

    /// Build from an in-memory page template.
    pub fn from_source(source: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(Self::with_tera(tera))
    }

    fn with_tera(mut tera: Tera) -> Self {
        tera.register_filter("markdownify", Markdownify);
        Self { tera }
    }

    /// Shuffle `projects` in place with `rng`, then render the page.
    pub fn render<R: Rng + ?Sized>(
        &self,
        projects: &mut [Project],
        rng: &mut R,
    ) -> Result<String, RenderError> {
        projects.shuffle(rng);
        let mut context = Context::new();
        context.insert("projects", &*projects);
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.ends_with('~')
}
