//! # Project Showcase
//!
//! A static site generator for a page of your repositories. List GitHub URLs
//! in `projects.toml`, write a Tera template, and get a single `index.html`
//! with each project's stars, description, manifest and rendered README.
//!
//! # Architecture: Fetch Once, Render Every Time
//!
//! ```text
//! projects.toml ──fetch──▶ project_cache.json ──shuffle + render──▶ index.html
//!                  (API)         (JSON)              (Tera)
//! ```
//!
//! The API is hit only when `project_cache.json` is missing. After that the
//! cache is the data source, and every build just reshuffles and rerenders
//! it. Delete the cache to pick up new stars or README changes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `projects.toml` loading and `[fetch]` settings, `GITHUB_TOKEN` lookup |
//! | [`fetch`] | `RepoHost` trait, the GitHub REST client, and the per-project fetch loop |
//! | [`cache`] | `project_cache.json` snapshot store (load-if-exists, write-once) |
//! | [`render`] | Tera page rendering, shuffling, and the `markdownify` filter |
//! | [`pipeline`] | Wires the stages together into one build |
//! | [`types`] | The `Project` record shared by every stage |
//! | [`output`] | CLI output formatting of the build report |
//!
//! # Design Decisions
//!
//! ## Raw Payloads
//!
//! The repository payload is kept as an untyped JSON map rather than a
//! struct. Templates can use any field the API returns (`topics`,
//! `homepage`, `license.spdx_id`, ...) without a code change, at the cost of
//! guarding against missing keys with `default` in the template.
//!
//! ## One Recoverable Failure
//!
//! A repository without a manifest or README is normal and yields empty
//! fields. Every other failure stops the build before anything is written,
//! so the cache only ever holds a complete fetch.
//!
//! ## Injected Randomness
//!
//! Project order is shuffled on every build so no repository is always on
//! top. The render step takes the RNG as an argument: the binary passes the
//! thread RNG, tests pass a seeded one.

pub mod cache;
pub mod config;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
