//! Computes `SHOWCASE_VERSION` for `--version`.
//!
//! A checkout sitting exactly on a tag reports the package version. Any
//! other checkout reports `dev@<short hash>`, or `dev@unknown` outside git.

use std::process::Command;

fn git_stdout(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_owned())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");

    let version = match git_stdout(&["describe", "--exact-match", "--tags", "HEAD"]) {
        Some(_) => env!("CARGO_PKG_VERSION").to_owned(),
        None => {
            let hash = git_stdout(&["rev-parse", "--short", "HEAD"])
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| "unknown".to_owned());
            format!("dev@{hash}")
        }
    };
    println!("cargo:rustc-env=SHOWCASE_VERSION={version}");
}
