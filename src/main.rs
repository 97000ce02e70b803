use clap::Parser;
use project_showcase::config;
use project_showcase::fetch::GitHub;
use project_showcase::output;
use project_showcase::pipeline::{self, SitePaths};

#[derive(Parser)]
#[command(name = "project-showcase")]
#[command(about = "Static site generator for a GitHub project showcase")]
#[command(long_about = "\
Static site generator for a GitHub project showcase

Run it in the site directory. It takes no arguments:

  site/
  ├── projects.toml        # projects = [\"https://github.com/owner/repo\", ...]
  ├── templates/
  │   └── index.html       # Tera template: `projects`, `| markdownify`
  ├── project_cache.json   # Written on first run; delete to refetch
  └── index.html           # Output, rewritten on every run

Set GITHUB_TOKEN for authenticated API access (higher rate limits).")]
#[command(version = env!("SHOWCASE_VERSION"))]
struct Cli {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _cli = Cli::parse();

    let paths = SitePaths::default();
    let summary = pipeline::build(
        &paths,
        |settings| GitHub::new(settings, config::github_token()),
        &mut rand::thread_rng(),
    )?;
    output::print_build_output(&summary);

    Ok(())
}
