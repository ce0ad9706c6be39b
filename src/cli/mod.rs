//! Command-line interface for token-telemetry
//!
//! Exactly one mode flag is accepted per invocation: `--file`, `--directory`,
//! `--repo`, `--celestia-repos` or `--text`.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, Config};
use crate::repo::ScanOptions;
use crate::tokenize::{load_counter, TokenCounter};

mod batch;
mod directory;
mod file;
mod repo;
mod text;
mod utils;

/// Count tokens in text, files, directories, or repositories
#[derive(Parser)]
#[command(name = "token-telemetry")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["file", "directory", "repo", "celestia_repos", "text"])
))]
pub struct Cli {
    /// Path to file to tokenize
    #[arg(short = 'f', long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Path to directory to process
    #[arg(short = 'd', long, value_name = "PATH")]
    directory: Option<PathBuf>,

    /// Repository URL to clone and process
    #[arg(short = 'r', long, value_name = "URL")]
    repo: Option<String>,

    /// Process every repository listed in --repo-file
    #[arg(long)]
    celestia_repos: bool,

    /// Text string to tokenize
    #[arg(short = 't', long, value_name = "TEXT")]
    text: Option<String>,

    /// File containing repository URLs, one per line [default: repos.txt]
    #[arg(long, value_name = "PATH")]
    repo_file: Option<PathBuf>,

    /// Output JSON file path
    #[arg(short = 'o', long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Show detailed file-by-file results and debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Tokenizer encoding (gpt2, r50k_base, p50k_base, cl100k_base, o200k_base, heuristic)
    #[arg(long, value_name = "NAME", env = "TOKEN_TELEMETRY_ENCODING")]
    encoding: Option<String>,

    /// Config file (TOML or YAML); token-telemetry.toml is discovered otherwise
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Settings resolved from CLI flags over the config file.
pub(crate) struct Settings {
    pub output: Option<PathBuf>,
    pub verbose: bool,
    pub repo_file: PathBuf,
    pub scan: ScanOptions,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let config: Config = load_config(&cwd, cli.config.as_deref())?;
    let encoding = cli.encoding.clone().unwrap_or_else(|| config.encoding.clone());

    println!("Loading tokenizer...");
    let counter = load_counter(&encoding)?;
    tracing::debug!("Using tokenizer encoding {}", counter.name());

    let settings = Settings {
        output: cli.output.clone(),
        verbose: cli.verbose,
        repo_file: cli.repo_file.clone().unwrap_or(config.repo_file),
        scan: ScanOptions { follow_symlinks: config.follow_symlinks },
    };

    let result = dispatch(cli, counter.as_ref(), &settings);
    drop(counter);
    result
}

fn dispatch(cli: Cli, counter: &dyn TokenCounter, settings: &Settings) -> Result<ExitCode> {
    if let Some(path) = cli.file {
        file::run(&path, counter, settings)
    } else if let Some(path) = cli.directory {
        directory::run(&path, counter, settings)
    } else if let Some(url) = cli.repo {
        repo::run(&url, counter, settings)
    } else if cli.celestia_repos {
        batch::run(counter, settings)
    } else if let Some(text) = cli.text {
        text::run(&text, counter, settings)
    } else {
        anyhow::bail!("One of --file, --directory, --repo, --celestia-repos or --text is required")
    }
}

fn init_logging(verbose: bool) {
    let directives = filter_directives(verbose, std::env::var("RUST_LOG").ok().as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// A non-empty RUST_LOG replaces the default; otherwise `debug` with
/// `--verbose` and `warn` without.
fn filter_directives(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(env) => env.to_string(),
        None if verbose => "debug".to_string(),
        None => "warn".to_string(),
    }
}
