//! Configuration loading
//!
//! Precedence is CLI > environment > config file > defaults. The file layer
//! lives here; the CLI applies its overrides on top.

pub mod loader;

pub use loader::load_config;

use crate::tokenize::DEFAULT_ENCODING;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_REPO_FILE: &str = "repos.txt";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tokenizer encoding name (`gpt2`, `cl100k_base`, `heuristic`, ...).
    pub encoding: String,
    /// Repository list read in batch mode.
    pub repo_file: PathBuf,
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            repo_file: PathBuf::from(DEFAULT_REPO_FILE),
            follow_symlinks: false,
        }
    }
}
