//! Error types shared by the counting, scanning and fetching layers.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TelemetryError>;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// `what` names the missing thing for the message ("File", "Directory", ...).
    #[error("{what} not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Raised while reading a file that exists but cannot be decoded or opened.
    /// The file counter absorbs this one and reports zero tokens.
    #[error("Could not read {}: {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clone {url}: {source}")]
    CloneFailure {
        url: String,
        #[source]
        source: git2::Error,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Pattern(#[from] globset::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TelemetryError {
    pub fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::NotFound { what, path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
