//! Token counting for a single file.

use crate::domain::{lowercase_suffix, Extension};
use crate::error::{Result, TelemetryError};
use crate::tokenize::TokenCounter;
use std::io::ErrorKind;
use std::path::Path;

/// Outcome of counting one file. `extension` is the lower-cased suffix even
/// when it is not one of the recognized ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCount {
    pub extension: String,
    pub tokens: usize,
}

impl FileCount {
    fn skipped(extension: String) -> Self {
        Self { extension, tokens: 0 }
    }

    pub fn recognized(&self) -> Option<Extension> {
        Extension::from_suffix(&self.extension)
    }
}

/// Count tokens in `path`.
///
/// A missing file is an error. Unrecognized extensions count as zero, as do
/// files that are not valid UTF-8 or cannot be opened for permission reasons
/// (those log a warning).
pub fn count_file(path: &Path, counter: &dyn TokenCounter) -> Result<FileCount> {
    if !path.exists() {
        return Err(TelemetryError::not_found("File", path));
    }

    let extension = lowercase_suffix(path);
    if Extension::from_suffix(&extension).is_none() {
        return Ok(FileCount::skipped(extension));
    }

    let content = match read_text(path) {
        Ok(content) => content,
        Err(err @ TelemetryError::UnreadableFile { .. }) => {
            tracing::warn!("{}. Skipping.", err);
            return Ok(FileCount::skipped(extension));
        }
        Err(err) => return Err(err),
    };

    let tokens = counter.count(&content);
    Ok(FileCount { extension, tokens })
}

/// Read `path` as strict UTF-8 with normalized line endings.
fn read_text(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(normalize_newlines(content)),
        Err(source)
            if matches!(source.kind(), ErrorKind::InvalidData | ErrorKind::PermissionDenied) =>
        {
            Err(TelemetryError::UnreadableFile { path: path.to_path_buf(), source })
        }
        Err(source) => Err(TelemetryError::io(path, source)),
    }
}

/// Convert `\r\n` and lone `\r` to `\n`.
pub fn normalize_newlines(content: String) -> String {
    if !content.contains('\r') {
        return content;
    }
    content.replace("\r\n", "\n").replace('\r', "\n")
}
