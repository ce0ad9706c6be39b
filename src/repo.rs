//! Clone-and-scan for a single repository.

use crate::domain::{DirectoryReport, RepositoryReport};
use crate::error::{Result, TelemetryError};
use crate::fetch::{clone_repository, repository_name};
use crate::scan::DirectoryScanner;
use crate::tokenize::TokenCounter;
use std::path::Path;

/// Settings applied to every repository scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub follow_symlinks: bool,
}

/// Clone `url` into a temporary directory, scan it and attach repository
/// metadata.
///
/// Never fails: clone or scan errors are logged and returned as a report with
/// zero counts and `error` set. The temporary directory is removed before
/// returning in both cases.
pub fn process_repository(
    url: &str,
    counter: &dyn TokenCounter,
    options: ScanOptions,
) -> RepositoryReport {
    process_repository_in(url, counter, options, &std::env::temp_dir())
}

fn process_repository_in(
    url: &str,
    counter: &dyn TokenCounter,
    options: ScanOptions,
    scratch_root: &Path,
) -> RepositoryReport {
    let name = repository_name(url);

    match clone_and_scan(url, counter, options, scratch_root) {
        Ok(report) => RepositoryReport::success(report, name, url.to_string()),
        Err(e) => {
            tracing::warn!("Failed to process {}: {}", name, e);
            RepositoryReport::failure(name, url.to_string(), e.to_string())
        }
    }
}

fn clone_and_scan(
    url: &str,
    counter: &dyn TokenCounter,
    options: ScanOptions,
    scratch_root: &Path,
) -> Result<DirectoryReport> {
    let scratch = tempfile::Builder::new()
        .prefix("token-telemetry-")
        .tempdir_in(scratch_root)
        .map_err(|e| TelemetryError::io(scratch_root, e))?;

    println!("Cloning {url}...");
    let repo_path = clone_repository(url, scratch.path())?;
    scan_clone(&repo_path, counter, options)
}

fn scan_clone(
    repo_path: &Path,
    counter: &dyn TokenCounter,
    options: ScanOptions,
) -> Result<DirectoryReport> {
    DirectoryScanner::new(repo_path.to_path_buf())
        .follow_symlinks(options.follow_symlinks)
        .scan(counter)
}
