//! Shallow git cloning.

use crate::error::{Result, TelemetryError};
use git2::FetchOptions;
use std::path::{Path, PathBuf};

/// Fallback name when a URL has no usable trailing segment.
pub const UNKNOWN_REPO: &str = "unknown_repo";

/// Derive a local name from a repository URL.
///
/// Examples:
/// - `https://github.com/celestiaorg/celestia-app.git` → `celestia-app`
/// - `https://github.com/owner/repo/`                  → `repo`
/// - `git@github.com:owner/repo.git`                   → `repo`
pub fn repository_name(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next().unwrap_or("");
    let name = segment.strip_suffix(".git").unwrap_or(segment);
    if name.is_empty() {
        UNKNOWN_REPO.to_string()
    } else {
        name.to_string()
    }
}

/// `true` for `file://` URLs and paths that exist on disk.
///
/// libgit2's local transport rejects shallow fetches, so these are cloned in full.
pub fn is_local_url(url: &str) -> bool {
    url.starts_with("file://") || Path::new(url).exists()
}

/// Clone `url` into `scratch/<name>` and return that path. Remote URLs are
/// shallow (depth=1); local repositories are cloned in full.
///
/// The caller owns `scratch` and removes it, partial clone included.
pub fn clone_repository(url: &str, scratch: &Path) -> Result<PathBuf> {
    let dest = scratch.join(repository_name(url));

    let mut fo = FetchOptions::new();
    if !is_local_url(url) {
        fo.depth(1);
    }

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fo);

    builder
        .clone(url, &dest)
        .map_err(|source| TelemetryError::CloneFailure { url: url.to_string(), source })?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn name_strips_git_suffix() {
        assert_eq!(repository_name("https://github.com/celestiaorg/celestia-app.git"), "celestia-app");
        assert_eq!(repository_name("https://github.com/celestiaorg/go-square"), "go-square");
    }

    #[test]
    fn name_ignores_trailing_slash_and_scp_syntax() {
        assert_eq!(repository_name("https://github.com/owner/repo/"), "repo");
        assert_eq!(repository_name("git@github.com:owner/repo.git"), "repo");
        assert_eq!(repository_name("git@host:repo.git"), "repo");
    }

    #[test]
    fn name_falls_back_when_empty() {
        assert_eq!(repository_name(""), UNKNOWN_REPO);
        assert_eq!(repository_name("https://example.com/.git"), UNKNOWN_REPO);
    }

    #[test]
    fn local_urls_are_detected() {
        let scratch = TempDir::new().expect("tmp");
        assert!(is_local_url(&scratch.path().to_string_lossy()));
        assert!(is_local_url("file:///srv/git/repo.git"));
        assert!(!is_local_url("https://github.com/celestiaorg/celestia-app.git"));
        assert!(!is_local_url("git@github.com:owner/repo.git"));
    }

    #[test]
    fn clone_failure_is_reported() {
        let scratch = TempDir::new().expect("tmp");
        let missing = scratch.path().join("does-not-exist.git");
        let url = missing.to_string_lossy().to_string();

        let err = clone_repository(&url, scratch.path()).unwrap_err();
        assert!(matches!(err, TelemetryError::CloneFailure { .. }));
        assert!(err.to_string().contains("Failed to clone"));
    }
}
