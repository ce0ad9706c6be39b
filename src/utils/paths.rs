//! Path display helpers

use std::path::Path;

/// `path` relative to `root`, with `/` separators. Falls back to the full path.
pub fn relative_display(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_display_strips_root() {
        let root = Path::new("/work/repo");
        assert_eq!(relative_display(Path::new("/work/repo/cmd/main.go"), root), "cmd/main.go");
        assert_eq!(relative_display(Path::new("/elsewhere/a.md"), root), "/elsewhere/a.md");
    }

    #[test]
    fn backslashes_become_forward_slashes() {
        let root = Path::new("repo");
        assert_eq!(relative_display(Path::new(r"repo/docs\guide.md"), root), "docs/guide.md");
    }
}
