//! Recursive scanner that feeds recognized files to the file counter.

use crate::count::count_file;
use crate::domain::{DirectoryReport, Extension};
use crate::error::{Result, TelemetryError};
use crate::tokenize::TokenCounter;
use crate::utils::paths::relative_display;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::PathBuf;

/// Files of one extension, sorted by relative path.
pub type ExtensionGroup = (Extension, Vec<(PathBuf, String)>);

/// Walks a directory tree and counts tokens in every `.go`, `.md`, `.rs` and
/// `.sol` file.
///
/// Hidden entries are visited and ignore files are not honoured; only the
/// `.git` metadata directory is pruned.
pub struct DirectoryScanner {
    root_path: PathBuf,
    follow_symlinks: bool,
}

impl DirectoryScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path, follow_symlinks: false }
    }

    /// Set whether to follow symbolic links to directories
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    fn check_root(&self) -> Result<()> {
        if !self.root_path.exists() {
            return Err(TelemetryError::not_found("Directory", &self.root_path));
        }
        if !self.root_path.is_dir() {
            return Err(TelemetryError::NotADirectory(self.root_path.clone()));
        }
        Ok(())
    }

    fn build_globset() -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for ext in Extension::ALL {
            builder.add(Glob::new(&ext.glob())?);
        }
        Ok(builder.build()?)
    }

    /// Enumerate matching files grouped by extension, in [`Extension::ALL`] order.
    pub fn discover(&self) -> Result<Vec<ExtensionGroup>> {
        self.check_root()?;
        let globset = Self::build_globset()?;

        let mut groups: Vec<ExtensionGroup> =
            Extension::ALL.into_iter().map(|ext| (ext, Vec::new())).collect();

        let mut builder = WalkBuilder::new(&self.root_path);
        builder
            .standard_filters(false)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != ".git");

        for entry_result in builder.build() {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let rel_path = relative_display(path, &self.root_path);
            if let Some(&index) = globset.matches(&rel_path).first() {
                if let Some((_, files)) = groups.get_mut(index) {
                    files.push((path.to_path_buf(), rel_path));
                }
            }
        }

        for (_, files) in &mut groups {
            files.sort_by(|a, b| a.1.cmp(&b.1));
        }
        Ok(groups)
    }

    /// Count every discovered file and build the report.
    ///
    /// Only files with a strictly positive count are recorded, so empty and
    /// unreadable files are left out of every total.
    pub fn scan(&self, counter: &dyn TokenCounter) -> Result<DirectoryReport> {
        let groups = self.discover()?;
        let mut report = DirectoryReport::new(self.root_path.display().to_string());

        for (_, files) in groups {
            for (path, rel_path) in files {
                let counted = count_file(&path, counter)?;
                let Some(extension) = counted.recognized() else {
                    continue;
                };
                if counted.tokens == 0 {
                    continue;
                }
                tracing::debug!("{}: {} tokens", rel_path, counted.tokens);
                report.record(rel_path, extension, counted.tokens);
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExtensionBucket;
    use crate::tokenize::{HeuristicCounter, TokenCounter};
    use std::fs;
    use tempfile::TempDir;

    /// One token per whitespace-separated word.
    struct WordCounter;

    impl TokenCounter for WordCounter {
        fn name(&self) -> &str {
            "words"
        }

        fn count(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }
    }

    fn assert_invariants(report: &DirectoryReport) {
        assert_eq!(report.total_files, report.by_extension.total_files());
        assert_eq!(report.total_tokens, report.by_extension.total_tokens());
        assert_eq!(report.total_files, report.files.len());
    }

    #[test]
    fn counts_go_and_markdown_files() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("a.go"), "package main").expect("write");
        fs::write(tmp.path().join("b.md"), "# Title").expect("write");

        let counter = WordCounter;
        let report = DirectoryScanner::new(tmp.path().to_path_buf()).scan(&counter).expect("scan");

        assert_eq!(report.total_files, 2);
        assert_eq!(report.by_extension.go, ExtensionBucket { files: 1, tokens: 2 });
        assert_eq!(report.by_extension.md, ExtensionBucket { files: 1, tokens: 2 });
        assert_eq!(
            report.total_tokens,
            counter.count("package main") + counter.count("# Title")
        );
        assert_invariants(&report);
    }

    #[test]
    fn skips_unrecognized_extensions() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("notes.txt"), "lots of perfectly readable words").expect("write");
        fs::write(tmp.path().join("lib.rs"), "pub fn answer() -> u32 { 42 }").expect("write");

        let report = DirectoryScanner::new(tmp.path().to_path_buf())
            .scan(&WordCounter)
            .expect("scan");

        assert_eq!(report.total_files, 1);
        assert!(report.files.iter().all(|f| !f.path.ends_with(".txt")));
        assert_invariants(&report);
    }

    #[test]
    fn undecodable_file_does_not_stop_siblings() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("a_bad.go"), [0xc3, 0x28, 0xff]).expect("write");
        fs::write(tmp.path().join("b_good.go"), "func main() {}").expect("write");

        let report = DirectoryScanner::new(tmp.path().to_path_buf())
            .scan(&WordCounter)
            .expect("scan");

        let paths: Vec<&str> = report.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["b_good.go"]);
        assert_invariants(&report);
    }

    #[test]
    fn empty_files_are_not_counted() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("empty.sol"), "").expect("write");
        fs::write(tmp.path().join("Token.sol"), "contract Token {}").expect("write");

        let report = DirectoryScanner::new(tmp.path().to_path_buf())
            .scan(&WordCounter)
            .expect("scan");

        assert_eq!(report.by_extension.sol.files, 1);
        assert_eq!(report.files[0].path, "Token.sol");
    }

    #[test]
    fn nested_paths_are_relative_and_grouped_by_extension() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::create_dir_all(root.join("docs/guide")).expect("mkdir");
        fs::create_dir_all(root.join("cmd")).expect("mkdir");
        fs::write(root.join("docs/guide/intro.md"), "intro text here").expect("write");
        fs::write(root.join("cmd/main.go"), "package main").expect("write");
        fs::write(root.join("README.md"), "read me").expect("write");
        fs::write(root.join("zeta.go"), "package zeta").expect("write");

        let report = DirectoryScanner::new(root.to_path_buf()).scan(&WordCounter).expect("scan");

        let paths: Vec<&str> = report.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["cmd/main.go", "zeta.go", "README.md", "docs/guide/intro.md"]);
        assert_invariants(&report);
    }

    #[test]
    fn hidden_directories_are_scanned_but_git_is_not() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::create_dir_all(root.join(".github")).expect("mkdir");
        fs::create_dir_all(root.join(".git/info")).expect("mkdir");
        fs::write(root.join(".github/CONTRIBUTING.md"), "be nice").expect("write");
        fs::write(root.join(".git/info/notes.md"), "internal").expect("write");

        let report = DirectoryScanner::new(root.to_path_buf()).scan(&WordCounter).expect("scan");

        let paths: Vec<&str> = report.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec![".github/CONTRIBUTING.md"]);
    }

    #[test]
    fn missing_root_is_not_found() {
        let tmp = TempDir::new().expect("tmp");
        let err = DirectoryScanner::new(tmp.path().join("nope"))
            .scan(&HeuristicCounter)
            .unwrap_err();
        assert!(matches!(err, TelemetryError::NotFound { .. }));
        assert!(err.to_string().starts_with("Directory not found"));
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("a.go");
        fs::write(&file, "package a").expect("write");

        let err = DirectoryScanner::new(file).scan(&HeuristicCounter).unwrap_err();
        assert!(matches!(err, TelemetryError::NotADirectory(_)));
    }

    #[test]
    fn report_directory_is_the_given_root() {
        let tmp = TempDir::new().expect("tmp");
        let report = crate::scan::scan_directory(tmp.path(), &HeuristicCounter).expect("scan");
        assert_eq!(report.directory, tmp.path().display().to_string());
        assert_eq!(report.total_files, 0);
    }
}
