//! Report types shared by the walker, the repository processor and the batch
//! orchestrator.
//!
//! Every level keeps `total_files == Σ bucket.files` and
//! `total_tokens == Σ bucket.tokens`. [`DirectoryReport::record`] updates a
//! bucket and the totals together. [`ExtensionBuckets::merge`] only adds
//! buckets; [`BatchSummary::absorb`] pairs it with the matching totals update.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name of the subdirectory holding per-repository detail files in batch mode.
pub const REPOSITORY_DATA_DIR: &str = "repository_data";

/// Recognized source extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Extension {
    #[serde(rename = ".go")]
    Go,
    #[serde(rename = ".md")]
    Md,
    #[serde(rename = ".rs")]
    Rs,
    #[serde(rename = ".sol")]
    Sol,
}

impl Extension {
    pub const ALL: [Extension; 4] = [Extension::Go, Extension::Md, Extension::Rs, Extension::Sol];

    /// Dotted form used as JSON key and in console output.
    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Go => ".go",
            Extension::Md => ".md",
            Extension::Rs => ".rs",
            Extension::Sol => ".sol",
        }
    }

    /// Human label for console summaries.
    pub fn label(self) -> &'static str {
        match self {
            Extension::Go => "Go",
            Extension::Md => "Markdown",
            Extension::Rs => "Rust",
            Extension::Sol => "Solidity",
        }
    }

    /// Recursive glob matching files of this extension.
    pub fn glob(self) -> String {
        format!("**/*{}", self.as_str())
    }

    /// Parse a dotted, already lower-cased suffix such as `.go`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ext| ext.as_str() == suffix)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_suffix(&lowercase_suffix(path))
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased dotted suffix of `path`, or an empty string when there is none.
///
/// Dot-files such as `.go` have no suffix.
pub fn lowercase_suffix(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionBucket {
    pub files: usize,
    pub tokens: usize,
}

impl ExtensionBucket {
    fn add(&mut self, other: &ExtensionBucket) {
        self.files += other.files;
        self.tokens += other.tokens;
    }
}

/// One bucket per [`Extension`]; all four are always serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionBuckets {
    #[serde(rename = ".go", default)]
    pub go: ExtensionBucket,
    #[serde(rename = ".md", default)]
    pub md: ExtensionBucket,
    #[serde(rename = ".rs", default)]
    pub rs: ExtensionBucket,
    #[serde(rename = ".sol", default)]
    pub sol: ExtensionBucket,
}

impl ExtensionBuckets {
    pub fn get(&self, ext: Extension) -> &ExtensionBucket {
        match ext {
            Extension::Go => &self.go,
            Extension::Md => &self.md,
            Extension::Rs => &self.rs,
            Extension::Sol => &self.sol,
        }
    }

    fn get_mut(&mut self, ext: Extension) -> &mut ExtensionBucket {
        match ext {
            Extension::Go => &mut self.go,
            Extension::Md => &mut self.md,
            Extension::Rs => &mut self.rs,
            Extension::Sol => &mut self.sol,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Extension, &ExtensionBucket)> {
        Extension::ALL.into_iter().map(move |ext| (ext, self.get(ext)))
    }

    pub fn merge(&mut self, other: &ExtensionBuckets) {
        for ext in Extension::ALL {
            self.get_mut(ext).add(other.get(ext));
        }
    }

    pub fn total_files(&self) -> usize {
        self.iter().map(|(_, b)| b.files).sum()
    }

    pub fn total_tokens(&self) -> usize {
        self.iter().map(|(_, b)| b.tokens).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub extension: Extension,
    pub tokens: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryReport {
    pub directory: String,
    pub total_files: usize,
    pub total_tokens: usize,
    pub by_extension: ExtensionBuckets,
    pub files: Vec<FileRecord>,
}

impl DirectoryReport {
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            total_files: 0,
            total_tokens: 0,
            by_extension: ExtensionBuckets::default(),
            files: Vec::new(),
        }
    }

    /// Add one counted file to its bucket, the totals and the file list.
    pub fn record(&mut self, path: String, extension: Extension, tokens: usize) {
        self.total_files += 1;
        self.total_tokens += tokens;
        let bucket = self.by_extension.get_mut(extension);
        bucket.files += 1;
        bucket.tokens += tokens;
        self.files.push(FileRecord { path, extension, tokens });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub url: String,
}

/// Scan result for one repository.
///
/// Failures keep the same shape: zero counts, empty file list and `error` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReport {
    #[serde(flatten)]
    pub report: DirectoryReport,
    pub repository: RepositoryInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepositoryReport {
    pub fn success(mut report: DirectoryReport, name: String, url: String) -> Self {
        report.directory = name.clone();
        Self { report, repository: RepositoryInfo { name, url }, error: None }
    }

    pub fn failure(name: String, url: String, error: String) -> Self {
        Self {
            report: DirectoryReport::new(name.clone()),
            repository: RepositoryInfo { name, url },
            error: Some(error),
        }
    }

    /// `true` when an error is present and non-empty.
    pub fn is_failed(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Per-repository entry of the meta-index, pointing at its detail file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub url: String,
    pub data_file: String,
    pub total_files: usize,
    pub total_tokens: usize,
    pub by_extension: ExtensionBuckets,
    pub error: Option<String>,
}

impl RepositorySummary {
    pub fn from_report(report: &RepositoryReport, data_file: String) -> Self {
        Self {
            name: report.repository.name.clone(),
            url: report.repository.url.clone(),
            data_file,
            total_files: report.report.total_files,
            total_tokens: report.report.total_tokens,
            by_extension: report.report.by_extension.clone(),
            error: report.error.clone(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_repositories_configured: usize,
    pub successful_repositories_processed: usize,
    pub total_files_across_all_repos: usize,
    pub total_tokens_across_all_repos: usize,
    pub by_extension_across_all_repos: ExtensionBuckets,
}

impl BatchSummary {
    pub fn new(configured: usize) -> Self {
        Self { total_repositories_configured: configured, ..Self::default() }
    }

    /// Fold one repository into the aggregate. Failed repositories are ignored.
    pub fn absorb(&mut self, summary: &RepositorySummary) {
        if summary.is_failed() {
            return;
        }
        self.successful_repositories_processed += 1;
        self.total_files_across_all_repos += summary.total_files;
        self.total_tokens_across_all_repos += summary.total_tokens;
        self.by_extension_across_all_repos.merge(&summary.by_extension);
    }
}

/// Combined batch output written to the `--output` path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaIndex {
    pub summary: BatchSummary,
    pub repositories: Vec<RepositorySummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn record_keeps_totals_equal_to_bucket_sums() {
        let mut report = DirectoryReport::new("root");
        report.record("a.go".into(), Extension::Go, 10);
        report.record("b.md".into(), Extension::Md, 4);
        report.record("c/d.go".into(), Extension::Go, 1);

        assert_eq!(report.total_files, report.by_extension.total_files());
        assert_eq!(report.total_tokens, report.by_extension.total_tokens());
        assert_eq!(report.by_extension.go, ExtensionBucket { files: 2, tokens: 11 });
        assert_eq!(report.files.len(), 3);
    }

    #[test]
    fn extension_parsing_is_case_insensitive() {
        assert_eq!(Extension::from_path(&PathBuf::from("main.GO")), Some(Extension::Go));
        assert_eq!(Extension::from_path(&PathBuf::from("x/Token.Sol")), Some(Extension::Sol));
        assert_eq!(Extension::from_path(&PathBuf::from("notes.txt")), None);
        assert_eq!(Extension::from_path(&PathBuf::from(".go")), None);
        assert_eq!(lowercase_suffix(&PathBuf::from("README")), "");
    }

    #[test]
    fn buckets_serialize_with_dotted_keys_in_order() {
        let value = serde_json::to_string(&ExtensionBuckets::default()).expect("json");
        assert_eq!(
            value,
            r#"{".go":{"files":0,"tokens":0},".md":{"files":0,"tokens":0},".rs":{"files":0,"tokens":0},".sol":{"files":0,"tokens":0}}"#
        );
    }

    #[test]
    fn failed_report_has_uniform_shape() {
        let report = RepositoryReport::failure(
            "repo".into(),
            "https://example.com/org/repo.git".into(),
            "boom".into(),
        );
        let value = serde_json::to_value(&report).expect("json");

        assert_eq!(value["directory"], json!("repo"));
        assert_eq!(value["total_files"], json!(0));
        assert_eq!(value["total_tokens"], json!(0));
        assert_eq!(value["by_extension"][".go"]["files"], json!(0));
        assert_eq!(value["files"], json!([]));
        assert_eq!(value["repository"]["name"], json!("repo"));
        assert_eq!(value["error"], json!("boom"));
        assert!(report.is_failed());
    }

    #[test]
    fn successful_report_omits_error_key() {
        let mut dir = DirectoryReport::new("/tmp/clone/repo");
        dir.record("main.go".into(), Extension::Go, 3);
        let report = RepositoryReport::success(dir, "repo".into(), "u".into());
        let value = serde_json::to_value(&report).expect("json");

        assert!(value.get("error").is_none());
        assert_eq!(value["directory"], json!("repo"));
        assert_eq!(value["files"][0]["extension"], json!(".go"));
    }

    #[test]
    fn batch_summary_skips_failed_repositories() {
        let mut ok = DirectoryReport::new("a");
        ok.record("x.rs".into(), Extension::Rs, 7);
        let ok = RepositoryReport::success(ok, "a".into(), "ua".into());
        let failed = RepositoryReport::failure("b".into(), "ub".into(), "clone failed".into());

        let mut summary = BatchSummary::new(2);
        summary.absorb(&RepositorySummary::from_report(&ok, "repository_data/a.json".into()));
        summary.absorb(&RepositorySummary::from_report(&failed, "repository_data/b.json".into()));

        assert_eq!(summary.successful_repositories_processed, 1);
        assert_eq!(summary.total_files_across_all_repos, 1);
        assert_eq!(summary.total_tokens_across_all_repos, 7);
        assert_eq!(summary.by_extension_across_all_repos.rs.tokens, 7);
    }

    #[test]
    fn empty_error_string_counts_as_success() {
        let mut report = RepositoryReport::success(DirectoryReport::new("a"), "a".into(), "u".into());
        report.error = Some(String::new());
        assert!(!report.is_failed());
    }
}
