//! Batch processing of a repository list into a meta-index plus one detail
//! file per repository.

use crate::domain::{BatchSummary, MetaIndex, RepositoryReport, RepositorySummary, REPOSITORY_DATA_DIR};
use crate::error::{Result, TelemetryError};
use crate::utils::format_with_commas;
use std::fs;
use std::path::Path;

/// Read repository URLs from a newline-delimited file.
///
/// Lines are trimmed; blank lines and lines starting with `#` are ignored.
pub fn load_repository_list(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(TelemetryError::not_found("Repository file", path));
    }
    let content = fs::read_to_string(path).map_err(|e| TelemetryError::io(path, e))?;
    Ok(parse_repository_list(&content))
}

pub fn parse_repository_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Process `urls` in order and build the meta-index.
///
/// `process` turns one URL into a report (normally
/// [`crate::repo::process_repository`]). Every report is written to
/// `output_dir/repository_data/<name>.json`; only error-free reports are
/// folded into the aggregate.
pub fn run_batch<F>(urls: &[String], output_dir: &Path, mut process: F) -> Result<MetaIndex>
where
    F: FnMut(&str) -> RepositoryReport,
{
    let data_dir = output_dir.join(REPOSITORY_DATA_DIR);
    fs::create_dir_all(&data_dir).map_err(|e| TelemetryError::io(&data_dir, e))?;

    let mut summary = BatchSummary::new(urls.len());
    let mut repositories = Vec::with_capacity(urls.len());

    for url in urls {
        println!("\nProcessing {url}...");
        let mut report = process(url);

        let file_name = format!("{}.json", report.repository.name);
        let detail_path = data_dir.join(&file_name);
        match save_report(&detail_path, &report) {
            Ok(()) => println!("  Detailed data saved to: {}", detail_path.display()),
            Err(e) => {
                tracing::warn!("Error saving detailed data for {}: {}", report.repository.name, e);
                let note = format!("Failed to save individual JSON: {e}");
                report.error = Some(match report.error.take() {
                    Some(prev) if !prev.is_empty() => format!("{prev}; {note}"),
                    _ => note,
                });
            }
        }

        let entry =
            RepositorySummary::from_report(&report, format!("{REPOSITORY_DATA_DIR}/{file_name}"));
        summary.absorb(&entry);

        if entry.is_failed() {
            println!(
                "✗ {}: Processing encountered an error: {}",
                entry.name,
                entry.error.as_deref().unwrap_or_default()
            );
        } else {
            println!(
                "✓ {}: {} files, {} tokens",
                entry.name,
                entry.total_files,
                format_with_commas(entry.total_tokens)
            );
        }
        repositories.push(entry);
    }

    Ok(MetaIndex { summary, repositories })
}

/// Write `value` as pretty JSON (2-space indentation).
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TelemetryError::io(parent, e))?;
    }
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).map_err(|e| TelemetryError::io(path, e))
}

fn save_report(path: &Path, report: &RepositoryReport) -> Result<()> {
    write_json(path, report)
}
