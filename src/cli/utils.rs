//! Shared console helpers.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::batch::write_json;
use crate::domain::{DirectoryReport, FileRecord};
use crate::utils::format_with_commas;

/// Print totals and one line per extension bucket.
pub fn print_counts(report: &DirectoryReport) {
    println!("Total files: {}", report.total_files);
    println!("Total tokens: {}", format_with_commas(report.total_tokens));
    for (ext, bucket) in report.by_extension.iter() {
        println!(
            "{} files: {} files, {} tokens",
            ext.label(),
            bucket.files,
            format_with_commas(bucket.tokens)
        );
    }
}

pub fn print_file_details(files: &[FileRecord]) {
    println!("\nFile details:");
    for file in files {
        println!("  {}: {} tokens", file.path, file.tokens);
    }
}

/// Write `value` to `path` as pretty JSON and report where it went.
pub fn save_output<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_json(path, value).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("\nDetailed results saved to: {}", path.display());
    Ok(())
}
