//! `--directory` mode

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;

use super::utils::{print_counts, print_file_details, save_output};
use super::Settings;
use crate::scan::DirectoryScanner;
use crate::tokenize::TokenCounter;

pub fn run(path: &Path, counter: &dyn TokenCounter, settings: &Settings) -> Result<ExitCode> {
    let report = DirectoryScanner::new(path.to_path_buf())
        .follow_symlinks(settings.scan.follow_symlinks)
        .scan(counter)?;

    println!("\nDirectory: {}", report.directory);
    print_counts(&report);

    if settings.verbose {
        print_file_details(&report.files);
    }
    if let Some(output) = &settings.output {
        save_output(output, &report)?;
    }
    Ok(ExitCode::SUCCESS)
}
