//! `--repo` mode

use anyhow::Result;
use std::process::ExitCode;

use super::utils::{print_counts, print_file_details, save_output};
use super::Settings;
use crate::repo::process_repository;
use crate::tokenize::TokenCounter;

pub fn run(url: &str, counter: &dyn TokenCounter, settings: &Settings) -> Result<ExitCode> {
    let report = process_repository(url, counter, settings.scan);
    if let Some(error) = report.error.as_deref().filter(|e| !e.is_empty()) {
        anyhow::bail!("Failed to process repository: {error}");
    }

    println!("\nRepository: {}", report.repository.name);
    println!("URL: {}", report.repository.url);
    print_counts(&report.report);

    if settings.verbose {
        print_file_details(&report.report.files);
    }
    if let Some(output) = &settings.output {
        save_output(output, &report)?;
    }
    Ok(ExitCode::SUCCESS)
}
