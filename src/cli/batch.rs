//! `--celestia-repos` batch mode

use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitCode;

use super::Settings;
use crate::batch::{load_repository_list, run_batch, write_json};
use crate::domain::MetaIndex;
use crate::repo::process_repository;
use crate::tokenize::TokenCounter;
use crate::utils::format_with_commas;

pub fn run(counter: &dyn TokenCounter, settings: &Settings) -> Result<ExitCode> {
    let Some(output) = settings.output.as_deref() else {
        anyhow::bail!("--output path is required when using --celestia-repos for the meta-index");
    };

    let urls = load_repository_list(&settings.repo_file)?;
    println!("Loaded {} repositories from {}", urls.len(), settings.repo_file.display());

    // Detail files go into repository_data/ next to the meta-index.
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let index = run_batch(&urls, output_dir, |url| process_repository(url, counter, settings.scan))?;

    write_json(output, &index)
        .with_context(|| format!("Error saving meta-index to {}", output.display()))?;
    println!("\nMeta-index saved to: {}", output.display());

    print_summary(&index, settings.verbose);

    if index.summary.successful_repositories_processed > 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Error: no repositories were processed successfully");
        Ok(ExitCode::FAILURE)
    }
}

fn print_summary(index: &MetaIndex, verbose: bool) {
    let summary = &index.summary;
    println!("\n{}", "=".repeat(60));
    println!("REPOSITORIES META-INDEX SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Repositories configured: {}", summary.total_repositories_configured);
    println!("Repositories successfully processed: {}", summary.successful_repositories_processed);
    println!(
        "Total files across all processed repos: {}",
        format_with_commas(summary.total_files_across_all_repos)
    );
    println!(
        "Total tokens across all processed repos: {}",
        format_with_commas(summary.total_tokens_across_all_repos)
    );
    for (ext, bucket) in summary.by_extension_across_all_repos.iter() {
        println!(
            "{} files: {} files, {} tokens",
            ext.label(),
            format_with_commas(bucket.files),
            format_with_commas(bucket.tokens)
        );
    }

    if verbose {
        println!("\nIndividual Repository Summaries (from meta-index):");
        for repo in &index.repositories {
            let status = match repo.error.as_deref() {
                Some(e) if !e.is_empty() => format!("ERROR ({e})"),
                _ => "OK".to_string(),
            };
            println!(
                "  - {}: {} tokens in {} files. Status: {}. Data: {}",
                repo.name,
                format_with_commas(repo.total_tokens),
                repo.total_files,
                status,
                repo.data_file
            );
        }
    }
}
