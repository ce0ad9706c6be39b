//! `--file` mode

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::utils::save_output;
use super::Settings;
use crate::count::count_file;
use crate::tokenize::TokenCounter;

#[derive(Serialize)]
struct FileOutput<'a> {
    path: String,
    extension: &'a str,
    tokens: usize,
}

pub fn run(path: &Path, counter: &dyn TokenCounter, settings: &Settings) -> Result<ExitCode> {
    let counted = count_file(path, counter)?;

    println!("File: {}", path.display());
    println!("Extension: {}", counted.extension);
    println!("Token count: {}", counted.tokens);

    if let Some(output) = &settings.output {
        let body = FileOutput {
            path: path.display().to_string(),
            extension: &counted.extension,
            tokens: counted.tokens,
        };
        save_output(output, &body)?;
    }
    Ok(ExitCode::SUCCESS)
}
