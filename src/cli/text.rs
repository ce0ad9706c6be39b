//! `--text` mode

use anyhow::Result;
use serde_json::json;
use std::process::ExitCode;

use super::utils::save_output;
use super::Settings;
use crate::tokenize::TokenCounter;

const PREVIEW_CHARS: usize = 50;

pub fn run(text: &str, counter: &dyn TokenCounter, settings: &Settings) -> Result<ExitCode> {
    let tokens = counter.count(text);

    println!("Text: {}", preview(text));
    println!("Token count: {tokens}");

    if let Some(output) = &settings.output {
        save_output(output, &json!({ "tokens": tokens }))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// First 50 characters, with `...` appended when the text is longer.
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
