//! token-telemetry: count LLM tokens in source files
//!
//! Scans files, directories and git repositories for `.go`, `.md`, `.rs` and
//! `.sol` sources and reports token counts per extension.

use std::process::ExitCode;

fn main() -> ExitCode {
    match token_telemetry::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
