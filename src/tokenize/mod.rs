//! Text tokenization.
//!
//! A [`TokenCounter`] is built once by the command layer and handed by reference
//! to every counting operation.

use crate::error::{Result, TelemetryError};

pub mod tiktoken;

pub use tiktoken::TiktokenCounter;

/// Encoding used when nothing else is configured.
pub const DEFAULT_ENCODING: &str = "gpt2";

/// Name that selects the character heuristic directly.
pub const HEURISTIC_ENCODING: &str = "heuristic";

/// Turns text into a subword token count.
pub trait TokenCounter {
    /// Encoding name, for logs and console output.
    fn name(&self) -> &str;

    fn count(&self, text: &str) -> usize;
}

/// Fallback counter: Unicode code points divided by four, so multi-byte text
/// is not over-counted.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicCounter;

impl TokenCounter for HeuristicCounter {
    fn name(&self) -> &str {
        HEURISTIC_ENCODING
    }

    fn count(&self, text: &str) -> usize {
        text.chars().count() / 4
    }
}

/// Load the counter for `encoding`.
///
/// Unknown encodings are fatal. A known BPE that fails to load degrades to
/// [`HeuristicCounter`] with a warning.
pub fn load_counter(encoding: &str) -> Result<Box<dyn TokenCounter>> {
    if encoding.eq_ignore_ascii_case(HEURISTIC_ENCODING) {
        return Ok(Box::new(HeuristicCounter));
    }
    if !tiktoken::is_supported(encoding) {
        return Err(TelemetryError::MissingDependency(format!(
            "unknown tokenizer encoding '{encoding}' (supported: {}, {HEURISTIC_ENCODING})",
            tiktoken::SUPPORTED_ENCODINGS.join(", ")
        )));
    }
    match TiktokenCounter::new(encoding) {
        Ok(counter) => Ok(Box::new(counter)),
        Err(e) => {
            tracing::warn!("Tokenizer '{}' unavailable ({}); falling back to heuristic counts", encoding, e);
            Ok(Box::new(HeuristicCounter))
        }
    }
}
