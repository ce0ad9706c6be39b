//! BPE token counting backed by tiktoken-rs.

use super::TokenCounter;
use tiktoken_rs::{cl100k_base, o200k_base, p50k_base, r50k_base, CoreBPE};

/// Encodings accepted by [`TiktokenCounter::new`]. `gpt2` is an alias of `r50k_base`.
pub const SUPPORTED_ENCODINGS: &[&str] =
    &["gpt2", "r50k_base", "p50k_base", "cl100k_base", "o200k_base"];

pub fn is_supported(encoding: &str) -> bool {
    SUPPORTED_ENCODINGS.contains(&encoding.to_lowercase().as_str())
}

pub struct TiktokenCounter {
    encoding_name: String,
    bpe: CoreBPE,
}

impl TiktokenCounter {
    pub fn new(encoding: &str) -> anyhow::Result<Self> {
        let name = encoding.to_lowercase();
        let bpe = match name.as_str() {
            "gpt2" | "r50k_base" => r50k_base()?,
            "p50k_base" => p50k_base()?,
            "cl100k_base" => cl100k_base()?,
            "o200k_base" => o200k_base()?,
            other => anyhow::bail!("Unknown encoding '{other}'"),
        };
        Ok(Self { encoding_name: name, bpe })
    }

    pub fn gpt2() -> anyhow::Result<Self> {
        Self::new("gpt2")
    }
}

impl TokenCounter for TiktokenCounter {
    fn name(&self) -> &str {
        &self.encoding_name
    }

    // Special markers such as <|endoftext|> count as a single token.
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}
