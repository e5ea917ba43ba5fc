//! Tokenization of assembled prompts
//!
//! The benchmark sends token ids rather than text, so every sampled prompt is
//! encoded up front with the model's own tokenizer.

mod huggingface;

pub use huggingface::HuggingFaceTokenizer;

use crate::error::BenchResult;
use crate::types::{TokenId, TokenizedPrompt};

/// Text to token-id encoder
pub trait Tokenizer: Send + Sync {
    fn encode(&self, text: &str) -> BenchResult<Vec<TokenId>>;
}

/// Encode every prompt, failing on the first prompt that cannot be encoded
pub fn tokenize_prompts<T>(tokenizer: &T, prompts: Vec<String>) -> BenchResult<Vec<TokenizedPrompt>>
where
    T: Tokenizer + ?Sized,
{
    prompts
        .into_iter()
        .map(|text| {
            let tokens = tokenizer.encode(&text)?;
            TokenizedPrompt::new(tokens, text)
        })
        .collect()
}
