//! HuggingFace `tokenizer.json` adapter

use std::path::Path;

use tokenizers::tokenizer::Tokenizer as HfTokenizer;

use super::Tokenizer;
use crate::error::{BenchError, BenchResult};
use crate::types::TokenId;

/// HuggingFace tokenizer wrapper
pub struct HuggingFaceTokenizer {
    tokenizer: HfTokenizer,
}

impl HuggingFaceTokenizer {
    /// Create a tokenizer from a HuggingFace tokenizer JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> BenchResult<Self> {
        let path = path.as_ref();
        let tokenizer = HfTokenizer::from_file(path).map_err(|e| {
            BenchError::Tokenizer(format!(
                "failed to load tokenizer {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { tokenizer })
    }
}

impl Tokenizer for HuggingFaceTokenizer {
    fn encode(&self, text: &str) -> BenchResult<Vec<TokenId>> {
        // FIM sentinels are already in the text; no extra special tokens
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| BenchError::Tokenizer(format!("failed to encode prompt: {}", e)))?;
        Ok(encoding.get_ids().to_vec())
    }
}
