//! Tokenized prompt type

use super::TokenId;
use crate::error::{BenchError, BenchResult};

/// A prompt after tokenization: the ids sent to the endpoint plus the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedPrompt {
    tokens: Vec<TokenId>,
    text: String,
}

impl TokenizedPrompt {
    /// Create a tokenized prompt, rejecting an empty token sequence
    pub fn new(tokens: Vec<TokenId>, text: impl Into<String>) -> BenchResult<Self> {
        if tokens.is_empty() {
            return Err(BenchError::Tokenizer(
                "tokenized prompt must contain at least one token".to_string(),
            ));
        }
        Ok(Self {
            tokens,
            text: text.into(),
        })
    }

    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
