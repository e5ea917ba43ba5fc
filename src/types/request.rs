//! Request types for the completion endpoint

use serde::{Deserialize, Serialize};

use super::{TokenId, TokenizedPrompt};

/// Tokens reserved for the completion on every request
pub const MAX_OUTPUT_TOKENS: usize = 100;

/// Stop sequences sent with every request; a line completion ends at the newline
pub const STOP_SEQUENCES: [&str; 1] = ["\n"];

/// Completion request (OpenAI `/v1/completions`-compatible, token-id prompt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: Vec<TokenId>,
    pub stream: bool,
    pub stop: Vec<String>,
    pub max_tokens: usize,
    pub n: u32,
    pub temperature: f64,
}

impl CompletionRequest {
    /// Build the deterministic single-sample request for a prompt
    pub fn new(model: impl Into<String>, prompt: &TokenizedPrompt, max_tokens: usize) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.tokens().to_vec(),
            stream: false,
            stop: STOP_SEQUENCES.iter().map(|s| s.to_string()).collect(),
            max_tokens,
            n: 1,
            temperature: 0.0,
        }
    }

    pub fn prompt_tokens(&self) -> usize {
        self.prompt.len()
    }
}
