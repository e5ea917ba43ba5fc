//! Response types for the completion endpoint

use serde::{Deserialize, Serialize};

use crate::error::{BenchResult, ProtocolFailure};

/// Completion response; only the fields the benchmark reads are modelled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
}

impl CompletionResponse {
    /// Parse a response body into the expected shape
    pub fn parse(body: &str) -> BenchResult<Self> {
        serde_json::from_str(body)
            .map_err(|e| ProtocolFailure::MalformedBody(e.to_string()).into())
    }

    /// Text of the first candidate completion
    pub fn into_first_text(self) -> BenchResult<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| ProtocolFailure::EmptyChoices.into())
    }
}
