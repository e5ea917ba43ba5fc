//! Error types for fim-bench

use thiserror::Error;

/// Result type alias for benchmark operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Main error type for benchmark operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        param: Option<String>,
    },

    // Admission control
    #[error("Context overflow (modelSize: {context_size}, promptSize: {prompt_tokens}, maxTokens: {max_tokens})")]
    ContextOverflow {
        prompt_tokens: usize,
        max_tokens: usize,
        context_size: usize,
    },

    // Endpoint answered, but not with something usable
    #[error("Protocol error: {0}")]
    Protocol(ProtocolFailure),

    // Connection or I/O failure while talking to the endpoint
    #[error("Transport error: {0}")]
    Transport(String),

    // Input preparation
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Ways a completion endpoint can answer without producing a usable completion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolFailure {
    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("choices empty")]
    EmptyChoices,
}

impl BenchError {
    /// Whether a single request failing this way should be skipped rather than abort the run
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ContextOverflow { .. } | Self::Protocol(_))
    }

    pub fn error_type(&self) -> &str {
        match self {
            Self::Config(_) | Self::Validation { .. } => "configuration_error",
            Self::ContextOverflow { .. } => "context_overflow",
            Self::Protocol(_) => "protocol_error",
            Self::Transport(_) => "transport_error",
            Self::Dataset(_) => "dataset_error",
            Self::Tokenizer(_) => "tokenizer_error",
            Self::Io(_) => "io_error",
        }
    }

    pub(crate) fn validation(message: impl Into<String>, param: &str) -> Self {
        Self::Validation {
            message: message.into(),
            param: Some(param.to_string()),
        }
    }
}

impl From<ProtocolFailure> for BenchError {
    fn from(failure: ProtocolFailure) -> Self {
        Self::Protocol(failure)
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for BenchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<tokio::task::JoinError> for BenchError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Transport(format!("worker task failed: {}", err))
    }
}
