//! Wire and in-memory types for fim-bench
//!
//! This module defines the tokenized prompt handed to the client and the
//! request/response bodies of an OpenAI-compatible `/v1/completions` endpoint.

mod prompt;
mod request;
mod response;

pub use prompt::*;
pub use request::*;
pub use response::*;

/// Token id as produced by the tokenizer and sent on the wire
pub type TokenId = u32;
