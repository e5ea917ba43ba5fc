//! Corpus loading and sampling
//!
//! A corpus is a JSONL file of dataset rows. Loading assembles every row into a
//! FIM prompt; sampling shuffles the prompts deterministically and truncates
//! them to the configured sample limit.

mod sampler;

pub use sampler::*;

use std::path::Path;
use tracing::{debug, error};

use crate::error::{BenchError, BenchResult};
use crate::prompt::PromptAssembler;

/// Assemble prompts from JSONL content
///
/// Rows that fail to parse or assemble are logged and skipped; blank lines are
/// ignored. Prompts keep file order.
pub fn assemble_corpus(content: &str, assembler: &PromptAssembler) -> Vec<String> {
    let mut prompts = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match assembler.assemble_json(line) {
            Ok(prompt) => prompts.push(prompt),
            Err(e) => error!(line = index + 1, error = %e, "Failed to parse json line"),
        }
    }
    prompts
}

/// Read a JSONL corpus file and assemble its prompts
pub fn load_corpus<P: AsRef<Path>>(path: P, assembler: &PromptAssembler) -> BenchResult<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        BenchError::Io(format!("failed to read dataset {}: {}", path.display(), e))
    })?;
    let prompts = assemble_corpus(&content, assembler);
    debug!(path = %path.display(), prompts = prompts.len(), "Corpus loaded");
    Ok(prompts)
}
