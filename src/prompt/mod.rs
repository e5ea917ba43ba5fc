//! Fill-in-middle prompt assembly
//!
//! Turns a RepoEval-style dataset row into a Qwen2.5-Coder FIM prompt: the
//! source text is wrapped in prefix/middle markers and the suffix marker is
//! placed on its own line in front of the line the model must complete.

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};

pub const FILE_SEPARATOR_TOKEN: &str = "<|file_sep|>";
pub const PREFIX_TOKEN: &str = "<|fim_prefix|>";
pub const SUFFIX_TOKEN: &str = "<|fim_suffix|>";
pub const MIDDLE_TOKEN: &str = "<|fim_middle|>";

/// One line of the corpus file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub prompt: String,
    pub metadata: RowMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMetadata {
    /// 1-based line the completion is inserted at
    pub line_no: i64,
}

impl DatasetRow {
    pub fn new(prompt: impl Into<String>, line_no: i64) -> Self {
        Self {
            prompt: prompt.into(),
            metadata: RowMetadata { line_no },
        }
    }

    pub fn from_json(line: &str) -> BenchResult<Self> {
        serde_json::from_str(line)
            .map_err(|e| BenchError::Dataset(format!("failed to parse row: {}", e)))
    }
}

/// Builds model-ready FIM prompts from dataset rows
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptAssembler;

impl PromptAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the prompt for a parsed row
    pub fn assemble(&self, row: &DatasetRow) -> BenchResult<String> {
        let text = insert_line(&row.prompt, SUFFIX_TOKEN, row.metadata.line_no)?;

        let mut prompt = String::with_capacity(
            FILE_SEPARATOR_TOKEN.len() + PREFIX_TOKEN.len() + text.len() + MIDDLE_TOKEN.len() + 1,
        );
        prompt.push_str(FILE_SEPARATOR_TOKEN);
        prompt.push('\n');
        prompt.push_str(PREFIX_TOKEN);
        prompt.push_str(&text);
        prompt.push_str(MIDDLE_TOKEN);
        Ok(prompt)
    }

    /// Parse a raw JSONL line and assemble its prompt
    pub fn assemble_json(&self, line: &str) -> BenchResult<String> {
        self.assemble(&DatasetRow::from_json(line)?)
    }
}

/// Insert `marker` as its own line before the 1-based `line_number`
///
/// `line_number == line_count + 1` appends the marker directly after the last
/// line. Trailing empty lines count as lines.
pub fn insert_line(original: &str, marker: &str, line_number: i64) -> BenchResult<String> {
    let lines: Vec<&str> = original.split('\n').collect();
    let line_count = lines.len() as i64;

    if line_number < 1 || line_number > line_count + 1 {
        return Err(BenchError::Dataset(format!(
            "invalid line number {} for {} lines",
            line_number, line_count
        )));
    }

    let target = (line_number - 1) as usize;
    let mut out = String::with_capacity(original.len() + marker.len() + 1);
    for (i, line) in lines.iter().enumerate() {
        if i == target {
            out.push_str(marker);
            out.push('\n');
        }
        out.push_str(line);
        if i + 1 < lines.len() {
            out.push('\n');
        }
    }
    if target == lines.len() {
        out.push_str(marker);
    }

    Ok(out)
}
