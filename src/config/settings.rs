//! Layered benchmark settings
//!
//! Settings are the partially specified input gathered from a config file,
//! the environment and the command line. They are resolved exactly once into
//! an immutable [`BenchmarkConfig`](super::BenchmarkConfig).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BenchError, BenchResult};

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "FIM_BENCH_";

/// Benchmark settings before defaults and validation are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkSettings {
    /// Number of prompts to sample (None = whole corpus)
    pub sample_limit: Option<usize>,
    /// Concurrent workers
    pub threads: Option<usize>,
    /// Pause after each request, in milliseconds
    pub delay_ms: Option<u64>,
    /// Free-form hardware tag echoed into the report
    pub gpu_config: Option<String>,
    pub model_name: Option<String>,
    pub model_url: Option<String>,
    pub api_key: Option<String>,
    /// Model context window in tokens
    pub context_size: Option<usize>,
    /// Tokens reserved for the completion
    pub max_tokens: Option<usize>,
    /// Path to a HuggingFace `tokenizer.json`
    pub tokenizer: Option<PathBuf>,
    /// Path to the JSONL corpus
    pub dataset: Option<PathBuf>,
    /// Use the simulated endpoint instead of HTTP
    pub mock: Option<bool>,
    /// Shuffle seed
    pub seed: Option<u64>,
    /// Where the report is written
    pub report: Option<PathBuf>,
}

impl BenchmarkSettings {
    /// Minimal settings naming the three mandatory fields
    pub fn new(
        model_name: impl Into<String>,
        model_url: impl Into<String>,
        context_size: usize,
    ) -> Self {
        Self {
            model_name: Some(model_name.into()),
            model_url: Some(model_url.into()),
            context_size: Some(context_size),
            ..Default::default()
        }
    }

    /// Load settings from a YAML, TOML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> BenchResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BenchError::Config(format!("Failed to read config file: {}", e)))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| BenchError::Config(format!("YAML parse error: {}", e))),
            Some("toml") => toml::from_str(&content)
                .map_err(|e| BenchError::Config(format!("TOML parse error: {}", e))),
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| BenchError::Config(format!("JSON parse error: {}", e))),
            _ => Err(BenchError::Config(
                "Unsupported config file format. Use .yaml, .toml, or .json".to_string(),
            )),
        }
    }

    /// Collect overrides from `FIM_BENCH_*` environment variables
    pub fn from_env() -> BenchResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Collect overrides through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> BenchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        Ok(Self {
            sample_limit: parse_var(&var, "SAMPLE_LIMIT")?,
            threads: parse_var(&var, "THREADS")?,
            delay_ms: parse_var(&var, "DELAY_MS")?,
            gpu_config: var("GPU_CONFIG"),
            model_name: var("MODEL_NAME"),
            model_url: var("MODEL_URL"),
            api_key: var("API_KEY"),
            context_size: parse_var(&var, "CONTEXT_SIZE")?,
            max_tokens: parse_var(&var, "MAX_TOKENS")?,
            tokenizer: var("TOKENIZER").map(PathBuf::from),
            dataset: var("DATASET").map(PathBuf::from),
            mock: parse_var(&var, "MOCK")?,
            seed: parse_var(&var, "SEED")?,
            report: var("REPORT").map(PathBuf::from),
        })
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            sample_limit: overrides.sample_limit.or(self.sample_limit),
            threads: overrides.threads.or(self.threads),
            delay_ms: overrides.delay_ms.or(self.delay_ms),
            gpu_config: overrides.gpu_config.or(self.gpu_config),
            model_name: overrides.model_name.or(self.model_name),
            model_url: overrides.model_url.or(self.model_url),
            api_key: overrides.api_key.or(self.api_key),
            context_size: overrides.context_size.or(self.context_size),
            max_tokens: overrides.max_tokens.or(self.max_tokens),
            tokenizer: overrides.tokenizer.or(self.tokenizer),
            dataset: overrides.dataset.or(self.dataset),
            mock: overrides.mock.or(self.mock),
            seed: overrides.seed.or(self.seed),
            report: overrides.report.or(self.report),
        }
    }
}

fn parse_var<F, T>(var: &F, name: &str) -> BenchResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            BenchError::Config(format!("Invalid value for {}{}: {}", ENV_PREFIX, name, raw))
        }),
    }
}
