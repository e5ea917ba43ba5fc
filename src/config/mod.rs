//! Configuration module for fim-bench
//!
//! Provides layered configuration with support for:
//! - YAML/TOML/JSON config files
//! - Environment variable overrides
//! - Command-line overrides
//! - Validation into an immutable [`BenchmarkConfig`]

mod settings;

pub use settings::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{BenchError, BenchResult};
use crate::types::MAX_OUTPUT_TOKENS;
use crate::{DEFAULT_REPORT_FILE, DEFAULT_SEED};

/// Default worker count
pub const THREADS_DEFAULT: usize = 1;

/// Default pause between requests of one worker
pub const DELAY_MS_DEFAULT: u64 = 0;

/// Resolved benchmark configuration
///
/// Built once by [`BenchmarkConfig::from_settings`] and shared read-only
/// (usually behind an `Arc`) by every component of a run. Fields are only
/// reachable through accessors so a validated value stays valid.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    pub(crate) sample_limit: Option<usize>,
    pub(crate) threads: usize,
    pub(crate) delay: Duration,
    /// Opaque hardware tag, only echoed
    pub(crate) gpu_config: Option<String>,
    pub(crate) model_name: String,
    pub(crate) endpoint: Url,
    pub(crate) api_key: Option<String>,
    pub(crate) context_size: usize,
    pub(crate) max_tokens: usize,
    pub(crate) tokenizer: Option<PathBuf>,
    pub(crate) dataset: Option<PathBuf>,
    pub(crate) simulated: bool,
    pub(crate) seed: u64,
    pub(crate) report_path: PathBuf,
}

impl BenchmarkConfig {
    /// Apply defaults to `settings` and validate the result
    pub fn from_settings(settings: BenchmarkSettings) -> BenchResult<Self> {
        let model_name = non_blank(settings.model_name)
            .ok_or_else(|| BenchError::validation("model name is required", "model_name"))?;
        let model_url = non_blank(settings.model_url)
            .ok_or_else(|| BenchError::validation("model url is required", "model_url"))?;
        let context_size = settings
            .context_size
            .ok_or_else(|| BenchError::validation("context size is required", "context_size"))?;

        let endpoint = Url::parse(&model_url)
            .map_err(|e| BenchError::Config(format!("invalid model url '{}': {}", model_url, e)))?;

        let config = Self {
            sample_limit: settings.sample_limit,
            threads: settings.threads.unwrap_or(THREADS_DEFAULT),
            delay: Duration::from_millis(settings.delay_ms.unwrap_or(DELAY_MS_DEFAULT)),
            gpu_config: non_blank(settings.gpu_config),
            model_name,
            endpoint,
            api_key: non_blank(settings.api_key),
            context_size,
            max_tokens: settings.max_tokens.unwrap_or(MAX_OUTPUT_TOKENS),
            tokenizer: settings.tokenizer,
            dataset: settings.dataset,
            simulated: settings.mock.unwrap_or(false),
            seed: settings.seed.unwrap_or(DEFAULT_SEED),
            report_path: settings
                .report
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE)),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> BenchResult<()> {
        if self.threads == 0 {
            return Err(BenchError::validation(
                "threads must be greater than 0",
                "threads",
            ));
        }
        if self.context_size == 0 {
            return Err(BenchError::validation(
                "context size must be greater than 0",
                "context_size",
            ));
        }
        if !matches!(self.endpoint.scheme(), "http" | "https") {
            return Err(BenchError::Config(format!(
                "model url must be http or https: {}",
                self.endpoint
            )));
        }
        if self.max_tokens == 0 {
            return Err(BenchError::validation(
                "max tokens must be greater than 0",
                "max_tokens",
            ));
        }
        if self.max_tokens >= self.context_size {
            return Err(BenchError::validation(
                format!(
                    "max tokens {} leaves no room for a prompt in context size {}",
                    self.max_tokens, self.context_size
                ),
                "max_tokens",
            ));
        }
        check_path("tokenizer", self.tokenizer.as_deref())?;
        check_path("dataset", self.dataset.as_deref())?;
        Ok(())
    }

    /// Whether a prompt of `prompt_tokens` plus the reserved output fits the context window
    pub fn fits_context(&self, prompt_tokens: usize) -> bool {
        prompt_tokens
            .checked_add(self.max_tokens)
            .map_or(false, |total| total < self.context_size)
    }

    pub fn sample_limit(&self) -> Option<usize> {
        self.sample_limit
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn gpu_config(&self) -> Option<&str> {
        self.gpu_config.as_deref()
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn context_size(&self) -> usize {
        self.context_size
    }

    /// Tokens reserved for the completion
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn tokenizer(&self) -> Option<&Path> {
        self.tokenizer.as_deref()
    }

    pub fn dataset(&self) -> Option<&Path> {
        self.dataset.as_deref()
    }

    /// Whether requests go to the simulated endpoint
    pub fn simulated(&self) -> bool {
        self.simulated
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_path(name: &str, path: Option<&Path>) -> BenchResult<()> {
    match path {
        Some(path) if !path.exists() => Err(BenchError::Config(format!(
            "{} can't be found: {}",
            name,
            path.display()
        ))),
        _ => Ok(()),
    }
}

fn opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

fn opt_path(value: &Option<PathBuf>) -> String {
    match value {
        Some(p) => p.display().to_string(),
        None => "null".to_string(),
    }
}

impl fmt::Display for BenchmarkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // camelCase keys are parsed by the chart renderer
        write!(
            f,
            "BenchmarkConfig{{sampleLimit={}, threads={}, delayMs={}, gpuConfig='{}', \
             modelName='{}', modelUrl='{}', apiKey={}, contextSize={}, maxTokens={}, \
             tokenizer={}, dataset={}, mock={}, seed={}}}",
            opt(&self.sample_limit),
            self.threads,
            self.delay.as_millis(),
            opt(&self.gpu_config),
            self.model_name,
            self.endpoint,
            if self.api_key.is_some() { "'***'" } else { "null" },
            self.context_size,
            self.max_tokens,
            opt_path(&self.tokenizer),
            opt_path(&self.dataset),
            self.simulated,
            self.seed,
        )
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable telemetry
    pub enabled: bool,
    /// Log level
    pub log_level: String,
    /// Enable JSON logging
    pub json_logs: bool,
    /// Service name attached to the startup event
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
            json_logs: false,
            service_name: "fim-bench".to_string(),
        }
    }
}
