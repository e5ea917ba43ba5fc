//! Inference client
//!
//! Issues one completion call per prompt through the configured
//! [`CallStrategy`], enforces the token budget before anything is sent, and
//! records a [`TimingRecord`] for every request that produced a completion.
//!
//! Failure handling is split on purpose:
//! - context overflow and protocol failures skip the request and return `Ok(None)`
//! - transport failures are returned as errors and end the run

mod strategy;

pub use strategy::*;

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::BenchmarkConfig;
use crate::error::{BenchError, BenchResult, ProtocolFailure};
use crate::timing::{TimingCollector, TimingRecord};
use crate::types::{CompletionRequest, CompletionResponse, TokenizedPrompt};

/// Completion client shared by all workers of a run
pub struct InferenceClient {
    config: Arc<BenchmarkConfig>,
    strategy: CallStrategy,
    timings: Arc<TimingCollector>,
}

impl InferenceClient {
    pub fn new(
        config: Arc<BenchmarkConfig>,
        strategy: CallStrategy,
        timings: Arc<TimingCollector>,
    ) -> Self {
        Self {
            config,
            strategy,
            timings,
        }
    }

    /// Build a client with the strategy the configuration selects
    pub fn from_config(
        config: Arc<BenchmarkConfig>,
        timings: Arc<TimingCollector>,
    ) -> BenchResult<Self> {
        let strategy = CallStrategy::from_config(&config)?;
        Ok(Self::new(config, strategy, timings))
    }

    pub fn strategy(&self) -> &CallStrategy {
        &self.strategy
    }

    pub fn timings(&self) -> &Arc<TimingCollector> {
        &self.timings
    }

    /// Complete one prompt
    ///
    /// Returns `Ok(None)` when the request was skipped or the endpoint's answer
    /// was unusable, `Err` only for transport failures.
    pub async fn generate(&self, prompt: &TokenizedPrompt) -> BenchResult<Option<String>> {
        match self.try_generate(prompt).await {
            Ok(text) => Ok(Some(text)),
            Err(err @ BenchError::ContextOverflow { .. }) => {
                warn!(
                    prompt_tokens = prompt.token_count(),
                    error = %err,
                    "Skipping prompt"
                );
                Ok(None)
            }
            Err(err) if err.is_recoverable() => {
                warn!(
                    prompt_tokens = prompt.token_count(),
                    error = %err,
                    "Request failed"
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn try_generate(&self, prompt: &TokenizedPrompt) -> BenchResult<String> {
        self.validate(prompt)?;

        let request = CompletionRequest::new(
            self.config.model_name.as_str(),
            prompt,
            self.config.max_tokens,
        );

        let start = Instant::now();
        let outcome = self.strategy.call(&request).await?;
        let elapsed = start.elapsed();

        let text = match outcome {
            CallOutcome::NoBody => String::new(),
            CallOutcome::Body { status, body } => {
                if !(200..300).contains(&status) {
                    debug!(status, body = %body, "Unexpected status");
                    return Err(ProtocolFailure::Status(status).into());
                }
                CompletionResponse::parse(&body)?.into_first_text()?
            }
        };

        let latency_ms = elapsed.as_millis() as u64;
        self.timings.record(TimingRecord::new(
            latency_ms,
            prompt.token_count(),
            text.chars().count(),
        ));

        debug!(
            latency_ms,
            prompt_tokens = prompt.token_count(),
            response = %text,
            "Completion received"
        );

        Ok(text)
    }

    /// The admission gate: prompt plus reserved output must stay below the window
    fn validate(&self, prompt: &TokenizedPrompt) -> BenchResult<()> {
        if !self.config.fits_context(prompt.token_count()) {
            return Err(BenchError::ContextOverflow {
                prompt_tokens: prompt.token_count(),
                max_tokens: self.config.max_tokens,
                context_size: self.config.context_size,
            });
        }
        Ok(())
    }
}
