//! End-to-end benchmark run

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use super::{partition, PoolSummary, WorkerPool};
use crate::client::InferenceClient;
use crate::config::BenchmarkConfig;
use crate::corpus::CorpusSampler;
use crate::error::BenchResult;
use crate::timing::{TimingCollector, TimingReport};
use crate::tokenizer::{tokenize_prompts, Tokenizer};
use crate::types::TokenizedPrompt;

/// Result of a run that finished without a transport failure
#[derive(Debug, Clone)]
pub struct BenchmarkOutcome {
    pub report: TimingReport,
    pub summary: PoolSummary,
    pub report_path: PathBuf,
}

/// Orchestrates sampling, tokenization, dispatch and report emission
pub struct BenchmarkRunner {
    config: Arc<BenchmarkConfig>,
}

impl BenchmarkRunner {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Sample and tokenize assembled prompts, then run them
    pub async fn run<T>(&self, prompts: Vec<String>, tokenizer: &T) -> BenchResult<BenchmarkOutcome>
    where
        T: Tokenizer + ?Sized,
    {
        let sampled =
            CorpusSampler::with_seed(self.config.seed).sample(&prompts, self.config.sample_limit)?;
        let tokenized = tokenize_prompts(tokenizer, sampled)?;

        info!(prompts = tokenized.len(), "Parsed prompts number: {}", tokenized.len());

        self.run_tokenized(tokenized).await
    }

    /// Dispatch already tokenized prompts and flush the report
    ///
    /// The report file is written even when a worker aborts the run; in that
    /// case it holds everything recorded before the abort and the error is
    /// returned afterwards.
    pub async fn run_tokenized(&self, prompts: Vec<TokenizedPrompt>) -> BenchResult<BenchmarkOutcome> {
        let timings = Arc::new(TimingCollector::new());
        let client = Arc::new(InferenceClient::from_config(
            Arc::clone(&self.config),
            Arc::clone(&timings),
        )?);

        info!(
            strategy = client.strategy().name(),
            threads = self.config.threads,
            prompts = prompts.len(),
            "Starting benchmark"
        );

        let batches = partition(prompts, self.config.threads);
        let pool = WorkerPool::new(self.config.threads, self.config.delay);
        let result = pool.run(client, batches).await;

        let report = timings.report();
        let flushed = self.flush(&report);

        match (result, flushed) {
            (Ok(summary), Ok(())) => Ok(BenchmarkOutcome {
                report,
                summary,
                report_path: self.config.report_path.clone(),
            }),
            (Ok(_), Err(write_error)) => Err(write_error),
            (Err(run_error), Ok(())) => Err(run_error),
            (Err(run_error), Err(write_error)) => {
                error!(error = %write_error, "Failed to save report");
                Err(run_error)
            }
        }
    }

    fn flush(&self, report: &TimingReport) -> BenchResult<()> {
        let rendered = report.render(&*self.config);
        info!("Report: \n\n {}", rendered);

        report.write_to(&*self.config, &self.config.report_path)?;

        let shown = std::fs::canonicalize(&self.config.report_path)
            .unwrap_or_else(|_| self.config.report_path.clone());
        info!(path = %shown.display(), "Report saved");
        Ok(())
    }
}
