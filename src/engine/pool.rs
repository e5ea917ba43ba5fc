//! Fixed-size worker pool

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::client::InferenceClient;
use crate::error::{BenchError, BenchResult};
use crate::types::TokenizedPrompt;

/// Completions between progress log lines
pub const PROGRESS_INTERVAL: usize = 100;

/// Pool of `threads` workers, each draining one batch at a time
#[derive(Debug, Clone)]
pub struct WorkerPool {
    threads: usize,
    delay: Duration,
}

/// What the pool got through before it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSummary {
    pub batches: usize,
    pub processed: usize,
}

impl WorkerPool {
    pub fn new(threads: usize, delay: Duration) -> Self {
        Self {
            threads: threads.max(1),
            delay,
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Process every batch and wait for all workers
    ///
    /// At most `threads` batches run at once. The first transport error cancels
    /// the remaining workers and is returned.
    pub async fn run(
        &self,
        client: Arc<InferenceClient>,
        batches: Vec<Vec<TokenizedPrompt>>,
    ) -> BenchResult<PoolSummary> {
        let total: usize = batches.iter().map(Vec::len).sum();
        let batch_count = batches.len();
        let slots = Arc::new(Semaphore::new(self.threads));
        let progress = Arc::new(AtomicUsize::new(0));

        let mut workers = JoinSet::new();
        for (worker_id, batch) in batches.into_iter().enumerate() {
            let client = Arc::clone(&client);
            let slots = Arc::clone(&slots);
            let progress = Arc::clone(&progress);
            let delay = self.delay;

            workers.spawn(async move {
                let _slot = slots
                    .acquire_owned()
                    .await
                    .map_err(|e| BenchError::Transport(format!("worker pool closed: {}", e)))?;
                drain_batch(worker_id, &client, batch, delay, &progress, total).await
            });
        }

        let mut failure: Option<BenchError> = None;
        while let Some(joined) = workers.join_next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => continue,
                Err(e) => Err(BenchError::from(e)),
            };

            if let Err(e) = result {
                if failure.is_none() {
                    error!(error = %e, "Worker failed, aborting run");
                    workers.abort_all();
                    failure = Some(e);
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(PoolSummary {
                batches: batch_count,
                processed: progress.load(Ordering::SeqCst),
            }),
        }
    }
}

async fn drain_batch(
    worker_id: usize,
    client: &InferenceClient,
    batch: Vec<TokenizedPrompt>,
    delay: Duration,
    progress: &AtomicUsize,
    total: usize,
) -> BenchResult<()> {
    tracing::debug!(worker_id, prompts = batch.len(), "Worker started");

    for prompt in &batch {
        client.generate(prompt).await?;

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let processed = progress.fetch_add(1, Ordering::SeqCst) + 1;
        if processed % PROGRESS_INTERVAL == 0 {
            info!(processed, total, "Processed {}/{}", processed, total);
        }
    }
    Ok(())
}
