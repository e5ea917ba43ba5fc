//! # fim-bench
//!
//! Latency benchmarking harness for fill-in-middle text-completion endpoints.
//!
//! fim-bench replays a corpus of code-completion prompts against an
//! OpenAI-compatible `/v1/completions` endpoint (or an offline simulation of
//! one), spreads the requests over a fixed pool of concurrent workers, and
//! writes per-request latency and size figures to a CSV-style report.
//!
//! ## Features
//!
//! - **FIM Prompt Assembly**: RepoEval rows to Qwen2.5-Coder FIM prompts
//! - **Deterministic Sampling**: Seeded shuffle, reproducible across runs
//! - **Token Budget Gate**: Oversized prompts never reach the network
//! - **Simulated Endpoint**: Offline runs with synthetic latency
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fim_bench::{BenchmarkConfig, BenchmarkRunner, BenchmarkSettings};
//! use fim_bench::tokenizer::HuggingFaceTokenizer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut settings = BenchmarkSettings::new("qwen2.5-coder", "http://localhost:8000/v1/completions", 8192);
//!     settings.mock = Some(true);
//!     let config = BenchmarkConfig::from_settings(settings)?;
//!
//!     let prompts = vec!["<|file_sep|>\n<|fim_prefix|><|fim_suffix|>\nint a;<|fim_middle|>".to_string()];
//!     let tokenizer = HuggingFaceTokenizer::from_file("tokenizer.json")?;
//!     let outcome = BenchmarkRunner::new(config).run(prompts, &tokenizer).await?;
//!     println!("{}", outcome.report);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod telemetry;
pub mod timing;
pub mod tokenizer;
pub mod types;

pub use client::{CallStrategy, InferenceClient};
pub use config::{BenchmarkConfig, BenchmarkSettings};
pub use engine::{BenchmarkOutcome, BenchmarkRunner, WorkerPool};
pub use error::{BenchError, BenchResult};
pub use timing::{TimingCollector, TimingRecord, TimingReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default report file, relative to the working directory
pub const DEFAULT_REPORT_FILE: &str = "report.csv";

/// Default shuffle seed
pub const DEFAULT_SEED: u64 = 0;
