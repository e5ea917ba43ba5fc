//! CLI Module for fim-bench
//!
//! Provides the command-line interface with subcommands for:
//! - Running a latency benchmark against a completion endpoint
//! - Inspecting assembled FIM prompts
//! - Showing the resolved settings

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::BenchmarkSettings;
use crate::VERSION;

/// fim-bench: latency benchmark for fill-in-middle completion endpoints
#[derive(Parser, Debug)]
#[command(name = "fim-bench")]
#[command(author = "LLM DevOps Team")]
#[command(version = VERSION)]
#[command(about = "Latency benchmarking harness for fill-in-middle completion endpoints")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path (YAML, TOML, or JSON)
    #[arg(long, global = true, env = "FIM_BENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Global log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "FIM_BENCH_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Enable JSON log output
    #[arg(long, global = true, env = "FIM_BENCH_JSON_LOGS")]
    pub json_logs: bool,

    /// Quiet mode - suppress banner and non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the benchmark
    #[command(alias = "r")]
    Run(RunCommand),

    /// Print assembled prompts from a dataset
    Prompt(PromptCommand),

    /// Show the settings resolved from file and environment
    #[command(alias = "cfg")]
    Config(ConfigCommand),

    /// Show version and build information
    Version,
}

/// Run the benchmark
#[derive(Parser, Debug, Default)]
pub struct RunCommand {
    /// Number of prompts to sample (default: whole corpus)
    #[arg(short = 'l', long)]
    pub sample_limit: Option<usize>,

    /// Concurrent workers (default: 1)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Delay between requests of one worker, in ms (default: 0)
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Hardware description echoed into the report
    #[arg(short, long)]
    pub gpu: Option<String>,

    /// Model name (required)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Completion endpoint URL (required)
    #[arg(short, long)]
    pub url: Option<String>,

    /// API key sent as a bearer token
    #[arg(short, long)]
    pub key: Option<String>,

    /// Model context size in tokens (required)
    #[arg(short, long)]
    pub context: Option<usize>,

    /// Tokens reserved for the completion (default: 100)
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Path to tokenizer.json (required)
    #[arg(long)]
    pub tokenizer: Option<PathBuf>,

    /// Path to the JSONL dataset (required)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Use the simulated endpoint instead of HTTP (`--mock=false` overrides a settings file)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub mock: Option<bool>,

    /// Shuffle seed (default: 0)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report output path (default: report.csv)
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl RunCommand {
    /// Settings given on the command line; unset flags stay unset
    pub fn to_settings(&self) -> BenchmarkSettings {
        BenchmarkSettings {
            sample_limit: self.sample_limit,
            threads: self.threads,
            delay_ms: self.delay,
            gpu_config: self.gpu.clone(),
            model_name: self.model.clone(),
            model_url: self.url.clone(),
            api_key: self.key.clone(),
            context_size: self.context,
            max_tokens: self.max_tokens,
            tokenizer: self.tokenizer.clone(),
            dataset: self.dataset.clone(),
            mock: self.mock,
            seed: self.seed,
            report: self.report.clone(),
        }
    }
}

/// Print assembled prompts from a dataset
#[derive(Parser, Debug)]
pub struct PromptCommand {
    /// Path to the JSONL dataset
    #[arg(long)]
    pub dataset: PathBuf,

    /// Only print the prompt at this position (0-based, after bad rows are dropped)
    #[arg(short, long)]
    pub index: Option<usize>,
}

/// Show the settings resolved from file and environment
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Output format (yaml, toml, json)
    #[arg(short, long, default_value = "yaml")]
    pub format: String,
}
