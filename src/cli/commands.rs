//! CLI Command Implementations
//!
//! Implementations for all CLI subcommands.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::error;

use crate::config::{BenchmarkConfig, BenchmarkSettings, TelemetryConfig};
use crate::corpus::load_corpus;
use crate::engine::BenchmarkRunner;
use crate::prompt::PromptAssembler;
use crate::telemetry::init_telemetry;
use crate::tokenizer::HuggingFaceTokenizer;
use crate::VERSION;

use super::{Cli, Commands, ConfigCommand, PromptCommand, RunCommand};

/// Execute the CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let telemetry = TelemetryConfig {
        log_level: cli.log_level.clone(),
        json_logs: cli.json_logs,
        ..Default::default()
    };
    init_telemetry(&telemetry)?;

    match cli.command {
        Commands::Run(cmd) => execute_run(cmd, cli.config.as_deref(), cli.quiet).await,
        Commands::Prompt(cmd) => execute_prompt(cmd),
        Commands::Config(cmd) => execute_config(cmd, cli.config.as_deref()),
        Commands::Version => execute_version(),
    }
}

/// Settings from the optional file with environment overrides on top
pub fn load_settings(config_path: Option<&Path>) -> Result<BenchmarkSettings> {
    let base = match config_path {
        Some(path) => BenchmarkSettings::from_file(path)?,
        None => BenchmarkSettings::default(),
    };
    Ok(base.merge(BenchmarkSettings::from_env()?))
}

/// Execute the run command
async fn execute_run(cmd: RunCommand, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let settings = load_settings(config_path)?.merge(cmd.to_settings());
    let config =
        BenchmarkConfig::from_settings(settings).context("Configuration validation failed")?;

    let Some(dataset) = config.dataset.clone() else {
        bail!("Configuration validation failed: dataset path is required");
    };
    let Some(tokenizer_path) = config.tokenizer.clone() else {
        bail!("Configuration validation failed: tokenizer path is required");
    };

    if !quiet {
        print_banner(&config);
    }

    let prompts = load_corpus(&dataset, &PromptAssembler::new())?;
    let tokenizer = HuggingFaceTokenizer::from_file(&tokenizer_path)?;

    let runner = BenchmarkRunner::new(config);
    match runner.run(prompts, &tokenizer).await {
        Ok(outcome) => {
            if !quiet {
                println!();
                println!("Results:");
                println!("  • Requests:  {} processed", outcome.summary.processed);
                println!("  • Recorded:  {}", outcome.report.len());
                if let Some(mean) = outcome.report.mean_time_ms() {
                    println!("  • Mean:      {:.2} ms", mean);
                }
                println!("  • Report:    {}", outcome.report_path.display());
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, error_type = e.error_type(), "Benchmark failed");
            Err(e).context("Benchmark failed")
        }
    }
}

/// Execute the prompt command
fn execute_prompt(cmd: PromptCommand) -> Result<()> {
    let prompts = load_corpus(&cmd.dataset, &PromptAssembler::new())?;

    match cmd.index {
        Some(index) => {
            let prompt = prompts.get(index).with_context(|| {
                format!("prompt index {} out of range ({} prompts)", index, prompts.len())
            })?;
            println!("{}", prompt);
        }
        None => {
            for prompt in &prompts {
                println!("{}", serde_json::to_string(prompt)?);
            }
        }
    }
    Ok(())
}

/// Execute the config command
fn execute_config(cmd: ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    let settings = load_settings(config_path)?;

    let output = match cmd.format.as_str() {
        "toml" => toml::to_string_pretty(&settings)?,
        "json" => serde_json::to_string_pretty(&settings)?,
        "yaml" | "yml" => serde_yaml::to_string(&settings)?,
        other => bail!("Unsupported format '{}'. Use yaml, toml, or json", other),
    };

    println!("{}", output);
    Ok(())
}

fn execute_version() -> Result<()> {
    println!("fim-bench {}", VERSION);
    println!();
    println!("Build Information:");
    println!("  Version:       {}", VERSION);
    println!("  Rust Version:  {}", env!("CARGO_PKG_RUST_VERSION"));
    Ok(())
}

fn print_banner(config: &BenchmarkConfig) {
    println!("fim-bench v{}", VERSION);
    println!();
    println!("Configuration:");
    println!("  • Model:     {}", config.model_name);
    println!("  • Endpoint:  {}", config.endpoint);
    println!("  • Mode:      {}", if config.simulated { "simulated" } else { "real" });
    println!("  • Threads:   {}", config.threads);
    println!("  • Delay:     {} ms", config.delay.as_millis());
    println!("  • Context:   {} tokens (max output {})", config.context_size, config.max_tokens);
    println!(
        "  • Samples:   {}",
        config.sample_limit.map_or("all".to_string(), |l| l.to_string())
    );
    println!("  • GPU:       {}", config.gpu_config.as_deref().unwrap_or("n/a"));
    println!();
}
