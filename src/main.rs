//! fim-bench CLI
//!
//! Latency benchmark for fill-in-middle completion endpoints.

use clap::Parser;

use fim_bench::cli::{execute, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    execute(cli).await
}
