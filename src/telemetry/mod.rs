//! Telemetry module
//!
//! Structured logging with tracing. `RUST_LOG` takes precedence over the
//! configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;
use crate::error::{BenchError, BenchResult};

/// Initialize the telemetry subsystem
pub fn init_telemetry(config: &TelemetryConfig) -> BenchResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_target(true);

        subscriber
            .with(json_layer)
            .try_init()
            .map_err(|e| BenchError::Config(format!("failed to install subscriber: {}", e)))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_file(false)
            .with_line_number(false)
            .with_target(true)
            .compact();

        subscriber
            .with(fmt_layer)
            .try_init()
            .map_err(|e| BenchError::Config(format!("failed to install subscriber: {}", e)))?;
    }

    tracing::info!(
        service = %config.service_name,
        version = %env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}
