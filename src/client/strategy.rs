//! Call strategies: how a completion request reaches an endpoint

use rand::Rng;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use tracing::trace;
use url::Url;

use crate::config::BenchmarkConfig;
use crate::error::{BenchError, BenchResult};
use crate::types::CompletionRequest;

/// TCP connect timeout for the real endpoint
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Fixed part of the simulated latency
pub const SIMULATED_BASE_MS: u64 = 300;

/// Upper bound (exclusive) of the simulated jitter
pub const SIMULATED_JITTER_MS: u64 = 50;

/// Raw result of one call, before protocol interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The endpoint answered with a status and a body
    Body { status: u16, body: String },
    /// Nothing to interpret (simulated endpoint)
    NoBody,
}

/// The closed set of ways to dispatch a request, chosen once per run
#[derive(Debug, Clone)]
pub enum CallStrategy {
    Real(RealCall),
    Simulated(SimulatedCall),
}

impl CallStrategy {
    /// Select the strategy named by the configuration
    pub fn from_config(config: &BenchmarkConfig) -> BenchResult<Self> {
        if config.simulated {
            Ok(Self::Simulated(SimulatedCall::default()))
        } else {
            Ok(Self::Real(RealCall::new(
                config.endpoint.clone(),
                config.api_key.clone(),
            )?))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Real(_) => "real",
            Self::Simulated(_) => "simulated",
        }
    }

    /// Dispatch one request
    ///
    /// Only transport failures are errors here; a bad status is still an outcome.
    pub async fn call(&self, request: &CompletionRequest) -> BenchResult<CallOutcome> {
        match self {
            Self::Real(call) => call.call(request).await,
            Self::Simulated(call) => call.call(request).await,
        }
    }
}

/// HTTP/1.1 POST to a completion endpoint
#[derive(Debug, Clone)]
pub struct RealCall {
    http: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl RealCall {
    pub fn new(endpoint: Url, api_key: Option<String>) -> BenchResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .http1_only()
            .build()
            .map_err(|e| BenchError::Config(format!("failed to construct HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn call(&self, request: &CompletionRequest) -> BenchResult<CallOutcome> {
        let mut req = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request);

        if let Some(ref key) = self.api_key {
            req = req.header(AUTHORIZATION, format!("Bearer {}", key));
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        trace!(status, bytes = body.len(), "Endpoint answered");

        Ok(CallOutcome::Body { status, body })
    }
}

/// Offline stand-in for an endpoint: sleeps for a synthetic latency
#[derive(Debug, Clone)]
pub struct SimulatedCall {
    base_ms: u64,
    jitter_ms: u64,
}

impl Default for SimulatedCall {
    fn default() -> Self {
        Self {
            base_ms: SIMULATED_BASE_MS,
            jitter_ms: SIMULATED_JITTER_MS,
        }
    }
}

impl SimulatedCall {
    /// `base + prompt_tokens / 10 + jitter`, jitter uniform in `[0, jitter_ms)`
    pub fn synthetic_latency(&self, prompt_tokens: usize) -> Duration {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..self.jitter_ms)
        };
        Duration::from_millis(self.base_ms + prompt_tokens as u64 / 10 + jitter)
    }

    pub async fn call(&self, request: &CompletionRequest) -> BenchResult<CallOutcome> {
        let latency = self.synthetic_latency(request.prompt_tokens());
        tokio::time::sleep(latency).await;
        Ok(CallOutcome::NoBody)
    }
}
