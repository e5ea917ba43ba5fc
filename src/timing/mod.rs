//! Per-request timing collection and report rendering

use parking_lot::Mutex;
use std::fmt;
use std::path::Path;

use crate::error::{BenchError, BenchResult};

/// Column header of the timing table
pub const REPORT_HEADER: &str = "timeMs, contextTokensSize, responseCharsSize";

/// Timing of one completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingRecord {
    pub time_ms: u64,
    pub context_tokens: usize,
    pub response_chars: usize,
}

impl TimingRecord {
    pub fn new(time_ms: u64, context_tokens: usize, response_chars: usize) -> Self {
        Self {
            time_ms,
            context_tokens,
            response_chars,
        }
    }
}

/// Thread-safe, append-only store of timing records
///
/// Records keep completion order. One lock guards the whole list.
#[derive(Debug, Default)]
pub struct TimingCollector {
    records: Mutex<Vec<TimingRecord>>,
}

impl TimingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, record: TimingRecord) {
        self.records.lock().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Copy of everything recorded so far
    pub fn report(&self) -> TimingReport {
        TimingReport {
            records: self.records.lock().clone(),
        }
    }
}

/// Snapshot of collected timings in completion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingReport {
    pub records: Vec<TimingRecord>,
}

impl TimingReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean latency in milliseconds, if anything was recorded
    pub fn mean_time_ms(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let total: u64 = self.records.iter().map(|r| r.time_ms).sum();
        Some(total as f64 / self.records.len() as f64)
    }

    /// Full report document: configuration echo, blank line, timing table
    pub fn render<C: fmt::Display>(&self, config: &C) -> String {
        format!("INFO: {}\n\n{}", config, self)
    }

    /// Write the rendered report to `path`
    pub fn write_to<C: fmt::Display, P: AsRef<Path>>(&self, config: &C, path: P) -> BenchResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render(config)).map_err(|e| {
            BenchError::Io(format!("failed to write report {}: {}", path.display(), e))
        })
    }
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", REPORT_HEADER)?;
        for record in &self.records {
            writeln!(
                f,
                "{}, {}, {}",
                record.time_ms, record.context_tokens, record.response_chars
            )?;
        }
        Ok(())
    }
}
