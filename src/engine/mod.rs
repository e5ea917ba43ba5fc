//! Benchmark engine
//!
//! The engine is the only part of the crate with end-to-end control flow:
//! - Partitioning prompts into per-worker batches
//! - Running a fixed-size worker pool against the inference client
//! - Flushing the timing report whether or not the run completed

mod pool;
mod runner;
mod scheduler;

pub use pool::*;
pub use runner::*;
pub use scheduler::*;
