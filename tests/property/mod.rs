//! Property-based tests
//!
//! Invariants of partitioning, sampling, prompt assembly and the simulated endpoint.

pub mod prompt_tests;
pub mod scheduler_tests;
pub mod simulation_tests;
