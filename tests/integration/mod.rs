//! Integration test module
//!
//! Contains end-to-end tests against a mocked completion endpoint.

pub mod client_tests;
pub mod pool_tests;
