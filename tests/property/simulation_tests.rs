//! Property tests for the simulated endpoint

use fim_bench::client::{SimulatedCall, SIMULATED_BASE_MS, SIMULATED_JITTER_MS};
use proptest::prelude::*;

proptest! {
    #[test]
    fn synthetic_latency_within_bounds(tokens in 0usize..100_000) {
        let latency = SimulatedCall::default().synthetic_latency(tokens).as_millis() as u64;
        let floor = SIMULATED_BASE_MS + tokens as u64 / 10;

        prop_assert!(latency >= floor);
        prop_assert!(latency < floor + SIMULATED_JITTER_MS);
    }

    #[test]
    fn synthetic_latency_grows_with_prompt(tokens in 0usize..50_000, extra in 1000usize..50_000) {
        let call = SimulatedCall::default();
        let short = call.synthetic_latency(tokens);
        let long = call.synthetic_latency(tokens + extra);

        // extra >= 1000 adds at least 100ms, more than the jitter span
        prop_assert!(long > short);
    }
}
