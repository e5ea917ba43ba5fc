//! Deterministic corpus sampling

use rand::prelude::*;

use crate::error::{BenchError, BenchResult};

/// Seeded shuffler for prompt lists
///
/// Owns its generator, so the same seed over the same input always yields the
/// same order, independent of any other randomness in the process.
pub struct CorpusSampler {
    rng: StdRng,
}

impl CorpusSampler {
    /// Create a sampler with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffle a copy of `items` and keep the first `limit` of them
    ///
    /// A limit larger than the list is an error; a limit of zero yields nothing.
    pub fn sample<T: Clone>(&mut self, items: &[T], limit: Option<usize>) -> BenchResult<Vec<T>> {
        if let Some(limit) = limit {
            if limit > items.len() {
                return Err(BenchError::validation(
                    format!(
                        "sample limit {} exceeds corpus size {}",
                        limit,
                        items.len()
                    ),
                    "sample_limit",
                ));
            }
        }

        let mut shuffled = items.to_vec();
        shuffled.shuffle(&mut self.rng);

        if let Some(limit) = limit {
            shuffled.truncate(limit);
        }
        Ok(shuffled)
    }
}
