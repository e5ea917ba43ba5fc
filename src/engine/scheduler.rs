//! Batch partitioning

/// Split `items` into consecutive batches for `threads` workers
///
/// Batches hold `max(n / threads, 1)` items each; the last batch holds the
/// remainder. When `n` is not a multiple of `threads` this yields more batches
/// than workers, and the extra batches wait for a free worker.
pub fn partition<T>(items: Vec<T>, threads: usize) -> Vec<Vec<T>> {
    let size = batch_size(items.len(), threads);
    let mut batches = Vec::with_capacity(items.len().div_ceil(size));

    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        batches.push(iter.by_ref().take(size).collect());
    }
    batches
}

/// Items per batch for `n` items across `threads` workers
pub fn batch_size(n: usize, threads: usize) -> usize {
    (n / threads.max(1)).max(1)
}
