//! Property tests for batch partitioning

use fim_bench::engine::{batch_size, partition};
use proptest::prelude::*;

proptest! {
    #[test]
    fn concatenated_batches_restore_input(n in 0usize..500, threads in 1usize..64) {
        let items: Vec<usize> = (0..n).collect();
        let batches = partition(items.clone(), threads);

        let flattened: Vec<usize> = batches.into_iter().flatten().collect();
        prop_assert_eq!(flattened, items);
    }

    #[test]
    fn batches_are_full_except_last(n in 1usize..500, threads in 1usize..64) {
        let batches = partition((0..n).collect::<Vec<_>>(), threads);
        let size = batch_size(n, threads);

        prop_assert!(batches.iter().all(|b| !b.is_empty()));
        let (last, full) = batches.split_last().unwrap();
        prop_assert!(full.iter().all(|b| b.len() == size));
        prop_assert!(last.len() <= size);
    }

    #[test]
    fn batch_count_bounds(n in 1usize..500, threads in 1usize..64) {
        let batches = partition((0..n).collect::<Vec<_>>(), threads);

        prop_assert_eq!(batches.len(), n.div_ceil(batch_size(n, threads)));
        if n >= threads {
            prop_assert!(batches.len() >= threads);
            prop_assert!(batches.len() <= threads + threads);
        } else {
            prop_assert_eq!(batches.len(), n);
        }
    }
}
