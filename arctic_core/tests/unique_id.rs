// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concurrency test for the task ID allocator.

use std::collections::HashSet;
use std::thread;

use arctic_core::TaskId;

#[test]
fn concurrent_allocation_yields_distinct_nonzero_ids() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 4096;

    let mut joins = Vec::with_capacity(THREADS);
    for _ in 0..THREADS {
        joins.push(thread::spawn(|| {
            let mut ids = Vec::with_capacity(PER_THREAD);
            for _ in 0..PER_THREAD {
                ids.push(TaskId::next());
            }
            ids
        }));
    }

    let mut seen = HashSet::with_capacity(THREADS * PER_THREAD);
    for join in joins {
        for id in join.join().expect("allocator thread panicked") {
            assert_ne!(id.get(), 0, "0 is the reserved invalid sentinel");
            assert!(seen.insert(id), "duplicate TaskId {id:?}");
        }
    }
    assert_eq!(seen.len(), THREADS * PER_THREAD);
}
