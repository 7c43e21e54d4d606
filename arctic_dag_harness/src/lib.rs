// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable random-DAG generation and order checking for task-graph tests.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use arctic_core::{TaskGraph, TaskHandle};

/// Small deterministic xorshift generator for reproducible test graphs.
#[derive(Clone, Copy, Debug)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a generator from a nonzero seed.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is 0 (the xorshift fixed point).
    #[must_use]
    pub fn new(seed: u64) -> Self {
        assert!(seed != 0, "xorshift seed must be nonzero");
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in `0..bound`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is 0.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        assert!(bound != 0, "bound must be nonzero");
        #[expect(
            clippy::cast_possible_truncation,
            reason = "remainder of a u32 bound fits in u32"
        )]
        let below = (self.next_u64() % u64::from(bound)) as u32;
        below
    }

    /// Returns true with probability `permille / 1000`.
    pub fn coin(&mut self, permille: u32) -> bool {
        self.next_below(1000) < permille
    }
}

/// Builds a random DAG of `node_count` tasks in `graph`.
///
/// Each potential edge from a later-created task to an earlier-created one
/// is added with probability `edge_permille / 1000`, so the result is
/// acyclic by construction. Returns the created handles in creation order.
pub fn build_random_dag(
    graph: &mut TaskGraph,
    rng: &mut XorShift64,
    node_count: u32,
    edge_permille: u32,
) -> Vec<TaskHandle> {
    let mut tasks = Vec::with_capacity(node_count as usize);
    for _ in 0..node_count {
        tasks.push(graph.add_task());
    }
    for later in 1..node_count as usize {
        for earlier in 0..later {
            if rng.coin(edge_permille) {
                graph.add_task_dependency(tasks[later], tasks[earlier]);
            }
        }
    }
    tasks
}

/// Checks that every dependency precedes its dependent in `order`.
///
/// `order` must contain every live task exactly once; tasks missing from
/// `order` fail the check.
#[must_use]
pub fn is_topological_order(graph: &TaskGraph, order: &[TaskHandle]) -> bool {
    let position = |task: TaskHandle| order.iter().position(|&t| t == task);
    for &task in order {
        let Some(at) = position(task) else {
            return false;
        };
        for dependency in graph.dependencies(task) {
            match position(dependency) {
                Some(dep_at) if dep_at < at => {}
                _ => return false,
            }
        }
    }
    graph.task_count() == order.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xorshift_is_deterministic() {
        let mut a = XorShift64::new(42);
        let mut b = XorShift64::new(42);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    #[should_panic(expected = "xorshift seed must be nonzero")]
    fn zero_seed_panics() {
        let _ = XorShift64::new(0);
    }

    #[test]
    fn generated_graph_has_requested_node_count() {
        let mut graph = TaskGraph::new();
        let mut rng = XorShift64::new(7);
        let tasks = build_random_dag(&mut graph, &mut rng, 20, 300);
        assert_eq!(tasks.len(), 20);
        assert_eq!(graph.task_count(), 20);
    }

    #[test]
    fn creation_order_is_a_valid_order_for_generated_graphs() {
        // Dependencies only point at earlier tasks, so creation order is
        // already topological.
        let mut graph = TaskGraph::new();
        let mut rng = XorShift64::new(99);
        let tasks = build_random_dag(&mut graph, &mut rng, 16, 500);
        assert!(is_topological_order(&graph, &tasks));
    }

    #[test]
    fn order_missing_a_task_fails_the_check() {
        let mut graph = TaskGraph::new();
        let mut rng = XorShift64::new(3);
        let tasks = build_random_dag(&mut graph, &mut rng, 4, 0);
        assert!(!is_topological_order(&graph, &tasks[1..]));
    }
}
