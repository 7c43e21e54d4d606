// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-style checks of the sort over generated graphs.

use arctic_core::trace::Tracer;
use arctic_core::{Executor, TaskGraph, TaskHandle, TaskId};
use arctic_dag_harness::{XorShift64, build_random_dag, is_topological_order};

#[test]
fn sorted_order_is_topological_across_seeds() {
    for seed in [1_u64, 7, 42, 1234, 0xDEAD_BEEF] {
        let mut graph = TaskGraph::new();
        let mut rng = XorShift64::new(seed);
        let node_count = 8 + rng.next_below(120);
        let edge_permille = 50 + rng.next_below(400);
        build_random_dag(&mut graph, &mut rng, node_count, edge_permille);

        let sorted = graph.sorted_tasks().expect("generated graphs are acyclic");
        assert_eq!(sorted.len(), node_count as usize, "seed {seed}");
        assert!(is_topological_order(&graph, &sorted), "seed {seed}");
    }
}

#[test]
fn flush_executes_every_task_in_dependency_order() {
    struct OrderChecker {
        expected: Vec<TaskId>,
        log: Vec<TaskId>,
    }

    impl Executor for OrderChecker {
        fn execute(&mut self, graph: &TaskGraph, task: TaskHandle) -> bool {
            for dependency in graph.dependencies(task) {
                let dep_id = graph.unique_id(dependency);
                assert!(
                    self.log.contains(&dep_id),
                    "dependency executed after its dependent"
                );
            }
            self.log.push(graph.unique_id(task));
            true
        }
    }

    let mut graph = TaskGraph::new();
    let mut rng = XorShift64::new(0xA11CE);
    let tasks = build_random_dag(&mut graph, &mut rng, 64, 200);
    let expected: Vec<TaskId> = tasks.iter().map(|&t| graph.unique_id(t)).collect();

    let mut executor = OrderChecker {
        expected,
        log: Vec::new(),
    };
    let summary = graph
        .flush(&mut executor, &mut Tracer::none())
        .expect("generated graphs are acyclic");

    assert_eq!(summary.executed, 64);
    assert_eq!(executor.log.len(), executor.expected.len());
    for id in &executor.expected {
        assert!(executor.log.contains(id), "task {id:?} never executed");
    }
    assert_eq!(graph.task_count(), 0);
}
