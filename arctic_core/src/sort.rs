// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic depth-first topological sort with cycle detection.
//!
//! The sort is decoupled from any concrete graph representation through the
//! [`SortAccess`] capability trait: the caller supplies per-node scratch
//! state (a result index plus a traversal mark) and indexed access to each
//! node's outgoing dependency edges. [`TaskGraph`](crate::task::TaskGraph)
//! implements it over packed state words; test graphs implement it over
//! plain structs.
//!
//! Dependencies are emitted before dependents. The DFS uses an explicit
//! stack, so dependency chains of any depth cannot overflow the call stack.

use alloc::vec::Vec;
use core::fmt;

/// Per-node scratch state and edge access used by [`topological_sort`].
///
/// Node values are small copyable keys (slot indices, references). The
/// accessor owns the backing storage for the result index and the traversal
/// mark; both must start cleared for every node handed to the sort.
pub trait SortAccess<N: Copy> {
    /// Returns the node's assigned result index, or `None` if the node has
    /// not been placed yet.
    fn result_index(&self, node: N) -> Option<u32>;

    /// Assigns the node's result index and marks it placed.
    ///
    /// Called exactly once per node.
    fn set_result_index(&mut self, node: N, index: u32);

    /// Returns whether the node is on the active traversal path.
    fn is_temp_marked(&self, node: N) -> bool;

    /// Sets or clears the active-path mark.
    fn set_temp_marked(&mut self, node: N, marked: bool);

    /// Number of outgoing dependency edges.
    fn edge_count(&self, node: N) -> usize;

    /// Returns the `nth` outgoing dependency edge.
    fn edge(&self, node: N, nth: usize) -> N;
}

/// A dependency cycle was found during [`topological_sort`].
///
/// `placed` is the number of nodes that had already received a result index
/// when the cycle was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleError {
    /// Nodes placed before the cycle was hit.
    pub placed: u32,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dependency cycle detected after {} node(s) were ordered",
            self.placed
        )
    }
}

impl core::error::Error for CycleError {}

/// Sorts `nodes` in place so every dependency precedes its dependents.
///
/// Runs an iterative depth-first traversal from each unplaced node,
/// assigning result indices in completion order, then permutes the slice to
/// match the assigned indices. The relative order of independent nodes
/// follows the input order of their DFS roots.
///
/// # Errors
///
/// Returns [`CycleError`] if the edge relation contains a cycle (including
/// self-loops). On error the accessor state and the slice are left partially
/// mutated; the caller is expected to discard the graph.
///
/// # Panics
///
/// In debug builds, panics if any node starts with a result index or a
/// traversal mark already set.
pub fn topological_sort<N, A>(nodes: &mut [N], access: &mut A) -> Result<(), CycleError>
where
    N: Copy,
    A: SortAccess<N>,
{
    #[cfg(debug_assertions)]
    for &node in nodes.iter() {
        debug_assert!(
            access.result_index(node).is_none(),
            "node enters the sort already placed"
        );
        debug_assert!(
            !access.is_temp_marked(node),
            "node enters the sort already marked"
        );
    }

    let mut next_index = 0_u32;
    // (node, next edge to visit) frames of the active path.
    let mut stack: Vec<(N, usize)> = Vec::new();

    for root_at in 0..nodes.len() {
        let root = nodes[root_at];
        if access.result_index(root).is_some() {
            continue;
        }
        access.set_temp_marked(root, true);
        stack.push((root, 0));

        while let Some(&mut (node, cursor)) = stack.last_mut() {
            if cursor < access.edge_count(node) {
                if let Some(frame) = stack.last_mut() {
                    frame.1 = cursor + 1;
                }
                let dep = access.edge(node, cursor);
                if access.result_index(dep).is_some() {
                    continue;
                }
                if access.is_temp_marked(dep) {
                    // dep is on the active path: following its edges would
                    // loop back to it.
                    return Err(CycleError { placed: next_index });
                }
                access.set_temp_marked(dep, true);
                stack.push((dep, 0));
            } else {
                // All dependencies placed; the node completes.
                access.set_temp_marked(node, false);
                access.set_result_index(node, next_index);
                next_index += 1;
                stack.pop();
            }
        }
    }

    // Cycle-following permutation: repeatedly swap the node at `at` into the
    // slot its result index names until the resident node is home.
    for at in 0..nodes.len() {
        loop {
            let home = expect_placed(access, nodes[at]) as usize;
            if home == at {
                break;
            }
            nodes.swap(at, home);
        }
    }

    #[cfg(debug_assertions)]
    for (at, &node) in nodes.iter().enumerate() {
        debug_assert!(
            expect_placed(access, node) as usize == at,
            "permutation left a node away from its assigned index"
        );
        debug_assert!(
            !access.is_temp_marked(node),
            "traversal mark survived the sort"
        );
    }

    Ok(())
}

fn expect_placed<N: Copy, A: SortAccess<N>>(access: &A, node: N) -> u32 {
    match access.result_index(node) {
        Some(index) => index,
        None => panic!("every traversed node must hold a result index"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    /// Adjacency-list test graph over plain slot indices.
    struct FlatGraph {
        count: u32,
        edges: Vec<Vec<u32>>,
        index: Vec<Option<u32>>,
        marked: Vec<bool>,
    }

    impl FlatGraph {
        fn new(node_count: u32) -> Self {
            Self {
                count: node_count,
                edges: vec![Vec::new(); node_count as usize],
                index: vec![None; node_count as usize],
                marked: vec![false; node_count as usize],
            }
        }

        fn add_edge(&mut self, from: u32, to: u32) {
            self.edges[from as usize].push(to);
        }

        fn nodes(&self) -> Vec<u32> {
            (0..self.count).collect()
        }
    }

    impl SortAccess<u32> for FlatGraph {
        fn result_index(&self, node: u32) -> Option<u32> {
            self.index[node as usize]
        }

        fn set_result_index(&mut self, node: u32, index: u32) {
            assert!(
                self.index[node as usize].is_none(),
                "result index assigned twice"
            );
            self.index[node as usize] = Some(index);
        }

        fn is_temp_marked(&self, node: u32) -> bool {
            self.marked[node as usize]
        }

        fn set_temp_marked(&mut self, node: u32, marked: bool) {
            self.marked[node as usize] = marked;
        }

        fn edge_count(&self, node: u32) -> usize {
            self.edges[node as usize].len()
        }

        fn edge(&self, node: u32, nth: usize) -> u32 {
            self.edges[node as usize][nth]
        }
    }

    fn assert_valid_order(graph: &FlatGraph, order: &[u32]) {
        let position = |node: u32| {
            order
                .iter()
                .position(|&n| n == node)
                .expect("node missing from order")
        };
        for &from in order {
            for &to in &graph.edges[from as usize] {
                assert!(
                    position(to) < position(from),
                    "dependency {to} must precede dependent {from}"
                );
            }
        }
    }

    #[test]
    fn empty_and_single() {
        let mut graph = FlatGraph::new(0);
        let mut nodes: Vec<u32> = Vec::new();
        topological_sort(&mut nodes, &mut graph).unwrap();
        assert!(nodes.is_empty());

        let mut graph = FlatGraph::new(1);
        let mut nodes = graph.nodes();
        topological_sort(&mut nodes, &mut graph).unwrap();
        assert_eq!(nodes, &[0]);
    }

    #[test]
    fn diamond_orders_dependencies_first() {
        // 3 depends on 1 and 2; both depend on 0.
        let mut graph = FlatGraph::new(4);
        graph.add_edge(1, 0);
        graph.add_edge(2, 0);
        graph.add_edge(3, 1);
        graph.add_edge(3, 2);
        let mut nodes = graph.nodes();
        topological_sort(&mut nodes, &mut graph).unwrap();
        assert_eq!(nodes[0], 0, "shared dependency comes first");
        assert_eq!(nodes[3], 3, "sink comes last");
        assert_valid_order(&graph, &nodes);
    }

    #[test]
    fn already_sorted_input_is_untouched() {
        // Chain 2 → 1 → 0, presented in dependency order.
        let mut graph = FlatGraph::new(3);
        graph.add_edge(1, 0);
        graph.add_edge(2, 1);
        let mut nodes = graph.nodes();
        topological_sort(&mut nodes, &mut graph).unwrap();
        assert_eq!(nodes, &[0, 1, 2]);
    }

    #[test]
    fn reversed_chain_is_reversed() {
        let mut graph = FlatGraph::new(3);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        let mut nodes = graph.nodes();
        topological_sort(&mut nodes, &mut graph).unwrap();
        assert_eq!(nodes, &[2, 1, 0]);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        // Deep enough to overflow a per-node call stack if the DFS recursed.
        let n: u32 = 200_000;
        let mut graph = FlatGraph::new(n);
        for i in 0..n - 1 {
            graph.add_edge(i, i + 1);
        }
        let mut nodes = graph.nodes();
        topological_sort(&mut nodes, &mut graph).unwrap();
        assert_eq!(nodes[0], n - 1);
        assert_eq!(nodes[nodes.len() - 1], 0);
    }

    #[test]
    fn two_cycle_is_rejected() {
        let mut graph = FlatGraph::new(2);
        graph.add_edge(0, 1);
        graph.add_edge(1, 0);
        let mut nodes = graph.nodes();
        let err = topological_sort(&mut nodes, &mut graph).unwrap_err();
        assert_eq!(err.placed, 0);
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut graph = FlatGraph::new(3);
        graph.add_edge(1, 1);
        let mut nodes = graph.nodes();
        assert!(topological_sort(&mut nodes, &mut graph).is_err());
    }

    #[test]
    fn cycle_behind_valid_prefix_reports_placed_count() {
        // 0 is independent; 1 and 2 form a cycle.
        let mut graph = FlatGraph::new(3);
        graph.add_edge(1, 2);
        graph.add_edge(2, 1);
        let mut nodes = graph.nodes();
        let err = topological_sort(&mut nodes, &mut graph).unwrap_err();
        assert_eq!(err.placed, 1);
        assert!(alloc::format!("{err}").contains("cycle"));
    }

    #[test]
    fn disconnected_components_keep_root_order() {
        let mut graph = FlatGraph::new(4);
        graph.add_edge(1, 0);
        graph.add_edge(3, 2);
        let mut nodes = graph.nodes();
        topological_sort(&mut nodes, &mut graph).unwrap();
        assert_eq!(nodes, &[0, 1, 2, 3]);
    }
}
