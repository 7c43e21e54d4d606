// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graphviz DOT export of a task graph.

use std::fmt::Write;

use arctic_core::TaskGraph;

/// Renders the live tasks and their dependency edges as a DOT digraph.
///
/// One node per task, labeled with its unique ID, target count, and
/// lifecycle flags; one edge per dependency, pointing from dependent to
/// dependency (the direction a flush resolves).
#[must_use]
pub fn dump_graph(graph: &TaskGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph tasks {{");
    let _ = writeln!(out, "  rankdir=BT;");

    for task in graph.live_tasks() {
        let id = graph.unique_id(task).get();
        let mut flags = String::new();
        if graph.is_closed(task) {
            flags.push('C');
        }
        if graph.is_skippable(task) {
            flags.push('S');
        }
        if graph.is_atlas(task) {
            flags.push('A');
        }
        if graph.is_detached(task) {
            flags.push('D');
        }
        let _ = writeln!(
            out,
            "  t{id} [label=\"#{id} targets={} {flags}\"];",
            graph.targets(task).len(),
        );
    }

    for task in graph.live_tasks() {
        let from = graph.unique_id(task).get();
        for dependency in graph.dependencies(task) {
            let to = graph.unique_id(dependency).get();
            let _ = writeln!(out, "  t{from} -> t{to};");
        }
    }

    let _ = writeln!(out, "}}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use arctic_core::TargetId;

    #[test]
    fn dot_lists_nodes_and_edges() {
        let mut graph = TaskGraph::new();
        let surface = TargetId(0);
        let writer = graph.add_task();
        graph.add_target(writer, surface);
        let reader = graph.add_task();
        graph.add_dependency(reader, surface);

        let dot = dump_graph(&graph);
        let writer_id = graph.unique_id(writer).get();
        let reader_id = graph.unique_id(reader).get();

        assert!(dot.starts_with("digraph tasks {"));
        assert!(dot.contains(&format!("t{writer_id} [label=\"#{writer_id} targets=1 C\"]")));
        assert!(dot.contains(&format!("t{reader_id} -> t{writer_id};")));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn empty_graph_renders_an_empty_digraph() {
        let graph = TaskGraph::new();
        let dot = dump_graph(&graph);
        assert!(dot.contains("digraph tasks {"));
        assert!(!dot.contains("->"));
    }
}
