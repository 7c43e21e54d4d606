// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for the task graph: human-readable flush traces and a
//! Graphviz DOT export of the dependency structure.

pub mod graphviz;
pub mod pretty;

pub use graphviz::dump_graph;
pub use pretty::PrettyPrintSink;
