// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-task graph core for deferred GPU command recording.
//!
//! `arctic_core` provides the data structures behind a deferred rendering
//! pipeline: recorded render tasks accumulate in a [`TaskGraph`] together
//! with their target surfaces and dependency edges, and a flush drains the
//! graph in dependency order through an [`Executor`](flush::Executor). It is
//! `no_std` compatible (with `alloc`) and uses array-based struct-of-arrays
//! storage with generational index handles.
//!
//! # Architecture
//!
//! ```text
//!   recording ──► TaskGraph (tasks, targets, edges)
//!                     │
//!                     ▼  flush()
//!   close all ──► topological_sort ──► Executor::prepare/execute
//!                                          │
//!                     ┌────────────────────┘
//!                     ▼
//!   detach + destroy (graph drained)
//! ```
//!
//! **[`task`]** — Struct-of-arrays task storage with generational handles,
//! process-unique task IDs, packed lifecycle/index state words, and
//! last-writer dependency resolution per target surface.
//!
//! **[`sort`]** — Generic DFS topological sort over any graph exposing the
//! [`SortAccess`](sort::SortAccess) capability trait, with cycle detection
//! and an in-place permutation of the input slice.
//!
//! **[`flush`]** — The [`Executor`](flush::Executor) trait that command
//! backends implement, and the graph-draining flush driver.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! flush instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod flush;
pub mod sort;
pub mod task;
pub mod trace;

pub use flush::{Executor, FlushSummary};
pub use sort::{CycleError, SortAccess, topological_sort};
pub use task::{TargetId, TaskGraph, TaskHandle, TaskId};
