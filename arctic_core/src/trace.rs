// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the flush pipeline.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! flush instrumentation calls at each stage. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::task::TaskId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a flush starts, before any task is closed.
#[derive(Clone, Copy, Debug)]
pub struct FlushBeginEvent {
    /// Number of live tasks entering the flush.
    pub task_count: u32,
}

/// Emitted after the topological sort succeeds.
#[derive(Clone, Copy, Debug)]
pub struct SortEvent {
    /// Number of tasks placed in the execution order.
    pub task_count: u32,
}

/// Emitted after a task's execute call returns.
#[derive(Clone, Copy, Debug)]
pub struct TaskExecuteEvent {
    /// Process-unique ID of the task.
    pub unique_id: TaskId,
    /// Number of target surfaces the task writes.
    pub target_count: u32,
    /// Whether the executor reported submitted work.
    pub submitted: bool,
}

/// Emitted when a skippable task is passed over.
#[derive(Clone, Copy, Debug)]
pub struct TaskSkipEvent {
    /// Process-unique ID of the task.
    pub unique_id: TaskId,
}

/// Emitted when the flush completes and the graph is drained.
#[derive(Clone, Copy, Debug)]
pub struct FlushEndEvent {
    /// Tasks whose executor call reported submitted work.
    pub executed: u32,
    /// Tasks skipped without execution.
    pub skipped: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the flush pipeline.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a flush starts.
    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        _ = e;
    }

    /// Called after the topological sort succeeds.
    fn on_sort(&mut self, e: &SortEvent) {
        _ = e;
    }

    /// Called after each task execution.
    fn on_task_execute(&mut self, e: &TaskExecuteEvent) {
        _ = e;
    }

    /// Called for each skipped task.
    fn on_task_skip(&mut self, e: &TaskSkipEvent) {
        _ = e;
    }

    /// Called when the flush completes.
    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FlushBeginEvent`].
    #[inline]
    pub fn flush_begin(&mut self, e: &FlushBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flush_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SortEvent`].
    #[inline]
    pub fn sort(&mut self, e: &SortEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sort(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TaskExecuteEvent`].
    #[inline]
    pub fn task_execute(&mut self, e: &TaskExecuteEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_task_execute(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TaskSkipEvent`].
    #[inline]
    pub fn task_skip(&mut self, e: &TaskSkipEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_task_skip(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FlushEndEvent`].
    #[inline]
    pub fn flush_end(&mut self, e: &FlushEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flush_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
