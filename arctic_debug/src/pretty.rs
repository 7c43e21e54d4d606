// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use arctic_core::trace::{
    FlushBeginEvent, FlushEndEvent, SortEvent, TaskExecuteEvent, TaskSkipEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        let _ = writeln!(self.writer, "[flush] tasks={}", e.task_count);
    }

    fn on_sort(&mut self, e: &SortEvent) {
        let _ = writeln!(self.writer, "[sort] placed={}", e.task_count);
    }

    fn on_task_execute(&mut self, e: &TaskExecuteEvent) {
        let _ = writeln!(
            self.writer,
            "[task] id={} targets={} submitted={}",
            e.unique_id.get(),
            e.target_count,
            e.submitted,
        );
    }

    fn on_task_skip(&mut self, e: &TaskSkipEvent) {
        let _ = writeln!(self.writer, "[skip] id={}", e.unique_id.get());
    }

    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        let _ = writeln!(
            self.writer,
            "[flush:end] executed={} skipped={}",
            e.executed, e.skipped,
        );
    }
}
