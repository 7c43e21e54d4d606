// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flush driver: drains the task graph in dependency order.
//!
//! A flush is the hand-off point between recording and submission. The graph
//! closes every task that is still open, topologically sorts the live tasks,
//! and walks the sorted order through an [`Executor`]. Afterwards the graph
//! is empty: every task is detached and its slot released.

use alloc::vec::Vec;

use crate::sort::CycleError;
use crate::task::{TaskGraph, TaskHandle};
use crate::trace::{
    FlushBeginEvent, FlushEndEvent, SortEvent, TaskExecuteEvent, TaskSkipEvent, Tracer,
};

/// Command submission capability the flush drives tasks through.
///
/// Implementations translate a task's recorded work into backend commands.
/// The graph is passed back read-only so the executor can query targets,
/// dependencies, and IDs while encoding.
pub trait Executor {
    /// Called for every non-skippable task before any execution side
    /// effects; resource allocation and barrier planning go here.
    fn prepare(&mut self, graph: &TaskGraph, task: TaskHandle) {
        _ = (graph, task);
    }

    /// Executes the task's recorded work. Returns whether any work was
    /// actually submitted.
    fn execute(&mut self, graph: &TaskGraph, task: TaskHandle) -> bool;
}

/// Counts reported by [`TaskGraph::flush`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushSummary {
    /// Tasks whose [`Executor::execute`] call reported submitted work.
    pub executed: u32,
    /// Skippable tasks passed over without execution.
    pub skipped: u32,
}

impl TaskGraph {
    /// Flushes the graph: closes all open tasks, sorts, executes, drains.
    ///
    /// Execution order is the topological order of the dependency relation;
    /// skippable tasks keep their position but are not executed. On success
    /// the graph is empty and all previously issued handles are stale.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if the dependency relation contains a cycle.
    /// Nothing is executed in that case; the graph is left partially mutated
    /// (tasks closed, sort state inconsistent) and should be discarded.
    pub fn flush(
        &mut self,
        executor: &mut dyn Executor,
        tracer: &mut Tracer<'_>,
    ) -> Result<FlushSummary, CycleError> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "the 26-bit sort index field bounds the live task count"
        )]
        let task_count = self.task_count() as u32;
        tracer.flush_begin(&FlushBeginEvent { task_count });

        // Recording is over; every task participates in the sort closed.
        let live: Vec<TaskHandle> = self.live_tasks().collect();
        for &task in &live {
            self.make_closed(task);
        }

        let sorted = self.sorted_tasks()?;
        tracer.sort(&SortEvent { task_count });

        let mut summary = FlushSummary::default();
        for &task in &sorted {
            if self.is_skippable(task) {
                summary.skipped += 1;
                tracer.task_skip(&TaskSkipEvent {
                    unique_id: self.unique_id(task),
                });
                continue;
            }
            executor.prepare(self, task);
            let submitted = executor.execute(self, task);
            if submitted {
                summary.executed += 1;
            }
            #[expect(
                clippy::cast_possible_truncation,
                reason = "target lists are bounded by the live task count"
            )]
            let target_count = self.targets(task).len() as u32;
            tracer.task_execute(&TaskExecuteEvent {
                unique_id: self.unique_id(task),
                target_count,
                submitted,
            });
        }

        // Drain. The wholesale clear below covers the per-task last-writer
        // cleanup detach would otherwise repeat.
        self.last_writer.clear();
        for &task in &sorted {
            self.detach(task);
            self.release_slot(task.index());
        }
        self.order.clear();

        tracer.flush_end(&FlushEndEvent {
            executed: summary.executed,
            skipped: summary.skipped,
        });
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TargetId, TaskId};
    use alloc::vec::Vec;

    /// Records execution order; reports submitted work for every task.
    #[derive(Default)]
    struct RecordingExecutor {
        log: Vec<TaskId>,
        prepared: Vec<TaskId>,
    }

    impl Executor for RecordingExecutor {
        fn prepare(&mut self, graph: &TaskGraph, task: TaskHandle) {
            self.prepared.push(graph.unique_id(task));
        }

        fn execute(&mut self, graph: &TaskGraph, task: TaskHandle) -> bool {
            self.log.push(graph.unique_id(task));
            true
        }
    }

    #[test]
    fn empty_flush_is_a_no_op() {
        let mut graph = TaskGraph::new();
        let mut executor = RecordingExecutor::default();
        let summary = graph
            .flush(&mut executor, &mut Tracer::none())
            .unwrap();
        assert_eq!(summary, FlushSummary::default());
        assert!(executor.log.is_empty());
    }

    #[test]
    fn flush_executes_in_dependency_order_and_drains() {
        let mut graph = TaskGraph::new();
        let surface = TargetId(0);
        let writer = graph.add_task();
        graph.add_target(writer, surface);
        let writer_id = graph.unique_id(writer);

        let reader = graph.add_task();
        graph.add_dependency(reader, surface);
        let reader_id = graph.unique_id(reader);

        let mut executor = RecordingExecutor::default();
        let summary = graph
            .flush(&mut executor, &mut Tracer::none())
            .unwrap();

        assert_eq!(executor.log, &[writer_id, reader_id]);
        assert_eq!(executor.prepared, executor.log, "prepare precedes execute");
        assert_eq!(summary.executed, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(graph.task_count(), 0, "flush drains the graph");
        assert!(!graph.is_alive(writer));
        assert!(!graph.is_alive(reader));
    }

    #[test]
    fn diamond_executes_shared_dependency_once_and_first() {
        // b and c read a's target; d reads both.
        let mut graph = TaskGraph::new();
        let (sa, sb, sc) = (TargetId(0), TargetId(1), TargetId(2));

        let a = graph.add_task();
        graph.add_target(a, sa);
        let a_id = graph.unique_id(a);

        let b = graph.add_task();
        graph.add_dependency(b, sa);
        graph.add_target(b, sb);

        let c = graph.add_task();
        graph.add_dependency(c, sa);
        graph.add_target(c, sc);

        let d = graph.add_task();
        graph.add_dependency(d, sb);
        graph.add_dependency(d, sc);
        let d_id = graph.unique_id(d);

        let mut executor = RecordingExecutor::default();
        graph.flush(&mut executor, &mut Tracer::none()).unwrap();

        assert_eq!(executor.log.len(), 4);
        assert_eq!(executor.log[0], a_id);
        assert_eq!(executor.log[3], d_id);
    }

    #[test]
    fn skippable_tasks_are_counted_not_executed() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task();
        let a_id = graph.unique_id(a);
        let b = graph.add_task();
        graph.make_closed(b);
        graph.make_skippable(b);

        let mut executor = RecordingExecutor::default();
        let summary = graph
            .flush(&mut executor, &mut Tracer::none())
            .unwrap();
        assert_eq!(executor.log, &[a_id]);
        assert_eq!(summary.executed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(graph.task_count(), 0, "skipped tasks are drained too");
    }

    #[test]
    fn cycle_aborts_before_any_execution() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task();
        let b = graph.add_task();
        graph.add_task_dependency(b, a);
        // Simulate a recording bug through raw state.
        graph.dependencies[a.index() as usize].push(b.index());
        graph.dependents[b.index() as usize].push(a.index());

        let mut executor = RecordingExecutor::default();
        let err = graph.flush(&mut executor, &mut Tracer::none());
        assert!(err.is_err());
        assert!(executor.log.is_empty(), "nothing runs on a cyclic graph");
    }

    #[test]
    fn graph_is_reusable_after_flush() {
        let mut graph = TaskGraph::new();
        let _ = graph.add_task();
        let mut executor = RecordingExecutor::default();
        graph.flush(&mut executor, &mut Tracer::none()).unwrap();

        let surface = TargetId(9);
        let t = graph.add_task();
        graph.add_target(t, surface);
        assert_eq!(graph.last_writer(surface), Some(t));
        let summary = graph
            .flush(&mut executor, &mut Tracer::none())
            .unwrap();
        assert_eq!(summary.executed, 1);
    }
}
