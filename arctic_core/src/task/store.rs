// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays task storage with lifecycle, dependency, and sort state.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use super::id::{TargetId, TaskHandle, TaskId};
use crate::sort::SortAccess;

// Lifecycle flag bits of the packed state word. Bits 6.. hold the
// sort-assigned index once IN_RESULT is set.
pub(crate) const CLOSED: u32 = 1 << 0;
pub(crate) const DETACHED: u32 = 1 << 1;
pub(crate) const SKIPPABLE: u32 = 1 << 2;
pub(crate) const ATLAS: u32 = 1 << 3;
pub(crate) const IN_RESULT: u32 = 1 << 4;
pub(crate) const TEMP_MARK: u32 = 1 << 5;

const INDEX_SHIFT: u32 = 6;
/// Exclusive ceiling for sort indices; 26 index bits remain above the flags.
pub(crate) const MAX_SORT_INDEX: u32 = 1 << 26;

/// Struct-of-arrays storage for all recorded render tasks.
///
/// Tasks are addressed by [`TaskHandle`] handles. Internally, each task
/// occupies a slot in parallel arrays. Destroyed tasks are recycled via a
/// free list, and generation counters prevent stale handle access.
///
/// The graph also owns the last-writer map: for every [`TargetId`] it
/// remembers the most recent task recorded against that surface, which is
/// how [`add_dependency`](Self::add_dependency) resolves read-after-write
/// edges.
#[derive(Debug, Default)]
pub struct TaskGraph {
    // -- Per-task state --
    pub(crate) unique_id: Vec<TaskId>,
    pub(crate) state: Vec<u32>,
    pub(crate) dependencies: Vec<Vec<u32>>,
    pub(crate) dependents: Vec<Vec<u32>>,
    pub(crate) targets: Vec<Vec<TargetId>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Recording --
    pub(crate) order: Vec<u32>,
    pub(crate) last_writer: BTreeMap<TargetId, u32>,
}

impl TaskGraph {
    /// Creates an empty task graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Allocation API --

    /// Records a new open task and returns its handle.
    ///
    /// The task starts open (not closed), with no targets and no edges, and
    /// receives a fresh process-unique [`TaskId`].
    pub fn add_task(&mut self) -> TaskHandle {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.unique_id[idx as usize] = TaskId::next();
            self.state[idx as usize] = 0;
            self.dependencies[idx as usize].clear();
            self.dependents[idx as usize].clear();
            self.targets[idx as usize].clear();
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.unique_id.push(TaskId::next());
            self.state.push(0);
            self.dependencies.push(Vec::new());
            self.dependents.push(Vec::new());
            self.targets.push(Vec::new());
            self.generation.push(0);
            idx
        };

        self.order.push(idx);

        TaskHandle {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a task, freeing its slot for reuse.
    ///
    /// Edges are unlinked in both directions first, so surviving tasks
    /// never hold an edge to the freed slot and a later occupant of the
    /// slot inherits none.
    ///
    /// # Panics
    ///
    /// Panics if the task is still attached (detach it first) or if the
    /// handle is stale.
    pub fn destroy(&mut self, task: TaskHandle) {
        self.validate(task);
        let dependencies = core::mem::take(&mut self.dependencies[task.idx as usize]);
        for dependency in dependencies {
            self.dependents[dependency as usize].retain(|&idx| idx != task.idx);
        }
        let dependents = core::mem::take(&mut self.dependents[task.idx as usize]);
        for dependent in dependents {
            self.dependencies[dependent as usize].retain(|&idx| idx != task.idx);
        }
        self.release_slot(task.idx);
        self.order.retain(|&idx| idx != task.idx);
    }

    /// Returns whether the given handle refers to a live task.
    #[must_use]
    pub fn is_alive(&self, task: TaskHandle) -> bool {
        (task.idx < self.len)
            && self.generation[task.idx as usize] == task.generation
            && !self.free_list.contains(&task.idx)
    }

    /// Number of live tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.order.len()
    }

    /// Live task handles in recorded order.
    pub fn live_tasks(&self) -> impl Iterator<Item = TaskHandle> + '_ {
        self.order.iter().map(|&idx| self.handle_at(idx))
    }

    // -- Recording API --

    /// Process-unique ID of the task.
    #[must_use]
    pub fn unique_id(&self, task: TaskHandle) -> TaskId {
        self.validate(task);
        self.unique_id[task.idx as usize]
    }

    /// Target surfaces the task writes, in the order they were added.
    #[must_use]
    pub fn targets(&self, task: TaskHandle) -> &[TargetId] {
        self.validate(task);
        &self.targets[task.idx as usize]
    }

    /// Records `target` as written by `task` and makes `task` the target's
    /// last writer.
    ///
    /// # Panics
    ///
    /// Panics if the task is closed or the handle is stale.
    pub fn add_target(&mut self, task: TaskHandle, target: TargetId) {
        self.validate(task);
        assert!(
            !self.is_closed(task),
            "cannot add a target to a closed task"
        );
        self.targets[task.idx as usize].push(target);
        self.last_writer.insert(target, task.idx);
    }

    /// The last task recorded as writing `target`, if any.
    #[must_use]
    pub fn last_writer(&self, target: TargetId) -> Option<TaskHandle> {
        self.last_writer.get(&target).map(|&idx| self.handle_at(idx))
    }

    /// Makes `task` depend on the last task writing `target`.
    ///
    /// No edge is recorded when the target has no writer, when the writer is
    /// `task` itself (a task reading its own output in the same pass is not
    /// a graph edge), or when the edge already exists. The writer is closed
    /// unless it carries the atlas flag: atlas tasks keep accepting work
    /// until the flush.
    ///
    /// # Panics
    ///
    /// Panics if `task` is closed or the handle is stale.
    pub fn add_dependency(&mut self, task: TaskHandle, target: TargetId) {
        self.validate(task);
        assert!(
            !self.is_closed(task),
            "cannot add a dependency to a closed task"
        );

        let Some(&writer) = self.last_writer.get(&target) else {
            return;
        };
        if writer == task.idx {
            return;
        }
        if self.dependencies[task.idx as usize].contains(&writer) {
            return;
        }

        if self.state[writer as usize] & ATLAS == 0 {
            self.state[writer as usize] |= CLOSED;
        }

        self.dependencies[task.idx as usize].push(writer);
        self.dependents[writer as usize].push(task.idx);
    }

    /// Makes `task` depend directly on `dependency`.
    ///
    /// Duplicate edges are skipped. A reverse edge already on record is a
    /// caller bug (it would seed a cycle) and is debug-asserted.
    ///
    /// # Panics
    ///
    /// Panics if `task` is closed, if `task` and `dependency` are the same
    /// task, or if either handle is stale.
    pub fn add_task_dependency(&mut self, task: TaskHandle, dependency: TaskHandle) {
        self.validate(task);
        self.validate(dependency);
        assert!(
            !self.is_closed(task),
            "cannot add a dependency to a closed task"
        );
        assert!(task.idx != dependency.idx, "task cannot depend on itself");
        debug_assert!(
            !self.dependencies[dependency.idx as usize].contains(&task.idx),
            "reverse edge already recorded"
        );

        if self.dependencies[task.idx as usize].contains(&dependency.idx) {
            return;
        }
        self.dependencies[task.idx as usize].push(dependency.idx);
        self.dependents[dependency.idx as usize].push(task.idx);
    }

    /// Whether `task` has a direct dependency edge to `other`.
    #[must_use]
    pub fn depends_on(&self, task: TaskHandle, other: TaskHandle) -> bool {
        self.validate(task);
        self.validate(other);
        self.dependencies[task.idx as usize].contains(&other.idx)
    }

    /// Direct dependencies of `task`, in recording order.
    pub fn dependencies(&self, task: TaskHandle) -> impl Iterator<Item = TaskHandle> + '_ {
        self.validate(task);
        self.dependencies[task.idx as usize]
            .iter()
            .map(|&idx| self.handle_at(idx))
    }

    /// Direct dependents of `task`, in recording order.
    pub fn dependents(&self, task: TaskHandle) -> impl Iterator<Item = TaskHandle> + '_ {
        self.validate(task);
        self.dependents[task.idx as usize]
            .iter()
            .map(|&idx| self.handle_at(idx))
    }

    // -- Lifecycle API --

    /// Closes the task; it accepts no further targets or dependencies.
    ///
    /// Closing an already-closed task is a no-op.
    pub fn make_closed(&mut self, task: TaskHandle) {
        self.validate(task);
        self.state[task.idx as usize] |= CLOSED;
    }

    /// Whether the task is closed.
    #[must_use]
    pub fn is_closed(&self, task: TaskHandle) -> bool {
        self.validate(task);
        self.state[task.idx as usize] & CLOSED != 0
    }

    /// Marks the task as contributing nothing, so the flush skips its
    /// execution while still honoring its position in the ordering.
    ///
    /// # Panics
    ///
    /// Panics if the task is not closed: skippability is decided when the
    /// task's recorded work is final.
    pub fn make_skippable(&mut self, task: TaskHandle) {
        self.validate(task);
        assert!(
            self.is_closed(task),
            "only a closed task can become skippable"
        );
        self.state[task.idx as usize] |= SKIPPABLE;
    }

    /// Whether the task's execution will be skipped.
    #[must_use]
    pub fn is_skippable(&self, task: TaskHandle) -> bool {
        self.validate(task);
        self.state[task.idx as usize] & SKIPPABLE != 0
    }

    /// Marks the task as an atlas task: it keeps accepting work after other
    /// tasks read its output, so [`add_dependency`](Self::add_dependency)
    /// does not close it.
    ///
    /// # Panics
    ///
    /// Panics if the task is already closed or the handle is stale.
    pub fn mark_atlas(&mut self, task: TaskHandle) {
        self.validate(task);
        assert!(!self.is_closed(task), "cannot mark a closed task as atlas");
        self.state[task.idx as usize] |= ATLAS;
    }

    /// Whether the task is an atlas task.
    #[must_use]
    pub fn is_atlas(&self, task: TaskHandle) -> bool {
        self.validate(task);
        self.state[task.idx as usize] & ATLAS != 0
    }

    /// Detaches the task from the graph's bookkeeping: it stops being the
    /// last writer of any target and becomes eligible for destruction.
    ///
    /// # Panics
    ///
    /// Panics if the task is not closed or the handle is stale.
    pub fn detach(&mut self, task: TaskHandle) {
        self.validate(task);
        assert!(self.is_closed(task), "cannot detach an open task");
        self.state[task.idx as usize] |= DETACHED;
        self.last_writer.retain(|_, &mut writer| writer != task.idx);
    }

    /// Whether the task is detached.
    #[must_use]
    pub fn is_detached(&self, task: TaskHandle) -> bool {
        self.validate(task);
        self.state[task.idx as usize] & DETACHED != 0
    }

    // -- Sort state --

    /// Sort index assigned by the most recent sort, or `None` if the task
    /// has not been placed.
    #[must_use]
    pub fn sort_index(&self, task: TaskHandle) -> Option<u32> {
        self.validate(task);
        self.result_index(task.idx)
    }

    /// Sorts the live tasks and returns their handles in dependency order.
    ///
    /// Sort state from a previous sort is cleared first, so the graph can be
    /// re-sorted as recording continues.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`](crate::sort::CycleError) if the dependency
    /// relation contains a cycle. The per-task sort state is left partially
    /// written; the graph is expected to be discarded.
    pub fn sorted_tasks(&mut self) -> Result<Vec<TaskHandle>, crate::sort::CycleError> {
        let mut slots = self.order.clone();
        for &idx in &slots {
            // Keep the lifecycle flags, clear IN_RESULT, TEMP_MARK, and the
            // index bits.
            self.state[idx as usize] &= CLOSED | DETACHED | SKIPPABLE | ATLAS;
        }
        crate::sort::topological_sort(&mut slots, self)?;
        Ok(slots.iter().map(|&idx| self.handle_at(idx)).collect())
    }

    // -- Internal --

    pub(crate) fn handle_at(&self, idx: u32) -> TaskHandle {
        TaskHandle {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Frees the slot without touching the recorded order.
    ///
    /// Panics if the task is still attached.
    pub(crate) fn release_slot(&mut self, idx: u32) {
        assert!(
            self.state[idx as usize] & DETACHED != 0,
            "cannot destroy a task that is still attached"
        );
        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    #[track_caller]
    fn validate(&self, task: TaskHandle) {
        assert!(self.is_alive(task), "stale TaskHandle: {task:?}");
    }
}

impl SortAccess<u32> for TaskGraph {
    fn result_index(&self, node: u32) -> Option<u32> {
        let state = self.state[node as usize];
        (state & IN_RESULT != 0).then(|| state >> INDEX_SHIFT)
    }

    fn set_result_index(&mut self, node: u32, index: u32) {
        let state = &mut self.state[node as usize];
        assert!(*state & IN_RESULT == 0, "sort index assigned twice");
        assert!(index < MAX_SORT_INDEX, "sort index exceeds the 26-bit field");
        *state |= (index << INDEX_SHIFT) | IN_RESULT;
    }

    fn is_temp_marked(&self, node: u32) -> bool {
        self.state[node as usize] & TEMP_MARK != 0
    }

    fn set_temp_marked(&mut self, node: u32, marked: bool) {
        if marked {
            self.state[node as usize] |= TEMP_MARK;
        } else {
            self.state[node as usize] &= !TEMP_MARK;
        }
    }

    fn edge_count(&self, node: u32) -> usize {
        self.dependencies[node as usize].len()
    }

    fn edge(&self, node: u32, nth: usize) -> u32 {
        self.dependencies[node as usize][nth]
    }
}
