// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Task and target identity types.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// A process-unique, nonzero task identity.
///
/// IDs are stable for the lifetime of the process and survive slot reuse in
/// the [`TaskGraph`](super::TaskGraph), which makes them suitable as cache
/// keys for recorded command state. The value 0 is reserved as an invalid
/// sentinel and is never allocated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u32);

static NEXT_TASK_ID: AtomicU32 = AtomicU32::new(1);

impl TaskId {
    /// Allocates the next unique ID.
    ///
    /// Lock-free: a compare-exchange retry loop increments the shared
    /// counter. On wraparound the counter skips 0, so concurrent callers
    /// never observe the invalid sentinel and never receive duplicates.
    #[must_use]
    pub fn next() -> Self {
        let mut current = NEXT_TASK_ID.load(Ordering::Relaxed);
        loop {
            let incremented = if current == u32::MAX { 1 } else { current + 1 };
            match NEXT_TASK_ID.compare_exchange_weak(
                current,
                incremented,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Self(current),
                Err(observed) => current = observed,
            }
        }
    }

    /// Returns the raw nonzero value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({})", self.0)
    }
}

/// A handle to a task in a [`TaskGraph`](super::TaskGraph).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a task is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    /// Slot index into the graph's arrays.
    pub(crate) idx: u32,
    /// Generation counter, must match the graph's generation for this slot.
    pub(crate) generation: u32,
}

impl TaskHandle {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskHandle({}@gen{})", self.idx, self.generation)
    }
}

/// An opaque reference to a target surface a task renders into.
///
/// Surfaces are created and managed externally (texture allocator, swapchain,
/// atlas manager). The graph only uses target identity to resolve the last
/// task writing a given surface when wiring dependency edges.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}
