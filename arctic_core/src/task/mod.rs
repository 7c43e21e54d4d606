// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-task storage and identity.
//!
//! Tasks live in a [`TaskGraph`]: struct-of-arrays storage addressed by
//! generational [`TaskHandle`]s, with a packed per-task state word holding
//! lifecycle flags and the sort-assigned index. Each task additionally
//! carries a process-unique [`TaskId`] that survives slot reuse.

mod id;
mod store;

pub use id::{TargetId, TaskHandle, TaskId};
pub use store::TaskGraph;
