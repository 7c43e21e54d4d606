// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform block layout and binary staging.
//!
//! GPU uniform blocks have rigid layout rules (std140/std430) that differ
//! from host struct layout. This crate splits the problem in two:
//!
//! **[`layout`]** — pure layout arithmetic: per-kind alignment masks and
//! sizes, aligned offsets, array strides, and a [`LayoutBuilder`] that
//! assigns offsets to a sequence of uniforms and packs each one into a slot
//! word (byte offset in the low 24 bits, kind tag in the high 8).
//!
//! **[`manager`]** — the [`UniformDataManager`](manager::UniformDataManager)
//! staging buffer: typed setters write host values into a zeroed, 8-byte
//! aligned byte buffer at the slot offsets, flip a single whole-buffer dirty
//! flag, and expose the bytes for upload.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod layout;
pub mod manager;

pub use layout::{BlockLayout, LayoutBuilder, UniformBlock, UniformHandle, UniformKind};
pub use manager::UniformDataManager;
