// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shading-language IR type system and coercion cost model.
//!
//! **[`types`]** — the [`TypeTable`](types::TypeTable) arena: every type in
//! a compilation lives in one table and is addressed by a copyable
//! [`TypeId`](types::TypeId) handle. Types carry a display name plus a short
//! abbreviated name used for symbol mangling. Aliases resolve to their
//! targets, so `vec2` and `float2` compare equal.
//!
//! **[`builtin`]** — registers the standard module types (scalars with their
//! conversion ranks, vectors, matrices, GLSL-style aliases, literal types,
//! and the `__gen*` generic families) into a table.
//!
//! **[`coercion`]** — the packed [`CoercionCost`](coercion::CoercionCost)
//! value that overload ranking compares: normal cost in the low half,
//! narrowing cost in the high half, with a sign-bit pattern marking
//! impossible conversions. Any narrowing outweighs any amount of normal
//! cost.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod builtin;
pub mod coercion;
pub mod types;

pub use builtin::BuiltinTypes;
pub use coercion::CoercionCost;
pub use types::{ScalarKind, TypeId, TypeKind, TypeTable};
