// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Staging buffer for uniform writes.

use alloc::vec;
use alloc::vec::Vec;

use crate::layout::{OFFSET_MASK, UniformBlock, UniformHandle, UniformKind};

/// Floats per staged array element: scalars and vectors stride by one vec4.
const ELEMENT_STRIDE: usize = 4;

/// Owns the CPU-side staging memory for one uniform block.
///
/// Typed setters write host values at the offsets the block layout assigned
/// and set a single whole-buffer dirty flag; there is no per-uniform
/// tracking and no redundancy elimination. `bytes()` exposes the staged
/// contents for upload, after which the caller clears the flag.
///
/// Array setters and matrix columns follow std140 striding: one vec4 (16
/// bytes) per array element, one padded column per matrix column (8 floats
/// for 2x2, 12 for 3x3, 16 for 4x4).
///
/// Kind checks on every setter are debug-only; release builds trust the
/// caller, as staged writes sit on the per-draw hot path.
#[derive(Debug)]
pub struct UniformDataManager {
    slots: Vec<u32>,
    size: u32,
    // u64 words keep the staging memory 8-byte aligned for the caller's
    // upload path; setters view it as f32/i32 words.
    words: Vec<u64>,
    dirty: bool,
}

impl UniformDataManager {
    /// Creates a zeroed staging buffer for `block`.
    ///
    /// # Panics
    ///
    /// Panics if the block is smaller than 4 bytes or its size is not
    /// 4-byte aligned. (An empty block cannot leave
    /// [`LayoutBuilder`](crate::layout::LayoutBuilder) in the first place.)
    #[must_use]
    pub fn new(block: UniformBlock) -> Self {
        assert!(block.size >= 4, "uniform block must hold at least one word");
        assert!(
            block.size % 4 == 0,
            "uniform block size must be 4-byte aligned"
        );
        assert!(
            !block.slots.is_empty(),
            "uniform block must declare at least one uniform"
        );
        let words = vec![0_u64; block.size.div_ceil(8) as usize];
        Self {
            slots: block.slots,
            size: block.size,
            words,
            dirty: false,
        }
    }

    /// Total block size in bytes.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Whether any uniform was written since the last
    /// [`clear_dirty`](Self::clear_dirty).
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Acknowledges an upload; the next write dirties the buffer again.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// The staged block contents, ready for upload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &bytemuck::cast_slice(&self.words)[..self.size as usize]
    }

    // -- Scalar/vector setters --

    /// Writes an int/uint/bool uniform.
    pub fn set1i(&mut self, u: UniformHandle, v0: i32) {
        let base = self.base_word(u, UniformKind::Int);
        self.int_words()[base] = v0;
        self.dirty = true;
    }

    /// Writes an int2 uniform.
    pub fn set2i(&mut self, u: UniformHandle, v0: i32, v1: i32) {
        let base = self.base_word(u, UniformKind::Int2);
        self.int_words()[base..base + 2].copy_from_slice(&[v0, v1]);
        self.dirty = true;
    }

    /// Writes an int3 uniform.
    pub fn set3i(&mut self, u: UniformHandle, v0: i32, v1: i32, v2: i32) {
        let base = self.base_word(u, UniformKind::Int3);
        self.int_words()[base..base + 3].copy_from_slice(&[v0, v1, v2]);
        self.dirty = true;
    }

    /// Writes an int4 uniform.
    pub fn set4i(&mut self, u: UniformHandle, v0: i32, v1: i32, v2: i32, v3: i32) {
        let base = self.base_word(u, UniformKind::Int4);
        self.int_words()[base..base + 4].copy_from_slice(&[v0, v1, v2, v3]);
        self.dirty = true;
    }

    /// Writes a float uniform.
    pub fn set1f(&mut self, u: UniformHandle, v0: f32) {
        let base = self.base_word(u, UniformKind::Float);
        self.float_words()[base] = v0;
        self.dirty = true;
    }

    /// Writes a float2 uniform.
    pub fn set2f(&mut self, u: UniformHandle, v0: f32, v1: f32) {
        let base = self.base_word(u, UniformKind::Float2);
        self.float_words()[base..base + 2].copy_from_slice(&[v0, v1]);
        self.dirty = true;
    }

    /// Writes a float3 uniform.
    pub fn set3f(&mut self, u: UniformHandle, v0: f32, v1: f32, v2: f32) {
        let base = self.base_word(u, UniformKind::Float3);
        self.float_words()[base..base + 3].copy_from_slice(&[v0, v1, v2]);
        self.dirty = true;
    }

    /// Writes a float4 uniform.
    pub fn set4f(&mut self, u: UniformHandle, v0: f32, v1: f32, v2: f32, v3: f32) {
        let base = self.base_word(u, UniformKind::Float4);
        self.float_words()[base..base + 4].copy_from_slice(&[v0, v1, v2, v3]);
        self.dirty = true;
    }

    // -- Array setters (one vec4 stride per element) --

    /// Writes consecutive float array elements, one value per element.
    pub fn set1fv(&mut self, u: UniformHandle, values: &[f32]) {
        self.set_float_elements(u, UniformKind::Float, 1, values);
    }

    /// Writes consecutive float2 array elements; `values` holds 2 floats
    /// per element.
    pub fn set2fv(&mut self, u: UniformHandle, values: &[f32]) {
        self.set_float_elements(u, UniformKind::Float2, 2, values);
    }

    /// Writes consecutive float3 array elements; `values` holds 3 floats
    /// per element.
    pub fn set3fv(&mut self, u: UniformHandle, values: &[f32]) {
        self.set_float_elements(u, UniformKind::Float3, 3, values);
    }

    /// Writes consecutive float4 array elements; `values` holds 4 floats
    /// per element.
    pub fn set4fv(&mut self, u: UniformHandle, values: &[f32]) {
        self.set_float_elements(u, UniformKind::Float4, 4, values);
    }

    /// Writes consecutive int array elements, one value per element.
    pub fn set1iv(&mut self, u: UniformHandle, values: &[i32]) {
        self.set_int_elements(u, UniformKind::Int, 1, values);
    }

    /// Writes consecutive int2 array elements; 2 ints per element.
    pub fn set2iv(&mut self, u: UniformHandle, values: &[i32]) {
        self.set_int_elements(u, UniformKind::Int2, 2, values);
    }

    /// Writes consecutive int3 array elements; 3 ints per element.
    pub fn set3iv(&mut self, u: UniformHandle, values: &[i32]) {
        self.set_int_elements(u, UniformKind::Int3, 3, values);
    }

    /// Writes consecutive int4 array elements; 4 ints per element.
    pub fn set4iv(&mut self, u: UniformHandle, values: &[i32]) {
        self.set_int_elements(u, UniformKind::Int4, 4, values);
    }

    // -- Matrix setters (column-major, padded columns) --

    /// Writes a 2x2 matrix; columns land on vec4 boundaries.
    pub fn set_matrix2f(&mut self, u: UniformHandle, m: &[f32; 4]) {
        let base = self.base_word(u, UniformKind::Matrix2);
        self.write_matrix(base, 2, m);
        self.dirty = true;
    }

    /// Writes a 3x3 matrix; columns land on vec4 boundaries, the fourth
    /// float of each column is untouched.
    pub fn set_matrix3f(&mut self, u: UniformHandle, m: &[f32; 9]) {
        let base = self.base_word(u, UniformKind::Matrix3);
        self.write_matrix(base, 3, m);
        self.dirty = true;
    }

    /// Writes a 4x4 matrix contiguously.
    pub fn set_matrix4f(&mut self, u: UniformHandle, m: &[f32; 16]) {
        let base = self.base_word(u, UniformKind::Matrix4);
        self.write_matrix(base, 4, m);
        self.dirty = true;
    }

    /// Writes consecutive 2x2 matrices; `values` holds 4 floats per matrix.
    pub fn set_matrix2fv(&mut self, u: UniformHandle, values: &[f32]) {
        self.set_matrix_elements(u, UniformKind::Matrix2, 2, values);
    }

    /// Writes consecutive 3x3 matrices; `values` holds 9 floats per matrix.
    pub fn set_matrix3fv(&mut self, u: UniformHandle, values: &[f32]) {
        self.set_matrix_elements(u, UniformKind::Matrix3, 3, values);
    }

    /// Writes consecutive 4x4 matrices; `values` holds 16 floats per matrix.
    pub fn set_matrix4fv(&mut self, u: UniformHandle, values: &[f32]) {
        self.set_matrix_elements(u, UniformKind::Matrix4, 4, values);
    }

    // -- Internal --

    fn set_float_elements(
        &mut self,
        u: UniformHandle,
        kind: UniformKind,
        arity: usize,
        values: &[f32],
    ) {
        assert!(
            values.len() % arity == 0,
            "value count must be a multiple of the uniform arity"
        );
        let base = self.base_word(u, kind);
        let words = self.float_words();
        for (element, chunk) in values.chunks_exact(arity).enumerate() {
            let at = base + element * ELEMENT_STRIDE;
            words[at..at + arity].copy_from_slice(chunk);
        }
        self.dirty = true;
    }

    fn set_int_elements(
        &mut self,
        u: UniformHandle,
        kind: UniformKind,
        arity: usize,
        values: &[i32],
    ) {
        assert!(
            values.len() % arity == 0,
            "value count must be a multiple of the uniform arity"
        );
        let base = self.base_word(u, kind);
        let words = self.int_words();
        for (element, chunk) in values.chunks_exact(arity).enumerate() {
            let at = base + element * ELEMENT_STRIDE;
            words[at..at + arity].copy_from_slice(chunk);
        }
        self.dirty = true;
    }

    fn set_matrix_elements(
        &mut self,
        u: UniformHandle,
        kind: UniformKind,
        order: usize,
        values: &[f32],
    ) {
        assert!(
            values.len() % (order * order) == 0,
            "value count must be a multiple of the matrix element count"
        );
        let base = self.base_word(u, kind);
        let matrix_stride = order * ELEMENT_STRIDE;
        for (element, chunk) in values.chunks_exact(order * order).enumerate() {
            self.write_matrix(base + element * matrix_stride, order, chunk);
        }
        self.dirty = true;
    }

    /// Copies `order` columns of `order` floats each to vec4-strided
    /// destinations starting at float word `base`.
    fn write_matrix(&mut self, base: usize, order: usize, values: &[f32]) {
        let words = self.float_words();
        for col in 0..order {
            let src = col * order;
            let dst = base + col * ELEMENT_STRIDE;
            words[dst..dst + order].copy_from_slice(&values[src..src + order]);
        }
    }

    /// Resolves the slot's byte offset to a 4-byte word index, checking the
    /// kind tag in debug builds.
    fn base_word(&self, u: UniformHandle, expected: UniformKind) -> usize {
        let slot = self.slots[u.index() as usize];
        debug_assert!(
            UniformKind::from_tag(slot >> 24) == expected,
            "uniform kind mismatch: slot holds {:?}, setter expects {expected:?}",
            UniformKind::from_tag(slot >> 24),
        );
        ((slot & OFFSET_MASK) / 4) as usize
    }

    fn float_words(&mut self) -> &mut [f32] {
        bytemuck::cast_slice_mut(&mut self.words)
    }

    fn int_words(&mut self) -> &mut [i32] {
        bytemuck::cast_slice_mut(&mut self.words)
    }
}
