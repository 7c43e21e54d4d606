// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! std140/std430 layout arithmetic and the packed slot table.

use alloc::vec::Vec;
use core::fmt;

/// Byte offsets occupy the low 24 bits of a slot word; the kind tag sits in
/// the high 8 bits.
const OFFSET_BITS: u32 = 24;
pub(crate) const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;

/// Settable uniform categories.
///
/// Integer kinds cover signed, unsigned, and boolean uniforms; they share
/// size and alignment. Matrices are square and column-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformKind {
    /// 32-bit float scalar.
    Float,
    /// 2-component float vector.
    Float2,
    /// 3-component float vector.
    Float3,
    /// 4-component float vector.
    Float4,
    /// 32-bit integer scalar (also uint/bool).
    Int,
    /// 2-component integer vector.
    Int2,
    /// 3-component integer vector.
    Int3,
    /// 4-component integer vector.
    Int4,
    /// 2x2 float matrix.
    Matrix2,
    /// 3x3 float matrix.
    Matrix3,
    /// 4x4 float matrix.
    Matrix4,
}

impl UniformKind {
    pub(crate) const fn tag(self) -> u32 {
        match self {
            Self::Float => 0,
            Self::Float2 => 1,
            Self::Float3 => 2,
            Self::Float4 => 3,
            Self::Int => 4,
            Self::Int2 => 5,
            Self::Int3 => 6,
            Self::Int4 => 7,
            Self::Matrix2 => 8,
            Self::Matrix3 => 9,
            Self::Matrix4 => 10,
        }
    }

    pub(crate) fn from_tag(tag: u32) -> Self {
        match tag {
            0 => Self::Float,
            1 => Self::Float2,
            2 => Self::Float3,
            3 => Self::Float4,
            4 => Self::Int,
            5 => Self::Int2,
            6 => Self::Int3,
            7 => Self::Int4,
            8 => Self::Matrix2,
            9 => Self::Matrix3,
            10 => Self::Matrix4,
            _ => panic!("invalid uniform kind tag {tag}"),
        }
    }
}

/// Which GPU buffer layout standard governs offsets and strides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockLayout {
    /// Uniform buffer layout: array elements and mat2 round up to 16 bytes.
    Std140,
    /// Storage buffer layout: tighter scalar/vec2/mat2 packing.
    Std430,
}

/// Alignment mask for a uniform of `kind`.
///
/// The returned mask has the low bits set: aligning is
/// `(offset + mask) & !mask`. Scalars and 2-component vectors lose their
/// natural alignment inside std140 arrays, where every element aligns to
/// 16 bytes.
#[must_use]
pub const fn alignment_mask(kind: UniformKind, non_array: bool, layout: BlockLayout) -> u32 {
    let std430 = matches!(layout, BlockLayout::Std430);
    match kind {
        UniformKind::Float | UniformKind::Int => {
            if std430 || non_array {
                0x3
            } else {
                0xF
            }
        }
        UniformKind::Float2 | UniformKind::Int2 => {
            if std430 || non_array {
                0x7
            } else {
                0xF
            }
        }
        UniformKind::Matrix2 => {
            if std430 {
                0x7
            } else {
                0xF
            }
        }
        UniformKind::Float3
        | UniformKind::Float4
        | UniformKind::Int3
        | UniformKind::Int4
        | UniformKind::Matrix3
        | UniformKind::Matrix4 => 0xF,
    }
}

/// Byte size of a single uniform of `kind` under `layout`.
///
/// Matrix sizes include column padding: each column of a 2x2 matrix pads to
/// 16 bytes under std140 (and to 8 under std430); 3x3 columns always pad to
/// 16 bytes.
#[must_use]
pub const fn byte_size(kind: UniformKind, layout: BlockLayout) -> u32 {
    match kind {
        UniformKind::Float | UniformKind::Int => 4,
        UniformKind::Float2 | UniformKind::Int2 => 8,
        UniformKind::Float3 | UniformKind::Int3 => 12,
        UniformKind::Float4 | UniformKind::Int4 => 16,
        UniformKind::Matrix2 => match layout {
            BlockLayout::Std430 => 16,
            BlockLayout::Std140 => 32,
        },
        UniformKind::Matrix3 => 48,
        UniformKind::Matrix4 => 64,
    }
}

/// Aligns `offset` up for a uniform of `kind`, with `array_count` of `None`
/// for non-array uniforms.
#[must_use]
pub const fn aligned_offset(
    offset: u32,
    kind: UniformKind,
    array_count: Option<u32>,
    layout: BlockLayout,
) -> u32 {
    let mask = alignment_mask(kind, array_count.is_none(), layout);
    (offset + mask) & !mask
}

/// Total byte stride a uniform occupies starting at its aligned offset.
///
/// Non-arrays occupy their size. std430 arrays pack elements at their size;
/// std140 arrays round each element up to 16 bytes.
#[must_use]
pub const fn aligned_stride(
    kind: UniformKind,
    array_count: Option<u32>,
    layout: BlockLayout,
) -> u32 {
    let one = byte_size(kind, layout);
    match array_count {
        None => one,
        Some(count) => {
            let element = match layout {
                BlockLayout::Std430 => one,
                BlockLayout::Std140 => {
                    if one < 16 {
                        16
                    } else {
                        one
                    }
                }
            };
            element * count
        }
    }
}

/// Index of a uniform within a [`UniformBlock`]'s slot table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformHandle(pub(crate) u32);

impl UniformHandle {
    /// Returns the slot-table index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for UniformHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniformHandle({})", self.0)
    }
}

/// A finished block layout: packed slot words plus the total byte size.
#[derive(Clone, Debug)]
pub struct UniformBlock {
    pub(crate) slots: Vec<u32>,
    pub(crate) size: u32,
}

impl UniformBlock {
    /// Packed slot words, one per uniform in declaration order.
    #[must_use]
    pub fn slots(&self) -> &[u32] {
        &self.slots
    }

    /// Total block size in bytes.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Byte offset of the given uniform.
    #[must_use]
    pub fn offset(&self, u: UniformHandle) -> u32 {
        self.slots[u.0 as usize] & OFFSET_MASK
    }

    /// Kind of the given uniform.
    #[must_use]
    pub fn kind(&self, u: UniformHandle) -> UniformKind {
        UniformKind::from_tag(self.slots[u.0 as usize] >> OFFSET_BITS)
    }
}

/// Assigns aligned offsets to a sequence of uniforms.
#[derive(Debug)]
pub struct LayoutBuilder {
    layout: BlockLayout,
    slots: Vec<u32>,
    cursor: u32,
}

impl LayoutBuilder {
    /// Starts an empty block under the given layout standard.
    #[must_use]
    pub const fn new(layout: BlockLayout) -> Self {
        Self {
            layout,
            slots: Vec::new(),
            cursor: 0,
        }
    }

    /// Appends a non-array uniform and returns its handle.
    pub fn push(&mut self, kind: UniformKind) -> UniformHandle {
        self.append(kind, None)
    }

    /// Appends an array uniform of `count` elements and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if `count` is 0.
    pub fn push_array(&mut self, kind: UniformKind, count: u32) -> UniformHandle {
        assert!(count != 0, "array uniform needs at least one element");
        self.append(kind, Some(count))
    }

    fn append(&mut self, kind: UniformKind, array_count: Option<u32>) -> UniformHandle {
        let offset = aligned_offset(self.cursor, kind, array_count, self.layout);
        assert!(
            offset <= OFFSET_MASK,
            "uniform block exceeds the 24-bit offset field"
        );
        self.cursor = offset + aligned_stride(kind, array_count, self.layout);

        #[expect(
            clippy::cast_possible_truncation,
            reason = "the offset field bounds the slot count long before u32::MAX"
        )]
        let handle = UniformHandle(self.slots.len() as u32);
        self.slots.push(offset | (kind.tag() << OFFSET_BITS));
        handle
    }

    /// Current end-of-block cursor in bytes.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.cursor
    }

    /// Finishes the block.
    ///
    /// # Panics
    ///
    /// Panics if no uniform was declared.
    #[must_use]
    pub fn finish(self) -> UniformBlock {
        assert!(
            !self.slots.is_empty(),
            "uniform block must declare at least one uniform"
        );
        UniformBlock {
            slots: self.slots,
            size: self.cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_then_vec4_pads_to_vector_alignment() {
        let mut b = LayoutBuilder::new(BlockLayout::Std140);
        let s = b.push(UniformKind::Float);
        let v = b.push(UniformKind::Float4);
        let block = b.finish();
        assert_eq!(block.offset(s), 0);
        assert_eq!(block.offset(v), 16, "vec4 aligns to 16");
        assert_eq!(block.size(), 32);
    }

    #[test]
    fn vec3_aligns_like_vec4_but_sizes_to_12() {
        let mut b = LayoutBuilder::new(BlockLayout::Std140);
        let v3 = b.push(UniformKind::Float3);
        let s = b.push(UniformKind::Float);
        let block = b.finish();
        assert_eq!(block.offset(v3), 0);
        assert_eq!(block.offset(s), 12, "scalar packs into vec3 tail padding");
        assert_eq!(block.size(), 16);
    }

    #[test]
    fn std140_scalar_array_strides_by_16() {
        let mut b = LayoutBuilder::new(BlockLayout::Std140);
        let a = b.push_array(UniformKind::Float, 3);
        let tail = b.push(UniformKind::Float);
        let block = b.finish();
        assert_eq!(block.offset(a), 0);
        assert_eq!(block.offset(tail), 48, "three 16-byte elements");
    }

    #[test]
    fn std430_scalar_array_packs_tight() {
        let mut b = LayoutBuilder::new(BlockLayout::Std430);
        let a = b.push_array(UniformKind::Float, 3);
        let tail = b.push(UniformKind::Float);
        let block = b.finish();
        assert_eq!(block.offset(a), 0);
        assert_eq!(block.offset(tail), 12);
    }

    #[test]
    fn matrix2_differs_between_layouts() {
        assert_eq!(byte_size(UniformKind::Matrix2, BlockLayout::Std140), 32);
        assert_eq!(byte_size(UniformKind::Matrix2, BlockLayout::Std430), 16);
        assert_eq!(
            alignment_mask(UniformKind::Matrix2, true, BlockLayout::Std140),
            0xF
        );
        assert_eq!(
            alignment_mask(UniformKind::Matrix2, true, BlockLayout::Std430),
            0x7
        );
    }

    #[test]
    fn matrix3_spans_three_padded_columns() {
        let mut b = LayoutBuilder::new(BlockLayout::Std140);
        let m = b.push(UniformKind::Matrix3);
        let tail = b.push(UniformKind::Float);
        let block = b.finish();
        assert_eq!(block.offset(m), 0);
        assert_eq!(block.offset(tail), 48);
    }

    #[test]
    fn slot_word_packs_offset_and_tag() {
        let mut b = LayoutBuilder::new(BlockLayout::Std140);
        let _ = b.push(UniformKind::Float4);
        let m = b.push(UniformKind::Matrix4);
        let block = b.finish();
        assert_eq!(block.kind(m), UniformKind::Matrix4);
        assert_eq!(block.offset(m), 16);
        let word = block.slots()[m.index() as usize];
        assert_eq!(word & OFFSET_MASK, 16);
        assert_eq!(word >> 24, UniformKind::Matrix4.tag());
    }

    #[test]
    #[should_panic(expected = "at least one uniform")]
    fn empty_block_panics() {
        let _ = LayoutBuilder::new(BlockLayout::Std140).finish();
    }

    #[test]
    #[should_panic(expected = "at least one element")]
    fn zero_length_array_panics() {
        let mut b = LayoutBuilder::new(BlockLayout::Std140);
        let _ = b.push_array(UniformKind::Float, 0);
    }
}
