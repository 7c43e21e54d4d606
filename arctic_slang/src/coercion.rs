// Copyright 2026 the Arctic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed coercion cost values for overload ranking.

use core::cmp::Ordering;

/// Cost of converting one type to another, packed into a single word.
///
/// The low 32 bits hold the normal (widening) cost, the high 32 bits the
/// narrowing cost, and the sign bit of both halves set at once marks an
/// impossible conversion. The packing makes the common comparisons cheap
/// while preserving the ranking rule: impossible loses to everything, and
/// any narrowing outweighs any amount of normal cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoercionCost(u64);

const IMPOSSIBLE_BITS: u64 = 0x8000_0000_8000_0000;
/// Per-half ceiling; costs saturate here so sums never reach the sign bits.
const HALF_MAX: u32 = 0x7FFF_FFFF;

impl CoercionCost {
    /// No conversion needed.
    #[must_use]
    pub const fn free() -> Self {
        Self(0)
    }

    /// A widening (value-preserving) conversion of the given cost.
    ///
    /// # Panics
    ///
    /// Panics if `cost` overflows the 31-bit half.
    #[must_use]
    pub fn normal(cost: u32) -> Self {
        assert!(cost <= HALF_MAX, "normal cost overflows its half");
        Self(u64::from(cost))
    }

    /// A narrowing (possibly lossy) conversion of the given cost.
    ///
    /// # Panics
    ///
    /// Panics if `cost` overflows the 31-bit half.
    #[must_use]
    pub fn narrowing(cost: u32) -> Self {
        assert!(cost <= HALF_MAX, "narrowing cost overflows its half");
        Self(u64::from(cost) << 32)
    }

    /// The conversion cannot be performed.
    #[must_use]
    pub const fn impossible() -> Self {
        Self(IMPOSSIBLE_BITS)
    }

    /// Whether this is the impossible marker.
    #[must_use]
    pub const fn is_impossible(self) -> bool {
        self.0 & IMPOSSIBLE_BITS != 0
    }

    /// Normal (widening) half of the cost.
    #[must_use]
    pub const fn normal_cost(self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "extracting the low half is the point"
        )]
        let low = self.0 as u32;
        low
    }

    /// Narrowing half of the cost.
    #[must_use]
    pub const fn narrowing_cost(self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "extracting the high half is the point"
        )]
        let high = (self.0 >> 32) as u32;
        high
    }

    /// Whether the conversion can be performed at all, optionally ruling
    /// out narrowing conversions.
    #[must_use]
    pub const fn is_possible(self, allow_narrowing: bool) -> bool {
        !self.is_impossible() && (allow_narrowing || self.narrowing_cost() == 0)
    }

    /// Combines two conversion steps into one cost.
    ///
    /// Impossible propagates; otherwise the halves add, saturating below
    /// the impossible sign bits.
    #[must_use]
    pub fn concat(self, other: Self) -> Self {
        if self.is_impossible() || other.is_impossible() {
            return Self::impossible();
        }
        let normal = self
            .normal_cost()
            .saturating_add(other.normal_cost())
            .min(HALF_MAX);
        let narrowing = self
            .narrowing_cost()
            .saturating_add(other.narrowing_cost())
            .min(HALF_MAX);
        Self(u64::from(normal) | (u64::from(narrowing) << 32))
    }
}

impl Ord for CoercionCost {
    fn cmp(&self, other: &Self) -> Ordering {
        // Impossible first, then narrowing, then normal.
        (
            self.is_impossible(),
            self.narrowing_cost(),
            self.normal_cost(),
        )
            .cmp(&(
                other.is_impossible(),
                other.narrowing_cost(),
                other.normal_cost(),
            ))
    }
}

impl PartialOrd for CoercionCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
