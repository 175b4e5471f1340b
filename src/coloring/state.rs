//! Per-vertex color state and candidate-mask helpers.
//!
//! A color cell is one atomic word holding a [`ColorState`]. The packed form
//! puts the live range in the upper half and the minimum candidate color in
//! the lower half; a zero range is a resolved color. Nothing outside this
//! module sees the packed bits.
//!
//! Candidate masks put color `c` at bit `MSB >> c`, so the lowest available
//! color is `leading_zeros`.

use core::sync::atomic::Ordering;

use crate::concurrency::atomic::GhostAtomicU64;

/// Bits per machine word; also the heavy/light degree threshold.
pub const WORD_BITS: usize = u64::BITS as usize;

const HALF_BITS: u32 = u64::BITS / 2;
const HALF_MASK: u64 = (1 << HALF_BITS) - 1;
const MSB: u64 = 1 << (u64::BITS - 1);

/// Exclusive upper bound on a vertex's successor count.
pub const RANGE_LIMIT: usize = HALF_MASK as usize;

/// The logical content of a color cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorState {
    /// Final color.
    Resolved(u32),
    /// Still refining: the color will be one of `min..=min + range`.
    Pending {
        /// Smallest color still possible.
        min: u32,
        /// Number of candidates above `min`; never zero.
        range: u32,
    },
}

impl ColorState {
    /// `Pending { min, range }`, or `Resolved(min)` when `range == 0`.
    #[inline]
    pub const fn pending(min: u32, range: u32) -> Self {
        if range == 0 {
            Self::Resolved(min)
        } else {
            Self::Pending { min, range }
        }
    }

    /// The final color, if resolved.
    #[inline]
    pub const fn color(self) -> Option<u32> {
        match self {
            Self::Resolved(c) => Some(c),
            Self::Pending { .. } => None,
        }
    }

    #[inline(always)]
    const fn encode(self) -> u64 {
        match self {
            Self::Resolved(c) => c as u64,
            Self::Pending { min, range } => ((range as u64) << HALF_BITS) | min as u64,
        }
    }

    #[inline(always)]
    #[allow(clippy::cast_possible_truncation)]
    const fn decode(word: u64) -> Self {
        Self::pending((word & HALF_MASK) as u32, (word >> HALF_BITS) as u32)
    }
}

/// One vertex's color cell.
#[repr(transparent)]
pub struct ColorCell<'brand>(GhostAtomicU64<'brand>);

impl<'brand> ColorCell<'brand> {
    /// A cell holding `state`.
    #[inline]
    pub const fn new(state: ColorState) -> Self {
        Self(GhostAtomicU64::new(state.encode()))
    }

    /// Reads the whole state in one atomic load.
    #[inline(always)]
    pub fn load(&self) -> ColorState {
        ColorState::decode(self.0.load(Ordering::Acquire))
    }

    /// Replaces the whole state in one atomic store.
    #[inline(always)]
    pub fn store(&self, state: ColorState) {
        self.0.store(state.encode(), Ordering::Release);
    }

    /// Consumes the cell.
    #[inline]
    pub fn into_state(self) -> ColorState {
        ColorState::decode(self.0.into_inner())
    }
}

/// The single-bit mask of `color`. Requires `color < WORD_BITS`.
#[inline(always)]
pub const fn color_bit(color: usize) -> u64 {
    MSB >> color
}

/// Lowest color present in a non-empty `mask`.
#[inline(always)]
pub const fn lowest_color(mask: u64) -> usize {
    mask.leading_zeros() as usize
}

/// Initial candidate mask for a vertex with `range` successors: colors
/// `0..=range`, or every color of the word once that covers it.
#[inline]
pub const fn initial_candidates(range: usize) -> u64 {
    if range >= WORD_BITS - 1 {
        u64::MAX
    } else {
        !(u64::MAX >> (range + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_is_lossless_for_both_variants() {
        for state in [
            ColorState::Resolved(0),
            ColorState::Resolved(u32::MAX),
            ColorState::Pending { min: 0, range: 1 },
            ColorState::Pending { min: 77, range: u32::MAX },
        ] {
            assert_eq!(ColorCell::new(state).load(), state);
        }
    }

    #[test]
    fn zero_range_is_resolved() {
        assert_eq!(ColorState::pending(5, 0), ColorState::Resolved(5));
        assert_eq!(ColorState::pending(5, 0).color(), Some(5));
        assert_eq!(ColorState::pending(5, 2).color(), None);
    }

    #[test]
    fn candidate_masks_are_msb_first() {
        assert_eq!(initial_candidates(0), color_bit(0));
        assert_eq!(initial_candidates(2), color_bit(0) | color_bit(1) | color_bit(2));
        assert_eq!(initial_candidates(WORD_BITS - 2).count_ones() as usize, WORD_BITS - 1);
        assert_eq!(initial_candidates(WORD_BITS - 1), u64::MAX);
        assert_eq!(initial_candidates(10_000), u64::MAX);
        assert_eq!(lowest_color(color_bit(0) | color_bit(9)), 0);
        assert_eq!(lowest_color(color_bit(63)), 63);
    }
}
