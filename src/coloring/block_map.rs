//! The shared block candidate map for colors at or beyond the word width.
//!
//! One word per `WORD_BITS` half-edges of the working neighbor list. A heavy
//! vertex whose row starts at half-edge `beg` owns the words from
//! `beg / WORD_BITS + 1` onward, up to `(beg + degree) / WORD_BITS`; color
//! `c >= WORD_BITS` of that vertex lives in word `beg / WORD_BITS + c / WORD_BITS`
//! at bit `MSB >> (c % WORD_BITS)`. Rows of heavy vertices are at least one
//! word long, so the word ranges of two heavy vertices never overlap.
//!
//! Bits start set (available) and are only ever cleared.

use core::sync::atomic::Ordering;

use crate::{
    coloring::state::{color_bit, lowest_color, WORD_BITS},
    concurrency::atomic::GhostAtomicU64,
};

/// A branded, word-packed map of still-available high colors.
pub struct BlockCandidateMap<'brand> {
    words: Vec<GhostAtomicU64<'brand>>,
}

impl<'brand> BlockCandidateMap<'brand> {
    /// A map covering `half_edges` positions, every color available.
    pub fn new(half_edges: usize) -> Self {
        let words = (0..half_edges / WORD_BITS + 1)
            .map(|_| GhostAtomicU64::new(u64::MAX))
            .collect();
        Self { words }
    }

    /// Number of words.
    pub fn len_words(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    fn locate(&self, base: usize, color: usize) -> (&GhostAtomicU64<'brand>, u64) {
        (&self.words[base + color / WORD_BITS], color_bit(color % WORD_BITS))
    }

    /// Marks `color` as taken. Reads first so an already-clear bit costs no
    /// read-modify-write.
    #[inline]
    pub fn claim(&self, base: usize, color: usize) {
        let (word, bit) = self.locate(base, color);
        if word.load(Ordering::Relaxed) & bit != 0 {
            word.clear_bits(bit, Ordering::Relaxed);
        }
    }

    /// Lowest available color in words `base + from_block`, `base + from_block + 1`, ...
    ///
    /// The caller guarantees some color at or below its interval maximum is
    /// still set; that color is never claimed, so the scan stops inside the
    /// vertex's own words.
    #[inline]
    pub fn first_available(&self, base: usize, from_block: usize) -> usize {
        let mut block = from_block;
        loop {
            let word = self.words[base + block].load(Ordering::Relaxed);
            if word != 0 {
                return block * WORD_BITS + lowest_color(word);
            }
            block += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_one_word_past_the_edge_count() {
        assert_eq!(BlockCandidateMap::new(0).len_words(), 1);
        assert_eq!(BlockCandidateMap::new(63).len_words(), 1);
        assert_eq!(BlockCandidateMap::new(64).len_words(), 2);
        assert_eq!(BlockCandidateMap::new(200).len_words(), 4);
    }

    #[test]
    fn claims_are_visible_to_the_scan() {
        let map = BlockCandidateMap::new(4 * WORD_BITS);
        let base = 1;
        assert_eq!(map.first_available(base, 1), WORD_BITS);
        for c in WORD_BITS..WORD_BITS + 70 {
            map.claim(base, c);
        }
        assert_eq!(map.first_available(base, 1), WORD_BITS + 70);
        // claiming twice is harmless
        map.claim(base, WORD_BITS);
        assert_eq!(map.first_available(base, 2), WORD_BITS + 70);
    }
}
