// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! BitVector type for fixed-width sets of indices.
//!
//! A BitVector is a compact representation of a set of indices using a bitset,
//! where bit i represents the presence of index i. Unlike a plain integer mask
//! the width is chosen at runtime, since both the column count of a hypothesis
//! and the row count of a coverage vector depend on the input matrix.
//!
//! # Examples
//!
//! ```
//! use mhs_search::bits::BitVector;
//!
//! let mut set = BitVector::new(5);
//! set.insert(1);
//! set.insert(3);
//!
//! assert_eq!(set.count_ones(), 2);
//! assert_eq!(set.leftmost(), Some(1));
//! assert_eq!(set.rightmost(), Some(3));
//! assert_eq!(format!("{}", set), "01010");
//! ```

use std::cmp::Ordering;
use std::fmt;

const WORD_BITS: usize = 64;

fn words_for(width: usize) -> usize {
    width.div_ceil(WORD_BITS)
}

/// A fixed-width set of indices represented as a bitset.
///
/// Bit i (across all words) is set if index i is in the set. Bits beyond the
/// width are always zero, so word-level comparisons and population counts
/// never see stray bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    words: Vec<u64>,
    width: usize,
}

impl BitVector {
    /// Create an all-false vector of the given width.
    pub fn new(width: usize) -> Self {
        Self {
            words: vec![0; words_for(width)],
            width,
        }
    }

    /// Create a vector whose bit i is `bits[i]`.
    pub fn from_bools(bits: &[bool]) -> Self {
        let mut set = Self::new(bits.len());
        for (i, _) in bits.iter().enumerate().filter(|&(_, &b)| b) {
            set.insert(i);
        }
        set
    }

    /// Create a vector of the given width containing exactly `indices`.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range.
    pub fn from_indices(width: usize, indices: &[usize]) -> Self {
        let mut set = Self::new(width);
        for &i in indices {
            set.insert(i);
        }
        set
    }

    /// Number of addressable bits.
    pub fn width(&self) -> usize {
        self.width
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.width,
            "Bit index out of range: {} >= {}",
            index,
            self.width
        );
    }

    fn check_width(&self, other: &Self) {
        assert_eq!(
            self.width, other.width,
            "BitVector width mismatch: {} vs {}",
            self.width, other.width
        );
    }

    /// Check if index is in the set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= width`.
    pub fn contains(&self, index: usize) -> bool {
        self.check_index(index);
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 != 0
    }

    /// Insert index into the set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= width`.
    pub fn insert(&mut self, index: usize) {
        self.check_index(index);
        self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
    }

    /// Remove index from the set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= width`.
    pub fn remove(&mut self, index: usize) {
        self.check_index(index);
        self.words[index / WORD_BITS] &= !(1u64 << (index % WORD_BITS));
    }

    /// Population count.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True if no bit is set.
    pub fn is_clear(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// True if every bit in `0..width` is set.
    pub fn is_full(&self) -> bool {
        self.count_ones() == self.width
    }

    /// OR `other` into `self`.
    pub fn union_with(&mut self, other: &Self) {
        self.check_width(other);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    /// Population count of `self XOR other` (Hamming distance).
    pub fn xor_count(&self, other: &Self) -> usize {
        self.check_width(other);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a ^ b).count_ones() as usize)
            .sum()
    }

    /// True if every index in `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.check_width(other);
        self.words
            .iter()
            .zip(&other.words)
            .all(|(a, b)| a & !b == 0)
    }

    /// Smallest index in the set.
    pub fn leftmost(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|&(_, &w)| w != 0)
            .map(|(i, w)| i * WORD_BITS + w.trailing_zeros() as usize)
    }

    /// Largest index in the set.
    pub fn rightmost(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|&(_, &w)| w != 0)
            .map(|(i, w)| i * WORD_BITS + (WORD_BITS - 1 - w.leading_zeros() as usize))
    }

    /// The n-th smallest index in the set (0-based).
    pub fn nth_one(&self, n: usize) -> Option<usize> {
        self.iter_ones().nth(n)
    }

    /// Iterate over all indices in the set, in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let bit = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(i * WORD_BITS + bit)
            })
        })
    }

    /// Expand to one bool per index.
    pub fn to_bools(&self) -> Vec<bool> {
        let mut bits = vec![false; self.width];
        for i in self.iter_ones() {
            bits[i] = true;
        }
        bits
    }

    /// Compare as fixed-width binary strings with index 0 as the most
    /// significant digit.
    ///
    /// # Panics
    ///
    /// Panics if the widths differ.
    pub fn cmp_lex(&self, other: &Self) -> Ordering {
        self.check_width(other);
        for (a, b) in self.words.iter().zip(&other.words) {
            if a != b {
                return a.reverse_bits().cmp(&b.reverse_bits());
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for BitVector {
    /// Format as a binary string, index 0 first, e.g. "0110".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.width {
            f.write_str(if self.contains(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl From<&[bool]> for BitVector {
    fn from(bits: &[bool]) -> Self {
        Self::from_bools(bits)
    }
}
