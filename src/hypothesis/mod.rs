// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Hypotheses: candidate sets of columns.
//!
//! A hypothesis pairs a `value` (N bits, bit i set when column i is a member)
//! with its `coverage` (M bits, the OR of the selected columns). The value is
//! fixed at construction. Coverage is set from the matrix only for singletons;
//! for larger hypotheses it is assembled by [`Hypothesis::propagate_coverage`]
//! from siblings while the child is being generated, and never changes after
//! the child is published to a frontier.
//!
//! # Ordering
//!
//! Hypotheses are ordered by their value read as a fixed-width binary string,
//! index 0 most significant. This is a sort key for the frontier and has no
//! relation to set inclusion. Equality compares values only.
//!
//! ```
//! use mhs_search::hypothesis::Hypothesis;
//!
//! let a = Hypothesis::from_indices(4, 2, &[0, 3]); // 1001
//! let b = Hypothesis::from_indices(4, 2, &[1, 2]); // 0110
//! assert!(a > b);
//! assert_eq!(a.level(), 2);
//! assert_eq!(a.distance(&b), 4);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::bits::BitVector;
use crate::matrix::Matrix;

/// A candidate set of columns with its coverage vector.
#[derive(Debug, Clone)]
pub struct Hypothesis {
    value: BitVector,
    coverage: BitVector,
}

impl Hypothesis {
    /// The empty hypothesis (level 0) over `matrix`; covers nothing.
    pub fn empty(matrix: &Matrix) -> Self {
        Self {
            value: BitVector::new(matrix.columns()),
            coverage: BitVector::new(matrix.rows()),
        }
    }

    /// The singleton `{column}`, with coverage taken directly from the matrix.
    pub fn singleton(matrix: &Matrix, column: usize) -> Self {
        let mut value = BitVector::new(matrix.columns());
        value.insert(column);
        Self {
            value,
            coverage: matrix.column(column).clone(),
        }
    }

    /// A hypothesis with the given members and empty coverage.
    ///
    /// Used for sort keys and for children whose coverage will be propagated.
    pub fn from_indices(columns: usize, rows: usize, members: &[usize]) -> Self {
        Self {
            value: BitVector::from_indices(columns, members),
            coverage: BitVector::new(rows),
        }
    }

    fn with_value(&self, value: BitVector) -> Self {
        Self {
            value,
            coverage: BitVector::new(self.coverage.width()),
        }
    }

    /// Member columns.
    pub fn value(&self) -> &BitVector {
        &self.value
    }

    /// Rows covered so far.
    pub fn coverage(&self) -> &BitVector {
        &self.coverage
    }

    /// Number of member columns.
    pub fn level(&self) -> usize {
        self.value.count_ones()
    }

    /// Smallest member column, `None` for the empty hypothesis.
    pub fn leftmost_set_bit(&self) -> Option<usize> {
        self.value.leftmost()
    }

    /// Hamming distance between the two values.
    pub fn distance(&self, other: &Self) -> usize {
        self.value.xor_count(&other.value)
    }

    /// True when every row is covered.
    pub fn is_solution(&self, matrix: &Matrix) -> bool {
        debug_assert_eq!(self.coverage.width(), matrix.rows());
        self.coverage.count_ones() == matrix.rows()
    }

    /// Pruning threshold: this value with bit 0 set and its rightmost set bit
    /// cleared.
    ///
    /// # Panics
    ///
    /// Panics on the empty hypothesis.
    pub fn global_initial(&self) -> Self {
        let rightmost = self
            .value
            .rightmost()
            .expect("global_initial of the empty hypothesis");
        let mut value = self.value.clone();
        value.insert(0);
        value.remove(rightmost);
        self.with_value(value)
    }

    /// Upper end of the sibling window of child `self`: its value with the
    /// rightmost set bit cleared.
    ///
    /// # Panics
    ///
    /// Panics on the empty hypothesis.
    pub fn initial_bound(&self) -> Self {
        let rightmost = self
            .value
            .rightmost()
            .expect("initial_bound of the empty hypothesis");
        let mut value = self.value.clone();
        value.remove(rightmost);
        self.with_value(value)
    }

    /// Lower end of the sibling window of child `self`: its value with the
    /// second-from-left set bit cleared.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two bits are set.
    pub fn final_bound(&self) -> Self {
        let second = self
            .value
            .nth_one(1)
            .expect("final_bound needs at least two members");
        let mut value = self.value.clone();
        value.remove(second);
        self.with_value(value)
    }

    /// Copy of this hypothesis with `column` added and empty coverage.
    pub(crate) fn extended(&self, column: usize) -> Self {
        let mut value = self.value.clone();
        value.insert(column);
        self.with_value(value)
    }

    /// OR `other`'s coverage into this one.
    pub fn propagate_coverage(&mut self, other: &Self) {
        self.coverage.union_with(&other.coverage);
    }

    /// Member columns as a bool vector.
    pub fn to_bools(&self) -> Vec<bool> {
        self.value.to_bools()
    }
}

impl PartialEq for Hypothesis {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Hypothesis {}

impl PartialOrd for Hypothesis {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hypothesis {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp_lex(&other.value)
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
