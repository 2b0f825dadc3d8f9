// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exhaustive enumeration of minimal hitting sets, for small matrices.
//!
//! Tries every subset of columns, so it is only usable up to
//! [`MAX_BRUTE_FORCE_COLUMNS`] columns. The search engine is checked against
//! it.

use crate::bits::BitVector;
use crate::matrix::Matrix;

pub const MAX_BRUTE_FORCE_COLUMNS: usize = 20;

/// All minimal hitting sets of `matrix`, ordered by their bit pattern
/// (as a binary number, column 0 least significant).
///
/// # Panics
///
/// Panics if the matrix has more than [`MAX_BRUTE_FORCE_COLUMNS`] columns.
pub fn brute_force_minimal_hitting_sets(matrix: &Matrix) -> Vec<BitVector> {
    let n = matrix.columns();
    assert!(
        n <= MAX_BRUTE_FORCE_COLUMNS,
        "brute force limited to {} columns, got {}",
        MAX_BRUTE_FORCE_COLUMNS,
        n
    );
    let covers = |mask: u32| {
        let members: Vec<usize> = (0..n).filter(|&c| mask >> c & 1 != 0).collect();
        matrix.is_covered_by(&BitVector::from_indices(n, &members))
    };

    (0u32..1 << n)
        .filter(|&mask| covers(mask))
        .filter(|&mask| (0..n).filter(|&c| mask >> c & 1 != 0).all(|c| !covers(mask & !(1 << c))))
        .map(|mask| {
            let members: Vec<usize> = (0..n).filter(|&c| mask >> c & 1 != 0).collect();
            BitVector::from_indices(n, &members)
        })
        .collect()
}
