// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use mhs_search::bits::BitVector;
use mhs_search::matrix::Matrix;

/// The 7x3 matrix whose only minimal hitting set is {0, 1}.
pub fn scenario_matrix() -> Matrix {
    Matrix::from_u8_rows(&[
        &[1, 0, 0],
        &[1, 0, 1],
        &[0, 1, 0],
        &[1, 1, 0],
        &[1, 0, 1],
        &[0, 1, 0],
        &[1, 0, 0],
    ])
}

/// Solutions as sorted binary strings, so sets can be compared.
pub fn as_strings(solutions: &[BitVector]) -> Vec<String> {
    let mut strings: Vec<String> = solutions.iter().map(|s| s.to_string()).collect();
    strings.sort();
    strings
}

/// True if no proper subset obtained by dropping one member still covers.
pub fn is_minimal(matrix: &Matrix, solution: &BitVector) -> bool {
    matrix.is_covered_by(solution)
        && solution.iter_ones().all(|c| {
            let mut smaller = solution.clone();
            smaller.remove(c);
            !matrix.is_covered_by(&smaller)
        })
}
