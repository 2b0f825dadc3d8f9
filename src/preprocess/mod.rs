// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Matrix reduction and permutation applied before search.
//!
//! The preprocessor owns the matrix until search begins. Every column it
//! deletes or moves is recorded against the column's index in the *original*
//! matrix, so the [`Reduction`] it hands over is enough to map solutions over
//! the reduced matrix back to the original column space.
//!
//! # Example
//!
//! ```
//! use mhs_search::matrix::Matrix;
//! use mhs_search::preprocess::MatrixPreprocessor;
//!
//! let matrix = Matrix::from_u8_rows(&[&[1, 0, 1, 0], &[0, 0, 0, 1]]);
//! let mut pre = MatrixPreprocessor::new(matrix);
//! assert_eq!(pre.remove_empty_columns(), 1);
//! assert_eq!(pre.remove_duplicate_columns(), 1);
//! let (reduced, reduction) = pre.finish();
//! assert_eq!(reduced.columns(), 2);
//! assert_eq!(reduction.deleted_columns(), &[1]);
//! assert_eq!(reduction.duplicates_of(0), &[2]);
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::bits::BitVector;
use crate::matrix::Matrix;

/// Column reordering heuristics. They change discovery order and therefore
/// running time, never the set of minimal hitting sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnOrder {
    /// Keep the input order.
    #[default]
    Identity,
    /// Uniform random shuffle.
    Random,
    /// Columns covering the most rows first.
    Descending,
    /// Columns covering the fewest rows first.
    Ascending,
}

impl fmt::Display for ColumnOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnOrder::Identity => "identity",
            ColumnOrder::Random => "random",
            ColumnOrder::Descending => "descending",
            ColumnOrder::Ascending => "ascending",
        };
        f.write_str(name)
    }
}

impl FromStr for ColumnOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "identity" | "none" => Ok(ColumnOrder::Identity),
            "random" => Ok(ColumnOrder::Random),
            "descending" | "desc" => Ok(ColumnOrder::Descending),
            "ascending" | "asc" => Ok(ColumnOrder::Ascending),
            other => Err(format!("unknown column order {other:?}")),
        }
    }
}

/// Everything needed to map reduced-matrix columns back to the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    original_columns: usize,
    column_origin: Vec<usize>,
    deleted_columns: Vec<usize>,
    duplication_classes: BTreeMap<usize, Vec<usize>>,
}

impl Reduction {
    /// The identity reduction over `columns` columns.
    pub fn identity(columns: usize) -> Self {
        Self {
            original_columns: columns,
            column_origin: (0..columns).collect(),
            deleted_columns: Vec::new(),
            duplication_classes: BTreeMap::new(),
        }
    }

    /// Column count of the original matrix.
    pub fn original_columns(&self) -> usize {
        self.original_columns
    }

    /// Original index of each surviving column, indexed by reduced position.
    pub fn column_origin(&self) -> &[usize] {
        &self.column_origin
    }

    /// Original indices of the all-false columns removed, highest first.
    pub fn deleted_columns(&self) -> &[usize] {
        &self.deleted_columns
    }

    /// Representative (original index) to the original indices of the
    /// columns sharing its row pattern.
    pub fn duplication_classes(&self) -> &BTreeMap<usize, Vec<usize>> {
        &self.duplication_classes
    }

    /// Columns interchangeable with `representative`; empty when it has none.
    pub fn duplicates_of(&self, representative: usize) -> &[usize] {
        self.duplication_classes
            .get(&representative)
            .map_or(&[], Vec::as_slice)
    }

    /// Original indices of the duplicates removed, ascending.
    pub fn duplicate_columns(&self) -> Vec<usize> {
        let mut all: Vec<usize> = self.duplication_classes.values().flatten().copied().collect();
        all.sort_unstable();
        all
    }

    fn forget_columns_descending(&mut self, indices: &[usize]) {
        for &c in indices {
            self.column_origin.remove(c);
        }
    }
}

/// Column/row reduction and permutation heuristics.
#[derive(Debug)]
pub struct MatrixPreprocessor {
    matrix: Matrix,
    reduction: Reduction,
    rng: StdRng,
}

impl MatrixPreprocessor {
    /// Preprocess `matrix` with an entropy-seeded random source.
    pub fn new(matrix: Matrix) -> Self {
        Self::with_rng(matrix, StdRng::from_entropy())
    }

    /// Preprocess `matrix` with a reproducible random source.
    pub fn with_seed(matrix: Matrix, seed: u64) -> Self {
        Self::with_rng(matrix, StdRng::seed_from_u64(seed))
    }

    fn with_rng(matrix: Matrix, rng: StdRng) -> Self {
        let reduction = Reduction::identity(matrix.columns());
        Self {
            matrix,
            reduction,
            rng,
        }
    }

    /// The matrix in its current state.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// The reduction recorded so far.
    pub fn reduction(&self) -> &Reduction {
        &self.reduction
    }

    /// Delete every all-false column. Returns the number removed.
    ///
    /// A second call removes nothing.
    pub fn remove_empty_columns(&mut self) -> usize {
        let empty: Vec<usize> = (0..self.matrix.columns())
            .rev()
            .filter(|&c| self.matrix.column(c).is_clear())
            .collect();
        if empty.is_empty() {
            return 0;
        }

        let deleted = &mut self.reduction.deleted_columns;
        deleted.extend(empty.iter().map(|&c| self.reduction.column_origin[c]));
        deleted.sort_unstable_by(|a, b| b.cmp(a));

        self.matrix.delete_columns_descending(&empty);
        self.reduction.forget_columns_descending(&empty);
        debug!(removed = empty.len(), remaining = self.matrix.columns(), "removed empty columns");
        empty.len()
    }

    /// Keep one representative (the lowest original index) of each group of
    /// identical columns and delete the rest. Returns the number removed.
    pub fn remove_duplicate_columns(&mut self) -> usize {
        let mut groups: HashMap<&BitVector, Vec<usize>> = HashMap::new();
        let mut first_seen: Vec<&BitVector> = Vec::new();
        for c in 0..self.matrix.columns() {
            let pattern = self.matrix.column(c);
            let group = groups.entry(pattern).or_default();
            if group.is_empty() {
                first_seen.push(pattern);
            }
            group.push(c);
        }

        let mut removed: Vec<usize> = Vec::new();
        for pattern in first_seen {
            let group = &groups[pattern];
            if group.len() < 2 {
                continue;
            }
            let origin = &self.reduction.column_origin;
            let kept = group
                .iter()
                .copied()
                .min_by_key(|&c| origin[c])
                .unwrap_or(group[0]);
            let others: Vec<usize> = group.iter().copied().filter(|&c| c != kept).collect();
            let class = self
                .reduction
                .duplication_classes
                .entry(origin[kept])
                .or_default();
            class.extend(others.iter().map(|&c| origin[c]));
            class.sort_unstable();
            removed.extend(others);
        }
        if removed.is_empty() {
            return 0;
        }

        removed.sort_unstable_by(|a, b| b.cmp(a));
        self.matrix.delete_columns_descending(&removed);
        self.reduction.forget_columns_descending(&removed);
        debug!(removed = removed.len(), remaining = self.matrix.columns(), "removed duplicate columns");
        removed.len()
    }

    /// Reorder columns by `order`.
    pub fn permute_columns(&mut self, order: ColumnOrder) {
        let mut permutation: Vec<usize> = (0..self.matrix.columns()).collect();
        match order {
            ColumnOrder::Identity => return,
            ColumnOrder::Random => permutation.shuffle(&mut self.rng),
            ColumnOrder::Descending => {
                permutation.sort_by_key(|&c| Reverse(self.matrix.column_weight(c)))
            }
            ColumnOrder::Ascending => permutation.sort_by_key(|&c| self.matrix.column_weight(c)),
        }
        self.matrix.reorder_columns(&permutation);
        let origin = &self.reduction.column_origin;
        self.reduction.column_origin = permutation.iter().map(|&c| origin[c]).collect();
        debug!(%order, "permuted columns");
    }

    /// Shuffle rows uniformly at random. Rows never appear in solutions, so
    /// nothing needs to be recorded.
    pub fn permute_rows(&mut self) {
        let mut permutation: Vec<usize> = (0..self.matrix.rows()).collect();
        permutation.shuffle(&mut self.rng);
        self.matrix.reorder_rows(&permutation);
        debug!("permuted rows");
    }

    /// Hand over the reduced matrix and the record of how it was reduced.
    pub fn finish(self) -> (Matrix, Reduction) {
        (self.matrix, self.reduction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Matrix {
        // Columns: 0 = 1100, 1 = 0000, 2 = 0011, 3 = 1100, 4 = 0000, 5 = 1100
        Matrix::from_u8_rows(&[
            &[1, 0, 0, 1, 0, 1],
            &[1, 0, 0, 1, 0, 1],
            &[0, 0, 1, 0, 0, 0],
            &[0, 0, 1, 0, 0, 0],
        ])
    }

    #[test]
    fn test_remove_empty_columns_records_highest_first() {
        let mut pre = MatrixPreprocessor::with_seed(matrix(), 1);
        assert_eq!(pre.remove_empty_columns(), 2);
        assert_eq!(pre.reduction().deleted_columns(), &[4, 1]);
        assert_eq!(pre.reduction().column_origin(), &[0, 2, 3, 5]);
        assert_eq!(pre.matrix().columns(), 4);
    }

    #[test]
    fn test_remove_empty_columns_is_idempotent() {
        let mut pre = MatrixPreprocessor::with_seed(matrix(), 1);
        pre.remove_empty_columns();
        let before = pre.reduction().clone();
        assert_eq!(pre.remove_empty_columns(), 0);
        assert_eq!(pre.reduction(), &before);
    }

    #[test]
    fn test_remove_duplicates_after_empty() {
        let mut pre = MatrixPreprocessor::with_seed(matrix(), 1);
        pre.remove_empty_columns();
        assert_eq!(pre.remove_duplicate_columns(), 2);
        let reduction = pre.reduction();
        assert_eq!(reduction.column_origin(), &[0, 2]);
        assert_eq!(reduction.duplicates_of(0), &[3, 5]);
        assert_eq!(reduction.duplicates_of(2), &[] as &[usize]);
        assert_eq!(reduction.duplicate_columns(), vec![3, 5]);
        assert_eq!(pre.remove_duplicate_columns(), 0);
    }

    #[test]
    fn test_remove_duplicates_without_empty_removal() {
        let mut pre = MatrixPreprocessor::with_seed(matrix(), 1);
        assert_eq!(pre.remove_duplicate_columns(), 3);
        let reduction = pre.reduction();
        assert_eq!(reduction.column_origin(), &[0, 1, 2]);
        assert_eq!(reduction.duplicates_of(1), &[4]);
    }

    #[test]
    fn test_representative_is_lowest_original_index_after_shuffle() {
        // 0 == 2 == 4, 1 == 3
        let m = Matrix::from_u8_rows(&[&[1, 0, 1, 0, 1], &[0, 1, 0, 1, 0], &[1, 1, 1, 1, 1]]);
        for seed in 0..20 {
            let mut pre = MatrixPreprocessor::with_seed(m.clone(), seed);
            pre.permute_columns(ColumnOrder::Random);
            assert_eq!(pre.remove_duplicate_columns(), 3);
            let reduction = pre.reduction();
            let mut kept = reduction.column_origin().to_vec();
            kept.sort_unstable();
            assert_eq!(kept, vec![0, 1], "seed {}", seed);
            assert_eq!(reduction.duplicates_of(0), &[2, 4]);
            assert_eq!(reduction.duplicates_of(1), &[3]);
        }
    }

    #[test]
    fn test_weight_orders() {
        let m = Matrix::from_u8_rows(&[&[1, 1, 0], &[0, 1, 0], &[0, 1, 1], &[0, 0, 1]]);
        let mut pre = MatrixPreprocessor::with_seed(m.clone(), 1);
        pre.permute_columns(ColumnOrder::Descending);
        assert_eq!(pre.reduction().column_origin(), &[1, 2, 0]);
        assert_eq!(pre.matrix().column(0), m.column(1));

        let mut pre = MatrixPreprocessor::with_seed(m, 1);
        pre.permute_columns(ColumnOrder::Ascending);
        assert_eq!(pre.reduction().column_origin(), &[0, 2, 1]);
    }

    #[test]
    fn test_random_permutation_is_a_permutation() {
        let m = matrix();
        let mut pre = MatrixPreprocessor::with_seed(m.clone(), 42);
        pre.permute_columns(ColumnOrder::Random);
        let mut origin = pre.reduction().column_origin().to_vec();
        for (j, &c) in origin.iter().enumerate() {
            assert_eq!(pre.matrix().column(j), m.column(c));
        }
        origin.sort_unstable();
        assert_eq!(origin, (0..m.columns()).collect::<Vec<_>>());
    }

    #[test]
    fn test_row_permutation_keeps_column_weights() {
        let m = matrix();
        let mut pre = MatrixPreprocessor::with_seed(m.clone(), 7);
        pre.permute_rows();
        for c in 0..m.columns() {
            assert_eq!(pre.matrix().column_weight(c), m.column_weight(c));
        }
        assert_eq!(pre.reduction(), &Reduction::identity(m.columns()));
    }

    #[test]
    fn test_column_order_parse() {
        assert_eq!("desc".parse::<ColumnOrder>(), Ok(ColumnOrder::Descending));
        assert_eq!("Random".parse::<ColumnOrder>(), Ok(ColumnOrder::Random));
        assert!("sideways".parse::<ColumnOrder>().is_err());
        assert_eq!(ColumnOrder::Ascending.to_string(), "ascending");
    }
}
