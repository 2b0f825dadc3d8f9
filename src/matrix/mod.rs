// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The boolean coverage matrix.
//!
//! Rows are observations to be explained, columns are candidate elements.
//! The matrix is stored column-major: each column is an M-bit [`BitVector`]
//! of the rows it covers, which is exactly what coverage propagation needs.
//!
//! A `Matrix` is mutated only by the preprocessor, before search begins.

pub mod reader;

use crate::bits::BitVector;

pub use reader::{parse_matrix, read_matrix, COMMENT};

/// M×N boolean grid, stored column-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    columns: Vec<BitVector>,
}

impl Matrix {
    /// Build a matrix from row-major data.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length.
    pub fn from_rows<R: AsRef<[bool]>>(data: &[R]) -> Self {
        let rows = data.len();
        let ncols = data.first().map_or(0, |r| r.as_ref().len());
        let mut columns = vec![BitVector::new(rows); ncols];
        for (r, row) in data.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(row.len(), ncols, "Row {} has {} columns, expected {}", r, row.len(), ncols);
            for (c, _) in row.iter().enumerate().filter(|&(_, &b)| b) {
                columns[c].insert(r);
            }
        }
        Self { rows, columns }
    }

    /// Build a matrix from 0/1 integers, row-major. Convenient in tests.
    pub fn from_u8_rows(data: &[&[u8]]) -> Self {
        let bools: Vec<Vec<bool>> = data
            .iter()
            .map(|r| r.iter().map(|&v| v != 0).collect())
            .collect();
        Self::from_rows(&bools)
    }

    /// Build a matrix directly from its columns.
    ///
    /// # Panics
    ///
    /// Panics if any column's width differs from `rows`.
    pub fn from_columns(rows: usize, columns: Vec<BitVector>) -> Self {
        for (c, col) in columns.iter().enumerate() {
            assert_eq!(col.width(), rows, "Column {} has {} rows, expected {}", c, col.width(), rows);
        }
        Self { rows, columns }
    }

    /// Number of rows (M).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (N).
    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// The rows covered by column `index`.
    pub fn column(&self, index: usize) -> &BitVector {
        &self.columns[index]
    }

    /// Cell value.
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.columns[column].contains(row)
    }

    /// Number of rows covered by column `index`.
    pub fn column_weight(&self, index: usize) -> usize {
        self.columns[index].count_ones()
    }

    /// Row-major copy of the grid.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows)
            .map(|r| self.columns.iter().map(|col| col.contains(r)).collect())
            .collect()
    }

    /// True if the columns selected by `selection` cover every row.
    pub fn is_covered_by(&self, selection: &BitVector) -> bool {
        let mut coverage = BitVector::new(self.rows);
        for c in selection.iter_ones() {
            coverage.union_with(&self.columns[c]);
        }
        coverage.is_full()
    }

    /// Delete the columns at `indices`, which must be sorted in descending order.
    pub(crate) fn delete_columns_descending(&mut self, indices: &[usize]) {
        debug_assert!(indices.windows(2).all(|w| w[0] > w[1]));
        for &c in indices {
            self.columns.remove(c);
        }
    }

    /// Reorder columns so that new column `j` is old column `order[j]`.
    pub(crate) fn reorder_columns(&mut self, order: &[usize]) {
        assert_eq!(order.len(), self.columns.len(), "Column order has wrong length");
        let columns = order.iter().map(|&c| self.columns[c].clone()).collect();
        self.columns = columns;
    }

    /// Reorder rows so that new row `i` is old row `order[i]`.
    pub(crate) fn reorder_rows(&mut self, order: &[usize]) {
        assert_eq!(order.len(), self.rows, "Row order has wrong length");
        for col in &mut self.columns {
            let mut permuted = BitVector::new(self.rows);
            for (new_row, &old_row) in order.iter().enumerate() {
                if col.contains(old_row) {
                    permuted.insert(new_row);
                }
            }
            *col = permuted;
        }
    }
}
