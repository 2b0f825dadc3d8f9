// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! End-to-end pipeline: preprocess, search, reconstruct.
//!
//! ```
//! use mhs_search::matrix::Matrix;
//! use mhs_search::solver::{Solver, SolverOptions};
//!
//! // Column 2 duplicates column 0, column 3 is empty.
//! let matrix = Matrix::from_u8_rows(&[&[1, 0, 1, 0], &[0, 1, 0, 0]]);
//! let result = Solver::new(matrix, SolverOptions::default()).solve();
//! let found: Vec<String> = result.sorted_solutions().iter().map(|s| s.to_string()).collect();
//! assert_eq!(found, vec!["1100", "0110"]);
//! assert_eq!(result.reduced_columns, 2);
//! ```

pub mod oracle;

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::info;

use crate::bits::BitVector;
use crate::engine::{CancellationToken, EngineOptions, SearchEngine, Termination};
use crate::error::Result;
use crate::matrix::{read_matrix, Matrix};
use crate::preprocess::{ColumnOrder, MatrixPreprocessor, Reduction};
use crate::reconstruct::{ReconstructionOverflow, SolutionReconstructor};
use crate::report::peak_memory_kb;
use crate::state::Statistics;

pub use oracle::brute_force_minimal_hitting_sets;

/// Preprocessing and search options for one run.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Remove all-false columns before search.
    pub delete_zeros: bool,
    /// Collapse identical columns into one representative before search.
    pub delete_duplicates: bool,
    pub column_order: ColumnOrder,
    /// Shuffle rows before search.
    pub permute_rows: bool,
    pub time_limit: Option<Duration>,
    pub stop_after_second_solution: bool,
    /// Seed for random permutations; entropy when `None`.
    pub seed: Option<u64>,
    pub cancellation: Option<CancellationToken>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            delete_zeros: true,
            delete_duplicates: true,
            column_order: ColumnOrder::Identity,
            permute_rows: false,
            time_limit: None,
            stop_after_second_solution: false,
            seed: None,
            cancellation: None,
        }
    }
}

impl SolverOptions {
    pub fn with_delete_zeros(mut self, delete: bool) -> Self {
        self.delete_zeros = delete;
        self
    }

    pub fn with_delete_duplicates(mut self, delete: bool) -> Self {
        self.delete_duplicates = delete;
        self
    }

    pub fn with_column_order(mut self, order: ColumnOrder) -> Self {
        self.column_order = order;
        self
    }

    pub fn with_permute_rows(mut self, permute: bool) -> Self {
        self.permute_rows = permute;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_stop_after_second_solution(mut self, stop: bool) -> Self {
        self.stop_after_second_solution = stop;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            time_limit: self.time_limit,
            stop_after_second_solution: self.stop_after_second_solution,
            cancellation: self.cancellation.clone(),
        }
    }
}

/// Everything a run produces, including what the report header needs.
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub original_rows: usize,
    pub original_columns: usize,
    pub reduced_rows: usize,
    pub reduced_columns: usize,
    pub reduction: Reduction,
    /// Solutions over the reduced matrix, as the engine found them.
    pub raw_solutions: Vec<BitVector>,
    /// Search time to each raw solution, parallel to `raw_solutions`.
    pub solution_times: Vec<Duration>,
    /// Solutions over the original columns, duplicates expanded.
    pub solutions: Vec<BitVector>,
    pub termination: Termination,
    pub overflows: Vec<ReconstructionOverflow>,
    pub statistics: Statistics,
    pub elapsed: Duration,
    pub peak_memory_kb: Option<u64>,
}

impl SolverResult {
    /// True when the solutions are not guaranteed exhaustive.
    pub fn stopped(&self) -> bool {
        self.termination.is_partial() || !self.overflows.is_empty()
    }

    /// Search time to the first solution.
    pub fn first_solution_time(&self) -> Option<Duration> {
        self.solution_times.first().copied()
    }

    /// Search time to the second solution; measurement mode stops here.
    pub fn second_solution_time(&self) -> Option<Duration> {
        self.solution_times.get(1).copied()
    }

    pub fn min_cardinality(&self) -> Option<usize> {
        self.solutions.iter().map(BitVector::count_ones).min()
    }

    pub fn max_cardinality(&self) -> Option<usize> {
        self.solutions.iter().map(BitVector::count_ones).max()
    }

    /// Solutions ordered by cardinality, then by bit pattern (column 0 first).
    pub fn sorted_solutions(&self) -> Vec<BitVector> {
        let mut sorted = self.solutions.clone();
        sorted.sort_by(|a, b| {
            a.count_ones()
                .cmp(&b.count_ones())
                .then_with(|| b.cmp_lex(a))
        });
        sorted
    }
}

/// One run over one matrix.
pub struct Solver {
    matrix: Matrix,
    options: SolverOptions,
}

impl Solver {
    pub fn new(matrix: Matrix, options: SolverOptions) -> Self {
        Self { matrix, options }
    }

    /// Read the matrix from a file in the text format.
    pub fn from_file(path: impl AsRef<Path>, options: SolverOptions) -> Result<Self> {
        Ok(Self::new(read_matrix(path)?, options))
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn solve(self) -> SolverResult {
        let started = Instant::now();
        let Solver { matrix, options } = self;
        let original_rows = matrix.rows();
        let original_columns = matrix.columns();

        let mut pre = match options.seed {
            Some(seed) => MatrixPreprocessor::with_seed(matrix, seed),
            None => MatrixPreprocessor::new(matrix),
        };
        if options.delete_zeros {
            pre.remove_empty_columns();
        }
        if options.delete_duplicates {
            pre.remove_duplicate_columns();
        }
        pre.permute_columns(options.column_order);
        if options.permute_rows {
            pre.permute_rows();
        }
        let (reduced, reduction) = pre.finish();
        info!(
            rows = original_rows,
            columns = original_columns,
            reduced_columns = reduced.columns(),
            "matrix reduced"
        );

        let outcome = SearchEngine::new(&reduced, options.engine_options()).search();
        let reconstruction = SolutionReconstructor::new(&reduction).reconstruct(&outcome.solutions);
        info!(
            raw = outcome.solutions.len(),
            reconstructed = reconstruction.solutions.len(),
            "solutions reconstructed"
        );

        SolverResult {
            original_rows,
            original_columns,
            reduced_rows: reduced.rows(),
            reduced_columns: reduced.columns(),
            reduction,
            raw_solutions: outcome.solutions,
            solution_times: outcome.solution_times,
            solutions: reconstruction.solutions,
            termination: outcome.termination,
            overflows: reconstruction.overflows,
            statistics: outcome.statistics,
            elapsed: started.elapsed(),
            peak_memory_kb: peak_memory_kb(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Matrix {
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

    #[test]
    fn test_scenario_end_to_end() {
        let result = Solver::new(scenario(), SolverOptions::default()).solve();
        assert!(!result.stopped());
        assert_eq!(result.solutions.len(), 1);
        assert_eq!(result.solutions[0].to_bools(), vec![true, true, false]);
        assert_eq!(result.min_cardinality(), Some(2));
        assert_eq!(result.max_cardinality(), Some(2));
    }

    #[test]
    fn test_every_column_order_agrees() {
        let m = Matrix::from_u8_rows(&[
            &[1, 0, 0, 1, 0],
            &[0, 1, 0, 1, 0],
            &[0, 0, 1, 0, 1],
            &[1, 1, 0, 0, 1],
        ]);
        let expected = brute_force_minimal_hitting_sets(&m);
        for order in [
            ColumnOrder::Identity,
            ColumnOrder::Random,
            ColumnOrder::Descending,
            ColumnOrder::Ascending,
        ] {
            let options = SolverOptions::default()
                .with_column_order(order)
                .with_permute_rows(true)
                .with_seed(11);
            let result = Solver::new(m.clone(), options).solve();
            let mut found = result.solutions.clone();
            found.sort_by(|a, b| b.cmp_lex(a));
            let mut want = expected.clone();
            want.sort_by(|a, b| b.cmp_lex(a));
            assert_eq!(found, want, "column order {}", order);
        }
    }

    #[test]
    fn test_sorted_solutions() {
        let m = Matrix::from_u8_rows(&[&[1, 0, 0, 1], &[0, 1, 0, 1], &[0, 0, 1, 1]]);
        let result = Solver::new(m, SolverOptions::default()).solve();
        let sorted: Vec<String> = result.sorted_solutions().iter().map(|s| s.to_string()).collect();
        assert_eq!(sorted, vec!["0001", "1110"]);
    }

    #[test]
    fn test_keep_duplicates_searches_full_matrix() {
        let m = Matrix::from_u8_rows(&[&[1, 1, 0], &[0, 0, 1]]);
        let options = SolverOptions::default().with_delete_duplicates(false);
        let result = Solver::new(m, options).solve();
        assert_eq!(result.reduced_columns, 3);
        assert_eq!(result.solutions.len(), 2);
        assert!(result.reduction.duplication_classes().is_empty());
    }

    #[test]
    fn test_cancelled_run_is_stopped() {
        let token = CancellationToken::new();
        token.cancel();
        let options = SolverOptions::default().with_cancellation(token);
        let result = Solver::new(scenario(), options).solve();
        assert!(result.stopped());
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.min_cardinality(), None);
    }

    #[test]
    fn test_measurement_mode_records_first_and_second_times() {
        // Columns 0 and 1 are identical; keep them so each is its own solution.
        let m = Matrix::from_u8_rows(&[&[1, 1, 0], &[1, 1, 1]]);
        let options = SolverOptions::default()
            .with_delete_duplicates(false)
            .with_stop_after_second_solution(true);
        let result = Solver::new(m, options).solve();
        assert_eq!(result.termination, Termination::SecondSolution);
        assert_eq!(result.raw_solutions.len(), 2);
        let first = result.first_solution_time().unwrap();
        let second = result.second_solution_time().unwrap();
        assert!(first <= second);
    }
}
