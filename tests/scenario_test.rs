// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! End-to-end checks on small hand-built matrices.

mod common;

use common::{as_strings, is_minimal, scenario_matrix};
use mhs_search::bits::BitVector;
use mhs_search::engine::{EngineOptions, SearchEngine};
use mhs_search::matrix::Matrix;
use mhs_search::preprocess::MatrixPreprocessor;
use mhs_search::solver::{brute_force_minimal_hitting_sets, Solver, SolverOptions};
use mhs_search::state::Counters;
use mhs_search::Termination;

#[test]
fn test_scenario_single_solution() {
    let m = scenario_matrix();
    // Neither column alone nor {0,2} nor {1,2} covers.
    for members in [&[0][..], &[1], &[0, 2], &[1, 2]] {
        assert!(!m.is_covered_by(&BitVector::from_indices(3, members)));
    }

    let outcome = SearchEngine::new(&m, EngineOptions::default()).search();
    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(outcome.solutions.len(), 1);
    assert_eq!(outcome.solutions[0].to_bools(), vec![true, true, false]);
}

#[test]
fn test_scenario_through_solver() {
    let result = Solver::new(scenario_matrix(), SolverOptions::default()).solve();
    assert_eq!(as_strings(&result.solutions), vec!["110"]);
    assert_eq!(result.statistics.get(Counters::Solutions), 1);
}

#[test]
fn test_diagnosis_example() {
    // Rows are symptoms, columns are components.
    let m = Matrix::from_u8_rows(&[
        &[1, 1, 0, 0, 0],
        &[0, 1, 1, 0, 0],
        &[0, 0, 1, 1, 0],
        &[1, 0, 0, 1, 1],
    ]);
    let result = Solver::new(m.clone(), SolverOptions::default()).solve();
    for solution in &result.solutions {
        assert!(is_minimal(&m, solution), "{} is not minimal", solution);
    }
    assert_eq!(
        as_strings(&result.solutions),
        as_strings(&brute_force_minimal_hitting_sets(&m))
    );
}

#[test]
fn test_duplicate_heavy_matrix() {
    // Columns 0, 2, 4 identical; 1 and 5 identical; 3 empty.
    let m = Matrix::from_u8_rows(&[
        &[1, 0, 1, 0, 1, 0],
        &[0, 1, 0, 0, 0, 1],
        &[1, 1, 1, 0, 1, 1],
    ]);
    let result = Solver::new(m.clone(), SolverOptions::default()).solve();
    assert_eq!(result.reduced_columns, 2);
    assert_eq!(result.raw_solutions.len(), 1);
    assert_eq!(result.solutions.len(), 6);
    assert_eq!(
        as_strings(&result.solutions),
        as_strings(&brute_force_minimal_hitting_sets(&m))
    );
}

#[test]
fn test_duplicate_substitution_not_double_counted() {
    // Column 1 duplicates column 0.
    let m = Matrix::from_u8_rows(&[&[1, 1, 0], &[0, 0, 1]]);
    let result = Solver::new(m, SolverOptions::default()).solve();
    assert_eq!(as_strings(&result.solutions), vec!["011", "101"]);
}

#[test]
fn test_all_zero_matrix_has_no_solution() {
    let m = Matrix::from_u8_rows(&[&[0, 0], &[0, 0]]);
    let result = Solver::new(m, SolverOptions::default()).solve();
    assert_eq!(result.reduced_columns, 0);
    assert!(result.solutions.is_empty());
    assert!(!result.stopped());
}

#[test]
fn test_single_cell_matrix() {
    let m = Matrix::from_u8_rows(&[&[1]]);
    let result = Solver::new(m, SolverOptions::default()).solve();
    assert_eq!(as_strings(&result.solutions), vec!["1"]);
}

#[test]
fn test_empty_column_removal_idempotent() {
    let m = Matrix::from_u8_rows(&[&[0, 1, 0], &[0, 1, 1]]);
    let mut pre = MatrixPreprocessor::with_seed(m, 5);
    assert_eq!(pre.remove_empty_columns(), 1);
    assert_eq!(pre.remove_empty_columns(), 0);
    assert_eq!(pre.reduction().deleted_columns(), &[0]);
}

#[test]
fn test_wide_matrix_crosses_word_boundary() {
    // 70 columns; column i covers row i % 3, so each minimal hitting set
    // picks one column per row.
    let rows = 3;
    let columns = 70;
    let data: Vec<Vec<bool>> = (0..rows)
        .map(|r| (0..columns).map(|c| c % rows == r).collect())
        .collect();
    let m = Matrix::from_rows(&data);
    let result = Solver::new(m.clone(), SolverOptions::default()).solve();
    assert_eq!(result.reduced_columns, 3);
    assert_eq!(result.raw_solutions.len(), 1);
    assert_eq!(result.solutions.len(), 24 * 23 * 23);
    assert!(result.solutions.iter().all(|s| s.count_ones() == 3 && is_minimal(&m, s)));
}
