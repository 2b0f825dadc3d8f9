// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reading matrix files and writing result files.

mod common;

use std::fs;

use common::as_strings;
use mhs_search::matrix::parse_matrix;
use mhs_search::report::save_report;
use mhs_search::solver::{Solver, SolverOptions};
use mhs_search::MhsError;

const SCENARIO_FILE: &str = "\
;;; seven symptoms, three components
1 0 0 -
1 0 1 -
0 1 0 -

1 1 0 -
1 0 1 -
0 1 0 -
1 0 0 -
";

#[test]
fn test_file_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scenario.dat");
    let output = dir.path().join("scenario.dat.mhs");
    fs::write(&input, SCENARIO_FILE).unwrap();

    let solver = Solver::from_file(&input, SolverOptions::default()).unwrap();
    assert_eq!(solver.matrix().rows(), 7);
    assert_eq!(solver.matrix().columns(), 3);
    let result = solver.solve();
    save_report(&output, &result).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with(";;; Matrix: 7 x 3\n"));
    assert!(text.contains(";;; Minimal hitting sets: 1\n"));
    assert!(text.ends_with("1 1 0 -\n"));
}

#[test]
fn test_report_solutions_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dups.dat");
    let output = dir.path().join("dups.mhs");
    fs::write(&input, "1 1 0 0\n0 0 1 0\n").unwrap();

    let result = Solver::from_file(&input, SolverOptions::default())
        .unwrap()
        .solve();
    save_report(&output, &result).unwrap();

    let solutions = parse_matrix(&fs::read_to_string(&output).unwrap()).unwrap();
    let read_back: Vec<_> = solutions
        .to_rows()
        .iter()
        .map(|row| mhs_search::bits::BitVector::from_bools(row))
        .collect();
    assert_eq!(as_strings(&read_back), vec!["0110", "1010"]);
    assert_eq!(as_strings(&read_back), as_strings(&result.solutions));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Solver::from_file(dir.path().join("absent.dat"), SolverOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, MhsError::Io { .. }));
}

#[test]
fn test_malformed_input_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.dat");
    fs::write(&input, ";;; header\n1 0\n1 x\n").unwrap();

    let err = Solver::from_file(&input, SolverOptions::default()).err().unwrap();
    assert!(matches!(err, MhsError::InvalidToken { line: 3, .. }));
    assert!(err.to_string().contains('x'));
}

#[test]
fn test_unwritable_output_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Solver::new(
        mhs_search::matrix::Matrix::from_u8_rows(&[&[1]]),
        SolverOptions::default(),
    )
    .solve();
    let err = save_report(dir.path().join("missing").join("out.mhs"), &result).unwrap_err();
    assert!(matches!(err, MhsError::Io { .. }));
}
