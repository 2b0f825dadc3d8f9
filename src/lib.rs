// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration of all minimal hitting sets of a boolean coverage matrix.
//!
//! Given M rows (observations) and N columns (candidate elements), a hitting
//! set is a set of columns whose rows together cover every row; it is minimal
//! when no proper subset is also a hitting set. In model-based diagnosis the
//! columns are candidate faults and the rows are symptoms to explain.
//!
//! # Architecture
//!
//! The pipeline runs in three stages:
//!
//! 1. **MatrixPreprocessor** ([`preprocess`]): removes all-false and duplicate
//!    columns and optionally permutes rows and columns, recording everything it
//!    changes against the original column indices.
//! 2. **SearchEngine** ([`engine`]): enumerates minimal hitting sets over the
//!    reduced matrix level by level, one cardinality at a time, generating each
//!    candidate from a single parent and assembling its coverage from siblings.
//! 3. **SolutionReconstructor** ([`reconstruct`]): maps raw solutions back to
//!    the original columns, multiplying each by the duplicates its columns
//!    stood in for.
//!
//! [`solver::Solver`] wires the stages together and [`report`] writes result
//! files.
//!
//! # Cancellation
//!
//! The search is single-threaded. It polls a wall-clock deadline and an
//! optional [`engine::CancellationToken`] once per hypothesis and returns the
//! solutions found so far when either fires.
//!
//! # Example
//!
//! ```
//! use mhs_search::matrix::Matrix;
//! use mhs_search::solver::{Solver, SolverOptions};
//!
//! let matrix = Matrix::from_u8_rows(&[
//!     &[1, 0, 0],
//!     &[1, 0, 1],
//!     &[0, 1, 0],
//!     &[1, 1, 0],
//!     &[1, 0, 1],
//!     &[0, 1, 0],
//!     &[1, 0, 0],
//! ]);
//! let result = Solver::new(matrix, SolverOptions::default()).solve();
//! assert_eq!(result.solutions.len(), 1);
//! assert_eq!(result.solutions[0].to_bools(), vec![true, true, false]);
//! ```

pub mod bits;
pub mod engine;
pub mod error;
pub mod hypothesis;
pub mod matrix;
pub mod preprocess;
pub mod reconstruct;
pub mod report;
pub mod solver;
pub mod state;

// Re-export commonly used types
pub use engine::{CancellationToken, SearchEngine, Termination};
pub use error::{MhsError, Result};
pub use hypothesis::Hypothesis;
pub use matrix::Matrix;
pub use solver::{Solver, SolverOptions, SolverResult};
