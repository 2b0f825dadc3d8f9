// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! Only input problems are errors. Running out of time, cancellation and
//! combination overflow during reconstruction are partial results, reported
//! through [`crate::engine::Termination`] and
//! [`crate::reconstruct::ReconstructionOverflow`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run before or after the search.
#[derive(Debug, Error)]
pub enum MhsError {
    /// Input missing or unreadable, or output not writable.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token other than `0` or `1` in the matrix text.
    #[error("line {line}: invalid token {token:?}, expected 0 or 1")]
    InvalidToken { line: usize, token: String },

    /// A row whose width differs from the first row.
    #[error("line {line}: row has {found} columns, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, MhsError>;
