// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reader for the plain-text matrix format.
//!
//! One row per line, space-separated `0`/`1` tokens. Dash characters are
//! stripped before parsing (benchmark files end each row with ` -`), lines
//! starting with [`COMMENT`] are skipped, and blank lines are ignored.

use std::fs;
use std::path::Path;

use crate::error::{MhsError, Result};
use crate::matrix::Matrix;

/// Comment marker, used both in input files and in result headers.
pub const COMMENT: &str = ";;;";

/// Parse a matrix from text.
pub fn parse_matrix(text: &str) -> Result<Matrix> {
    let mut rows: Vec<Vec<bool>> = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        if raw.starts_with(COMMENT) {
            continue;
        }
        let line = raw.replace('-', "");
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| match token {
                "0" => Ok(false),
                "1" => Ok(true),
                other => Err(MhsError::InvalidToken {
                    line: line_no,
                    token: other.to_string(),
                }),
            })
            .collect::<Result<Vec<bool>>>()?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(MhsError::RaggedRow {
                    line: line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }
    Ok(Matrix::from_rows(&rows))
}

/// Read and parse a matrix file.
pub fn read_matrix(path: impl AsRef<Path>) -> Result<Matrix> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MhsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let matrix = parse_matrix(&text)?;
    tracing::debug!(
        path = %path.display(),
        rows = matrix.rows(),
        columns = matrix.columns(),
        "read matrix"
    );
    Ok(matrix)
}
