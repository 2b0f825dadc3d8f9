// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Result files.
//!
//! A header of comment lines describing the run, then one line per minimal
//! hitting set over the original columns:
//!
//! ```text
//! ;;; Matrix: 7 x 3
//! ;;; Reduced matrix: 7 x 3
//! ;;; Minimal hitting sets: 1
//! ;;; Minimum cardinality: 2
//! ;;; Maximum cardinality: 2
//! ;;; Elapsed time: 0.000120 s
//! ;;; First solution: 0.000051 s
//! ;;; Peak memory: 2112 KB
//! ;;; Removed empty columns: none
//! ;;; Removed duplicate columns: none
//! ;;; Hypotheses per level: 1 3 3
//! 1 1 0 -
//! ```

use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::bits::BitVector;
use crate::engine::Termination;
use crate::error::{MhsError, Result};
use crate::matrix::COMMENT;
use crate::solver::SolverResult;

/// Terminates every solution line.
pub const SOLUTION_MARKER: &str = "-";

/// Peak resident set size of this process in KB, where the platform
/// exposes it.
pub fn peak_memory_kb() -> Option<u64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmHWM:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kb| kb.parse().ok())
}

fn join<T: ToString>(items: impl IntoIterator<Item = T>, separator: &str) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

fn or_none(list: String) -> String {
    if list.is_empty() {
        "none".to_string()
    } else {
        list
    }
}

fn solution_line(solution: &BitVector) -> String {
    let bits = join(
        solution.to_bools().into_iter().map(|b| if b { "1" } else { "0" }),
        " ",
    );
    if bits.is_empty() {
        SOLUTION_MARKER.to_string()
    } else {
        format!("{} {}", bits, SOLUTION_MARKER)
    }
}

/// Write the full report.
pub fn write_report<W: Write>(out: &mut W, result: &SolverResult) -> io::Result<()> {
    writeln!(out, "{} Matrix: {} x {}", COMMENT, result.original_rows, result.original_columns)?;
    writeln!(
        out,
        "{} Reduced matrix: {} x {}",
        COMMENT, result.reduced_rows, result.reduced_columns
    )?;
    writeln!(out, "{} Minimal hitting sets: {}", COMMENT, result.solutions.len())?;
    let show = |v: Option<usize>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
    writeln!(out, "{} Minimum cardinality: {}", COMMENT, show(result.min_cardinality()))?;
    writeln!(out, "{} Maximum cardinality: {}", COMMENT, show(result.max_cardinality()))?;
    writeln!(out, "{} Elapsed time: {:.6} s", COMMENT, result.elapsed.as_secs_f64())?;
    if let Some(first) = result.first_solution_time() {
        writeln!(out, "{} First solution: {:.6} s", COMMENT, first.as_secs_f64())?;
    }
    if let Some(second) = result.second_solution_time() {
        writeln!(out, "{} Second solution: {:.6} s", COMMENT, second.as_secs_f64())?;
    }
    match result.peak_memory_kb {
        Some(kb) => writeln!(out, "{} Peak memory: {} KB", COMMENT, kb)?,
        None => writeln!(out, "{} Peak memory: unavailable", COMMENT)?,
    }

    let mut deleted = result.reduction.deleted_columns().to_vec();
    deleted.sort_unstable();
    writeln!(out, "{} Removed empty columns: {}", COMMENT, or_none(join(deleted, " ")))?;
    let classes = join(
        result
            .reduction
            .duplication_classes()
            .iter()
            .map(|(rep, dups)| format!("{} ({})", join(dups, " "), rep)),
        ", ",
    );
    writeln!(out, "{} Removed duplicate columns: {}", COMMENT, or_none(classes))?;
    writeln!(
        out,
        "{} Hypotheses per level: {}",
        COMMENT,
        join(result.statistics.level_sizes(), " ")
    )?;

    if result.stopped() {
        let reason = match result.termination {
            Termination::Exhausted => "duplicate expansion limit",
            Termination::TimedOut => "time limit",
            Termination::Cancelled => "cancelled",
            Termination::SecondSolution => "second solution",
            Termination::LevelLimit => "level limit",
        };
        writeln!(out, "{} Interrupted: {}", COMMENT, reason)?;
    }
    for overflow in &result.overflows {
        writeln!(
            out,
            "{} Duplicate expansion abandoned for solution {} ({} combinations)",
            COMMENT, overflow.solution_index, overflow.combinations
        )?;
    }

    for solution in &result.solutions {
        writeln!(out, "{}", solution_line(solution))?;
    }
    Ok(())
}

/// Write the report to `path`.
pub fn save_report(path: impl AsRef<Path>, result: &SolverResult) -> Result<()> {
    let path = path.as_ref();
    let io_error = |source| MhsError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_error)?);
    write_report(&mut out, result).map_err(io_error)?;
    out.flush().map_err(io_error)?;
    tracing::info!(path = %path.display(), solutions = result.solutions.len(), "report written");
    Ok(())
}
