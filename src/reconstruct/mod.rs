// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mapping raw solutions back to the original column space.
//!
//! The engine reports solutions over the reduced, possibly permuted, matrix.
//! Reconstruction
//! - maps each reduced column to its original index (undoing permutation),
//! - multiplies a solution by every way of swapping a representative for one
//!   of the columns it stood in for (duplicate expansion),
//! - widens the result to the original column count, where the all-false
//!   columns removed before search come back as permanently false bits.
//!
//! Duplicate expansion is a Cartesian product and can explode; above
//! [`MAX_COMBINATIONS`] the equivalents of that raw solution are skipped and
//! the overflow is reported instead.

use tracing::warn;

use crate::bits::BitVector;
use crate::preprocess::Reduction;

/// Upper bound on the equivalents generated from one raw solution.
pub const MAX_COMBINATIONS: usize = 1_000_000;

/// A raw solution whose duplicate expansion was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionOverflow {
    /// Index of the raw solution in the engine's output.
    pub solution_index: usize,
    /// The solution, in original column indexing, with representatives only.
    pub solution: BitVector,
    /// Number of combinations it would have produced (saturating).
    pub combinations: usize,
}

/// Reconstructed solutions.
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    /// Solutions over the original columns. Not sorted by cardinality.
    pub solutions: Vec<BitVector>,
    pub overflows: Vec<ReconstructionOverflow>,
}

impl Reconstruction {
    /// True when some equivalents were not generated.
    pub fn stopped(&self) -> bool {
        !self.overflows.is_empty()
    }
}

pub struct SolutionReconstructor<'r> {
    reduction: &'r Reduction,
    limit: usize,
}

impl<'r> SolutionReconstructor<'r> {
    pub fn new(reduction: &'r Reduction) -> Self {
        Self::with_limit(reduction, MAX_COMBINATIONS)
    }

    pub fn with_limit(reduction: &'r Reduction, limit: usize) -> Self {
        Self { reduction, limit }
    }

    /// Reconstruct every raw solution.
    pub fn reconstruct(&self, raw: &[BitVector]) -> Reconstruction {
        let mut result = Reconstruction::default();
        for (index, solution) in raw.iter().enumerate() {
            self.expand_into(index, solution, &mut result);
        }
        result
    }

    fn expand_into(&self, index: usize, raw: &BitVector, result: &mut Reconstruction) {
        let origin = self.reduction.column_origin();
        assert_eq!(
            raw.width(),
            origin.len(),
            "Raw solution has {} columns, reduced matrix has {}",
            raw.width(),
            origin.len()
        );

        // One list of alternatives per member, representative first.
        let classes: Vec<Vec<usize>> = raw
            .iter_ones()
            .map(|j| {
                let representative = origin[j];
                let mut class = vec![representative];
                class.extend_from_slice(self.reduction.duplicates_of(representative));
                class
            })
            .collect();

        let combinations = classes
            .iter()
            .try_fold(1usize, |acc, class| acc.checked_mul(class.len()))
            .unwrap_or(usize::MAX);

        let representatives: Vec<usize> = classes.iter().map(|class| class[0]).collect();
        result.solutions.push(self.render(&representatives));

        if combinations > self.limit {
            let solution = self.render(&representatives);
            warn!(
                solution_index = index,
                %solution,
                combinations,
                limit = self.limit,
                "duplicate expansion abandoned"
            );
            result.overflows.push(ReconstructionOverflow {
                solution_index: index,
                solution,
                combinations,
            });
            return;
        }

        // Odometer over the classes; the all-zero reading (representatives
        // only) has been emitted above.
        let mut choice = vec![0usize; classes.len()];
        let mut members = representatives;
        loop {
            let mut position = 0;
            while position < classes.len() {
                choice[position] += 1;
                if choice[position] < classes[position].len() {
                    break;
                }
                choice[position] = 0;
                position += 1;
            }
            if position == classes.len() {
                break;
            }
            for (slot, (class, &pick)) in members.iter_mut().zip(classes.iter().zip(&choice)) {
                *slot = class[pick];
            }
            result.solutions.push(self.render(&members));
        }
    }

    /// Widen to the original column count. Deleted columns are never members,
    /// so they come back as false bits.
    fn render(&self, members: &[usize]) -> BitVector {
        let solution = BitVector::from_indices(self.reduction.original_columns(), members);
        debug_assert!(self
            .reduction
            .deleted_columns()
            .iter()
            .all(|&c| !solution.contains(c)));
        solution
    }
}
