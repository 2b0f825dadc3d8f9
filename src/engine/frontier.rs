// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The visited part of a level's frontier.
//!
//! While a level is walked in descending order, every non-solution hypothesis
//! that has been visited is kept here, still in descending order. All the
//! siblings a hypothesis needs to build its children are greater than it, so
//! they have already been visited (and removed, if they were solutions) by
//! the time they are looked up.

use crate::hypothesis::Hypothesis;

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    hypotheses: Vec<Hypothesis>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.hypotheses.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    /// Append a visited hypothesis. It must be smaller than every hypothesis
    /// already present.
    pub(crate) fn push(&mut self, hypothesis: Hypothesis) {
        if let Some(last) = self.hypotheses.last() {
            assert!(
                *last > hypothesis,
                "Frontier out of order: {} pushed after {}",
                hypothesis,
                last
            );
        }
        self.hypotheses.push(hypothesis);
    }

    /// Keep only the hypotheses `<= threshold`. Returns how many were dropped.
    ///
    /// The survivors form a suffix; they are moved into a fresh list which
    /// replaces the old one.
    pub(crate) fn compact_to(&mut self, threshold: &Hypothesis) -> usize {
        let cut = self.hypotheses.partition_point(|h| h > threshold);
        if cut > 0 {
            self.hypotheses = self.hypotheses.split_off(cut);
        }
        cut
    }

    /// The contiguous run of hypotheses `h` with `lower <= h <= upper`.
    pub(crate) fn window(&self, upper: &Hypothesis, lower: &Hypothesis) -> &[Hypothesis] {
        assert!(upper >= lower, "Window bounds inverted: {} < {}", upper, lower);
        let start = self.hypotheses.partition_point(|h| h > upper);
        let end = self.hypotheses.partition_point(|h| h >= lower);
        assert!(start <= end && end <= self.hypotheses.len());
        &self.hypotheses[start..end]
    }
}
