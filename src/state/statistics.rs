// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are owned by the search engine and incremented as hypotheses
//! are visited, expanded and pruned.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(Debug, EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    HypothesesVisited,
    Solutions,
    ChildrenAccepted,
    ChildrenRejected,
    Compactions,
    CompactedAway,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
    /// Frontier size at the start of each level, indexed by level.
    level_sizes: Vec<usize>,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment_counter(&mut self, counter: Counters) {
        self.add(counter, 1);
    }

    pub(crate) fn add(&mut self, counter: Counters, amount: u64) {
        self.stats[counter as usize] += amount;
    }

    pub(crate) fn record_level(&mut self, frontier_size: usize) {
        self.level_sizes.push(frontier_size);
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    pub fn level_sizes(&self) -> &[usize] {
        &self.level_sizes
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counters::iter() {
            let name: &'static str = counter.into();
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", name, self.get(counter))?;
        }
        Ok(())
    }
}
