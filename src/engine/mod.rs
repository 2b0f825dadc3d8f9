// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Level-wise enumeration of minimal hitting sets.
//!
//! This module implements a breadth-first search over hypotheses of
//! increasing cardinality. Level L holds candidate sets of L columns, sorted
//! in descending order (see [`Hypothesis`] for the order).
//!
//! # Algorithm
//!
//! Each level is walked once, in order:
//! 1. A hypothesis that covers every row is recorded as a solution and never
//!    expanded.
//! 2. The empty hypothesis expands into one singleton per column.
//! 3. A hypothesis whose leftmost member is column 0 is kept, untouched, as a
//!    sibling for later hypotheses.
//! 4. Any other hypothesis `h` first compacts the visited frontier to the
//!    hypotheses `<= h.global_initial()`, then generates its children.
//!
//! Children are canonical extensions: a child of `h` adds exactly one column
//! strictly left of `h`'s leftmost member, so every candidate has a single
//! parent. A child is kept only if all of its other immediate subsets
//! (the siblings of `h` that contain the new column) are still on the
//! frontier, i.e. were generated and turned out not to be solutions. Their
//! coverage vectors, together with `h`'s, make up the child's coverage, so
//! the matrix is never rescanned above level 1.
//!
//! # Termination
//!
//! The search ends when a level produces no children, when a wall-clock
//! deadline passes, when a [`CancellationToken`] is raised, or (in
//! measurement mode) as soon as a second solution is recorded. Deadline and
//! token are polled once per visited hypothesis.
//!
//! # Example
//!
//! ```
//! use mhs_search::engine::{EngineOptions, SearchEngine};
//! use mhs_search::matrix::Matrix;
//!
//! let matrix = Matrix::from_u8_rows(&[&[1, 0, 1], &[0, 1, 1]]);
//! let outcome = SearchEngine::new(&matrix, EngineOptions::default()).search();
//! assert!(!outcome.stopped());
//! let found: Vec<String> = outcome.solutions.iter().map(|s| s.to_string()).collect();
//! assert_eq!(found, vec!["001", "110"]);
//! ```

pub mod cancel;
mod frontier;

pub use cancel::CancellationToken;

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::bits::BitVector;
use crate::hypothesis::Hypothesis;
use crate::matrix::Matrix;
use crate::state::{Counters, Statistics};
use frontier::Frontier;

/// Engine-level options.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Wall-clock budget for the search.
    pub time_limit: Option<Duration>,
    /// Abort as soon as two solutions are recorded (timing measurements only).
    pub stop_after_second_solution: bool,
    /// External stop request.
    pub cancellation: Option<CancellationToken>,
}

impl EngineOptions {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_stop_after_second_solution(mut self, stop: bool) -> Self {
        self.stop_after_second_solution = stop;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Why the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every level was explored; the solutions are exhaustive.
    Exhausted,
    /// The time budget ran out.
    TimedOut,
    /// The cancellation token was raised.
    Cancelled,
    /// Measurement mode stopped at the second solution.
    SecondSolution,
    /// The level ceiling `max(M, N)` was passed with a non-empty frontier.
    LevelLimit,
}

impl Termination {
    /// True when the solutions found are not guaranteed to be all of them.
    pub fn is_partial(self) -> bool {
        self != Termination::Exhausted
    }
}

/// Result of a search over one matrix.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Minimal hitting sets over the searched matrix's columns, in discovery order.
    pub solutions: Vec<BitVector>,
    /// Time from the start of the search to each solution, parallel to `solutions`.
    pub solution_times: Vec<Duration>,
    pub termination: Termination,
    pub statistics: Statistics,
    pub elapsed: Duration,
}

impl SearchOutcome {
    pub fn stopped(&self) -> bool {
        self.termination.is_partial()
    }

    /// Time to the first solution, if one was found.
    pub fn first_solution_time(&self) -> Option<Duration> {
        self.solution_times.first().copied()
    }

    /// Time to the second solution, if two were found.
    pub fn second_solution_time(&self) -> Option<Duration> {
        self.solution_times.get(1).copied()
    }
}

/// Search engine over one matrix.
///
/// The engine owns the frontier pair (current level and next level) and
/// touches them only from its own loop; there is no shared mutable state.
pub struct SearchEngine<'m> {
    matrix: &'m Matrix,
    options: EngineOptions,
    statistics: Statistics,
    solutions: Vec<BitVector>,
    solution_times: Vec<Duration>,
    started: Instant,
    deadline: Option<Instant>,
}

impl<'m> SearchEngine<'m> {
    pub fn new(matrix: &'m Matrix, options: EngineOptions) -> Self {
        Self {
            matrix,
            options,
            statistics: Statistics::new(),
            solutions: Vec::new(),
            solution_times: Vec::new(),
            started: Instant::now(),
            deadline: None,
        }
    }

    /// Run the search to completion or until stopped.
    ///
    /// Consumes the engine; solutions found before a stop are always returned.
    pub fn search(mut self) -> SearchOutcome {
        let started = Instant::now();
        self.started = started;
        self.deadline = self.options.time_limit.map(|limit| started + limit);

        let termination = self.run();
        let elapsed = started.elapsed();
        match termination {
            Termination::Exhausted => info!(
                solutions = self.solutions.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "search complete"
            ),
            other => warn!(
                ?other,
                solutions = self.solutions.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "search stopped early"
            ),
        }
        debug!(statistics = %self.statistics, "search statistics");

        SearchOutcome {
            solutions: self.solutions,
            solution_times: self.solution_times,
            termination,
            statistics: self.statistics,
            elapsed,
        }
    }

    fn run(&mut self) -> Termination {
        let matrix = self.matrix;
        let ceiling = matrix.rows().max(matrix.columns());
        let mut current = vec![Hypothesis::empty(matrix)];
        let mut level = 0;

        while !current.is_empty() {
            if level > ceiling {
                return Termination::LevelLimit;
            }
            self.statistics.record_level(current.len());
            debug!(level, frontier = current.len(), "starting level");

            let mut visited = Frontier::new();
            let mut next: Vec<Hypothesis> = Vec::new();

            for h in current {
                if let Some(stop) = self.poll() {
                    return stop;
                }
                self.statistics.increment_counter(Counters::HypothesesVisited);

                if h.is_solution(matrix) {
                    self.record_solution(&h);
                    if self.options.stop_after_second_solution && self.solutions.len() >= 2 {
                        return Termination::SecondSolution;
                    }
                    continue;
                }

                match h.leftmost_set_bit() {
                    None => next.extend((0..matrix.columns()).map(|c| Hypothesis::singleton(matrix, c))),
                    Some(0) => {}
                    Some(leftmost) => {
                        let threshold = h.global_initial();
                        let dropped = visited.compact_to(&threshold);
                        if dropped > 0 {
                            self.statistics.increment_counter(Counters::Compactions);
                            self.statistics.add(Counters::CompactedAway, dropped as u64);
                        }
                        // With nothing greater than h left, no sibling exists.
                        if !visited.is_empty() {
                            self.generate_children(&h, leftmost, &visited, &mut next);
                        }
                    }
                }
                visited.push(h);
            }

            next.sort_unstable_by(|a, b| b.cmp(a));
            debug_assert!(
                next.windows(2).all(|w| w[0] > w[1]),
                "a candidate was generated by two parents"
            );
            current = next;
            level += 1;
        }
        Termination::Exhausted
    }

    fn poll(&self) -> Option<Termination> {
        if let Some(token) = &self.options.cancellation {
            if token.is_cancelled() {
                return Some(Termination::Cancelled);
            }
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Termination::TimedOut),
            _ => None,
        }
    }

    fn record_solution(&mut self, h: &Hypothesis) {
        let at = self.started.elapsed();
        debug!(solution = %h, level = h.level(), elapsed_us = at.as_micros() as u64, "found minimal hitting set");
        self.statistics.increment_counter(Counters::Solutions);
        self.solutions.push(h.value().clone());
        self.solution_times.push(at);
    }

    /// Add to `next` every canonical child of `h` whose other immediate
    /// subsets are all on the frontier.
    fn generate_children(
        &mut self,
        h: &Hypothesis,
        leftmost: usize,
        visited: &Frontier,
        next: &mut Vec<Hypothesis>,
    ) {
        let level = h.level();
        for column in 0..leftmost {
            let mut child = h.extended(column);
            child.propagate_coverage(h);

            let upper = child.initial_bound();
            let lower = child.final_bound();
            let mut siblings = 0;
            for sibling in visited.window(&upper, &lower) {
                if sibling.distance(&child) == 1 && sibling.distance(h) == 2 {
                    child.propagate_coverage(sibling);
                    siblings += 1;
                }
            }
            assert!(
                siblings <= level,
                "{} has {} siblings for child {}, at most {} possible",
                h,
                siblings,
                child,
                level
            );

            if siblings == level {
                self.statistics.increment_counter(Counters::ChildrenAccepted);
                next.push(child);
            } else {
                self.statistics.increment_counter(Counters::ChildrenRejected);
            }
        }
    }
}
