//! Backtracking search over an explicit priority frontier.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::time::{Duration, Instant};

use log::debug;

use super::config::{BacktrackingConfig, Propagation, ValueOrdering, VarOrdering};
use crate::error::CspError;
use crate::model::BinaryCsp;

/// Terminal outcome of a backtracking run.
///
/// Exhausting the frontier is a normal, reportable outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<V> {
    /// The first complete, valid assignment popped from the frontier.
    Solved(Vec<V>),
    /// The frontier emptied without reaching a solution.
    NoSolution,
}

impl<V> SearchOutcome<V> {
    /// The solution assignment, if one was found.
    pub fn solution(&self) -> Option<&[V]> {
        match self {
            SearchOutcome::Solved(values) => Some(values),
            SearchOutcome::NoSolution => None,
        }
    }

    /// Whether a solution was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }
}

/// Result of a backtracking run.
#[derive(Debug, Clone)]
pub struct SearchResult<V> {
    /// Terminal outcome.
    pub outcome: SearchOutcome<V>,
    /// Number of frontier entries popped and examined.
    pub expansions: usize,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// Frontier priority, popped lowest first.
///
/// Realizes the key `unassigned + rank / siblings`: the unassigned count
/// dominates, so deeper instantiations always come first (depth-first
/// behavior); among equal depths the sibling rank fraction preserves the
/// requested child order, compared exactly by cross multiplication; the
/// insertion sequence breaks remaining ties FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Priority {
    unassigned: usize,
    rank: usize,
    siblings: usize,
    seq: u64,
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unassigned
            .cmp(&other.unassigned)
            .then_with(|| (self.rank * other.siblings).cmp(&(other.rank * self.siblings)))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Entry<V> {
    priority: Priority,
    problem: BinaryCsp<V>,
}

impl<V> PartialEq for Entry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<V> Eq for Entry<V> {}

impl<V> Ord for Entry<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

impl<V> PartialOrd for Entry<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Executes complete backtracking search.
#[derive(Debug, Clone, Copy)]
pub struct BacktrackingRunner;

impl BacktrackingRunner {
    /// Searches for a solution of `problem` under the configured
    /// propagation mode and ordering heuristics.
    ///
    /// The frontier simulates depth-first recursion explicitly, so the
    /// traversal order is fully determined by [`Priority`]'s comparator
    /// and remains caller-visible through the expansion count. Each
    /// candidate value clones the problem; clones that propagate to an
    /// empty domain are pruned before ever entering the frontier. A root
    /// that is already inconsistent reports [`SearchOutcome::NoSolution`]
    /// with zero expansions.
    ///
    /// # Errors
    ///
    /// Propagates [`CspError`] from model operations; a well-formed
    /// problem only assigns values taken from current domains, so an
    /// error here indicates a logic bug, not an unsolvable instance.
    pub fn run<V>(
        mut problem: BinaryCsp<V>,
        config: &BacktrackingConfig,
    ) -> Result<SearchResult<V>, CspError>
    where
        V: Clone + PartialEq + fmt::Debug,
    {
        let start = Instant::now();

        match config.propagation {
            Propagation::None => problem.disable_propagation(),
            Propagation::ForwardChecking => {
                debug!("using forward checking");
                problem.enable_forward_checking();
            }
            Propagation::ArcConsistency => {
                debug!("using arc consistency; running initial pass over all arcs");
                problem.check_all_arcs();
                problem.enable_arc_consistency();
            }
        }

        let mut frontier: BinaryHeap<Reverse<Entry<V>>> = BinaryHeap::new();
        let mut expansions = 0usize;
        let mut seq = 0u64;

        if problem.is_consistent() {
            frontier.push(Reverse(Entry {
                priority: Priority {
                    unassigned: 0,
                    rank: 0,
                    siblings: 1,
                    seq,
                },
                problem,
            }));
            seq += 1;
        }

        while let Some(Reverse(entry)) = frontier.pop() {
            let instantiation = entry.problem;
            expansions += 1;

            if instantiation.is_complete() {
                // A complete but invalid assignment can only arise when
                // propagation was disabled or incomplete; discard it.
                if instantiation.is_solution() {
                    if let Some(values) = instantiation.complete_assignment() {
                        debug!("solution found after {expansions} expansions");
                        return Ok(SearchResult {
                            outcome: SearchOutcome::Solved(values),
                            expansions,
                            elapsed: start.elapsed(),
                        });
                    }
                }
            } else if let Some(var) = pick_next_var(&instantiation, config.var_ordering) {
                let mut children = Vec::new();
                for value in instantiation.domain(var).to_vec() {
                    let mut child = instantiation.clone();
                    child.assign(var, value)?;
                    if child.is_consistent() {
                        children.push(child);
                    }
                }
                order_values(&mut children, config.value_ordering);

                let siblings = children.len();
                for (rank, child) in children.into_iter().enumerate() {
                    frontier.push(Reverse(Entry {
                        priority: Priority {
                            unassigned: child.unassigned_count(),
                            rank,
                            siblings,
                            seq,
                        },
                        problem: child,
                    }));
                    seq += 1;
                }
            }
        }

        debug!("frontier exhausted after {expansions} expansions; no solution");
        Ok(SearchResult {
            outcome: SearchOutcome::NoSolution,
            expansions,
            elapsed: start.elapsed(),
        })
    }
}

/// Chooses the next variable to assign; `None` when all are assigned.
fn pick_next_var<V>(problem: &BinaryCsp<V>, ordering: VarOrdering) -> Option<usize>
where
    V: Clone + PartialEq + fmt::Debug,
{
    match ordering {
        VarOrdering::FirstUnassigned => {
            problem.assignment().iter().position(|value| value.is_none())
        }
        VarOrdering::MinRemainingValues => {
            let mut best: Option<(usize, usize)> = None;
            for var in 0..problem.num_vars() {
                if problem.value(var).is_none() {
                    let size = problem.domain(var).len();
                    // Strict comparison keeps the lowest index on ties.
                    if best.is_none_or(|(best_size, _)| size < best_size) {
                        best = Some((size, var));
                    }
                }
            }
            best.map(|(_, var)| var)
        }
    }
}

/// Orders surviving children in the order they should be explored.
fn order_values<V>(children: &mut [BinaryCsp<V>], ordering: ValueOrdering)
where
    V: Clone + PartialEq + fmt::Debug,
{
    match ordering {
        ValueOrdering::DomainOrder => {}
        ValueOrdering::LeastConstraining => {
            // Stable sort: ties keep domain order.
            children.sort_by_key(|child| {
                Reverse(child.domains().iter().map(Vec::len).sum::<usize>())
            });
        }
    }
}
