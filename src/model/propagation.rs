//! Domain narrowing: arc enforcement, worklist arc consistency, forward
//! checking.
//!
//! An *arc* is a directed pair `(tail, head)`. Enforcing it removes every
//! tail value with no supporting head value. Forward checking enforces
//! only the arcs incident on a just-assigned variable; full arc
//! consistency propagates shrinkage through a worklist until a fixpoint.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use super::problem::BinaryCsp;
use crate::error::CspError;

impl<V> BinaryCsp<V>
where
    V: Clone + PartialEq + fmt::Debug,
{
    /// Enforces the arc `tail -> head`: removes every value from `tail`'s
    /// domain that conflicts with all values in `head`'s domain.
    ///
    /// Returns whether the tail domain shrank. A pair with no constraint
    /// is a no-op returning `false`.
    pub fn enforce_arc(&mut self, tail: usize, head: usize) -> bool {
        if !self.constraints.contains(tail, head) {
            return false;
        }

        let supported: Vec<V> = self.domains[tail]
            .iter()
            .filter(|&tail_val| {
                self.domains[head]
                    .iter()
                    .any(|head_val| !self.conflicted(tail, Some(tail_val), head, Some(head_val)))
            })
            .cloned()
            .collect();

        let reduced = supported.len() < self.domains[tail].len();
        self.domains[tail] = supported;
        reduced
    }

    /// Runs worklist arc consistency starting from `initial` arcs.
    ///
    /// Whenever enforcing `(tail, head)` shrinks the tail domain, every
    /// arc `(other, tail)` is re-enqueued, since the shrunken domain may
    /// invalidate support that was previously established for arcs
    /// pointing into `tail`. Pending arcs are de-duplicated. Terminates
    /// because domains are finite and only ever shrink.
    pub fn run_arc_consistency(&mut self, initial: Vec<(usize, usize)>) {
        let mut pending: HashSet<(usize, usize)> = initial.iter().copied().collect();
        let mut queue: VecDeque<(usize, usize)> = initial.into();

        while let Some((tail, head)) = queue.pop_front() {
            let _ = pending.remove(&(tail, head));
            if self.enforce_arc(tail, head) {
                for other in 0..self.num_vars() {
                    if other != tail && pending.insert((other, tail)) {
                        queue.push_back((other, tail));
                    }
                }
            }
        }
    }

    /// Makes the whole problem arc consistent by seeding the worklist with
    /// every ordered pair of distinct variables.
    ///
    /// Used once as global pre-processing before arc-consistency-mode
    /// search.
    pub fn check_all_arcs(&mut self) {
        let n = self.num_vars();
        let all = (0..n)
            .flat_map(|tail| (0..n).filter(move |&head| head != tail).map(move |head| (tail, head)))
            .collect();
        self.run_arc_consistency(all);
    }

    /// Forward checking for a just-assigned variable: enforces the arc
    /// `(other, var)` for every other variable.
    ///
    /// Equivalent to arc consistency restricted to arcs incident on
    /// `var` without re-propagation. Cheaper than the full worklist,
    /// weaker pruning.
    ///
    /// # Errors
    ///
    /// [`CspError::ForwardCheckOnUnassigned`] if `var` has no value.
    pub fn forward_check(&mut self, var: usize) -> Result<(), CspError> {
        if self.value(var).is_none() {
            return Err(CspError::ForwardCheckOnUnassigned(var));
        }
        for tail in 0..self.num_vars() {
            if tail != var {
                let _ = self.enforce_arc(tail, var);
            }
        }
        Ok(())
    }
}
