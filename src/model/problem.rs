//! The binary CSP problem: domains, partial assignment, consistency queries.

use std::fmt;
use std::sync::Arc;

use super::constraints::ConstraintTable;
use crate::error::CspError;

/// A binary constraint satisfaction problem with a partial assignment.
///
/// Variables are the integers `0..n`. `domains[i]` holds the candidate
/// values still considered possible for variable `i`; `assignment[i]` holds
/// its chosen value, or `None` while unassigned. Constraints relate pairs
/// of variables through a shared, immutable [`ConstraintTable`].
///
/// Cloning deep-copies domains and assignment and shares the constraint
/// table, which is how backtracking search branches: every branch owns its
/// own `{domains, assignment}` snapshot and never aliases mutable state.
///
/// Two propagation flags control what [`assign`] does after setting a
/// value: forward checking re-filters every other domain against the
/// assigned variable; arc consistency re-runs the worklist over all arcs
/// pointing into it. At most one flag is active at a time; both off means
/// plain assignment.
///
/// # Examples
///
/// ```
/// use binary_csp::model::{BinaryCsp, ConstraintTable};
///
/// let mut table = ConstraintTable::new();
/// table.insert(0, 1, |a: &i32, b: &i32| a != b);
/// let mut problem = BinaryCsp::new(vec![vec![1, 2], vec![1, 2]], table);
///
/// problem.assign(0, 1).unwrap();
/// assert_eq!(problem.count_conflicts(1, &1), 1);
/// assert_eq!(problem.count_conflicts(1, &2), 0);
/// ```
///
/// [`assign`]: BinaryCsp::assign
#[derive(Clone)]
pub struct BinaryCsp<V> {
    pub(crate) domains: Vec<Vec<V>>,
    pub(crate) assignment: Vec<Option<V>>,
    pub(crate) constraints: Arc<ConstraintTable<V>>,
    forward_checking: bool,
    arc_consistency: bool,
}

impl<V> BinaryCsp<V>
where
    V: Clone + PartialEq + fmt::Debug,
{
    /// Creates a problem with the given domains, an empty assignment, and
    /// propagation disabled.
    pub fn new(domains: Vec<Vec<V>>, constraints: ConstraintTable<V>) -> Self {
        let n = domains.len();
        Self {
            domains,
            assignment: vec![None; n],
            constraints: Arc::new(constraints),
            forward_checking: false,
            arc_consistency: false,
        }
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.assignment.len()
    }

    /// Current domain of a variable.
    pub fn domain(&self, var: usize) -> &[V] {
        &self.domains[var]
    }

    /// All current domains, indexed by variable.
    pub fn domains(&self) -> &[Vec<V>] {
        &self.domains
    }

    /// Current value of a variable, if assigned.
    pub fn value(&self, var: usize) -> Option<&V> {
        self.assignment[var].as_ref()
    }

    /// The full assignment, indexed by variable.
    pub fn assignment(&self) -> &[Option<V>] {
        &self.assignment
    }

    /// The shared constraint table.
    pub fn constraints(&self) -> &ConstraintTable<V> {
        &self.constraints
    }

    /// Number of variables still unassigned.
    pub fn unassigned_count(&self) -> usize {
        self.assignment.iter().filter(|v| v.is_none()).count()
    }

    /// Enables forward checking on assignment (and disables arc consistency).
    pub fn enable_forward_checking(&mut self) {
        self.forward_checking = true;
        self.arc_consistency = false;
    }

    /// Enables arc consistency on assignment (and disables forward checking).
    pub fn enable_arc_consistency(&mut self) {
        self.arc_consistency = true;
        self.forward_checking = false;
    }

    /// Disables propagation on assignment.
    pub fn disable_propagation(&mut self) {
        self.forward_checking = false;
        self.arc_consistency = false;
    }

    /// Assigns `value` to `var` and collapses its domain to that value.
    ///
    /// Depending on the active propagation flag, forward checking or arc
    /// consistency then narrows the other variables' domains; a domain
    /// emptied by that narrowing is *not* an error (the branch is simply
    /// no longer [consistent](Self::is_consistent)).
    ///
    /// # Errors
    ///
    /// [`CspError::ValueNotInDomain`] if `value` is not in `var`'s current
    /// domain.
    pub fn assign(&mut self, var: usize, value: V) -> Result<(), CspError> {
        if !self.domains[var].contains(&value) {
            return Err(CspError::ValueNotInDomain {
                var,
                value: format!("{value:?}"),
            });
        }
        self.assignment[var] = Some(value.clone());
        self.domains[var] = vec![value];

        if self.forward_checking {
            self.forward_check(var)?;
        } else if self.arc_consistency {
            let arcs = (0..self.num_vars())
                .filter(|&tail| tail != var)
                .map(|tail| (tail, var))
                .collect();
            self.run_arc_consistency(arcs);
        }
        Ok(())
    }

    /// Overwrites `var`'s value in place, leaving its domain and every
    /// other variable untouched. No propagation runs.
    ///
    /// This is the iterative-repair write used by local search, which
    /// moves over *complete* assignments and needs full domains to stay
    /// available.
    ///
    /// # Errors
    ///
    /// [`CspError::ValueNotInDomain`] if `value` is not in `var`'s domain.
    pub fn set_value(&mut self, var: usize, value: V) -> Result<(), CspError> {
        if !self.domains[var].contains(&value) {
            return Err(CspError::ValueNotInDomain {
                var,
                value: format!("{value:?}"),
            });
        }
        self.assignment[var] = Some(value);
        Ok(())
    }

    /// Returns whether `var1 = val1, var2 = val2` violates a constraint.
    ///
    /// `false` if either value is `None` or no constraint exists between
    /// the pair. The lookup is canonicalized, so
    /// `conflicted(a, va, b, vb) == conflicted(b, vb, a, va)`.
    pub fn conflicted(
        &self,
        var1: usize,
        val1: Option<&V>,
        var2: usize,
        val2: Option<&V>,
    ) -> bool {
        let (Some(val1), Some(val2)) = (val1, val2) else {
            return false;
        };
        match self.constraints.lookup(var1, var2) {
            Some(constraint) => !constraint.satisfied(val1, val2),
            None => false,
        }
    }

    /// Number of other variables whose currently assigned value conflicts
    /// with `var = val`.
    pub fn count_conflicts(&self, var: usize, val: &V) -> usize {
        (0..self.num_vars())
            .filter(|&other| other != var)
            .filter(|&other| self.conflicted(var, Some(val), other, self.assignment[other].as_ref()))
            .count()
    }

    /// Total number of violated constraints under the current assignment.
    ///
    /// Each violated pair shows up in both variables' per-variable counts,
    /// so the doubled sum is halved.
    pub fn total_conflicts(&self) -> usize {
        let doubled: usize = (0..self.num_vars())
            .map(|var| match self.assignment[var].as_ref() {
                Some(val) => self.count_conflicts(var, val),
                None => 0,
            })
            .sum();
        doubled / 2
    }

    /// Whether every variable has a value.
    pub fn is_complete(&self) -> bool {
        self.assignment.iter().all(|v| v.is_some())
    }

    /// Whether no domain is empty.
    ///
    /// An inconsistent problem marks a dead search branch, not an error.
    pub fn is_consistent(&self) -> bool {
        self.domains.iter().all(|d| !d.is_empty())
    }

    /// Whether the assignment is complete and satisfies every constraint.
    pub fn is_solution(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        self.constraints.pairs().all(|(a, b)| {
            !self.conflicted(a, self.assignment[a].as_ref(), b, self.assignment[b].as_ref())
        })
    }

    /// The assigned values, if the assignment is complete.
    pub fn complete_assignment(&self) -> Option<Vec<V>> {
        self.assignment.iter().cloned().collect()
    }
}

impl<V: fmt::Debug> fmt::Debug for BinaryCsp<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryCsp")
            .field("domains", &self.domains)
            .field("assignment", &self.assignment)
            .field("constraints", &self.constraints)
            .field("forward_checking", &self.forward_checking)
            .field("arc_consistency", &self.arc_consistency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // 3 variables over 0..5: var0 < var1, var1 != var2, var2 unconstrained
    // against var0.
    fn chain() -> BinaryCsp<i32> {
        let mut table = ConstraintTable::new();
        table.insert(0, 1, |a: &i32, b: &i32| a < b);
        table.insert(1, 2, |a: &i32, b: &i32| a != b);
        BinaryCsp::new(vec![(0..5).collect(); 3], table)
    }

    #[test]
    fn test_assign_collapses_domain() {
        let mut p = chain();
        p.assign(0, 3).unwrap();
        assert_eq!(p.value(0), Some(&3));
        assert_eq!(p.domain(0), &[3]);
        // No propagation configured: other domains untouched.
        assert_eq!(p.domain(1).len(), 5);
    }

    #[test]
    fn test_assign_outside_domain() {
        let mut p = chain();
        let err = p.assign(0, 9).unwrap_err();
        assert_eq!(
            err,
            CspError::ValueNotInDomain {
                var: 0,
                value: "9".into()
            }
        );
        assert_eq!(p.value(0), None);
    }

    #[test]
    fn test_conflicted() {
        let p = chain();
        assert!(p.conflicted(0, Some(&4), 1, Some(&2)));
        assert!(!p.conflicted(0, Some(&1), 1, Some(&2)));
        // Swapped query order evaluates the same constraint.
        assert!(p.conflicted(1, Some(&2), 0, Some(&4)));
        // Unassigned or unconstrained pairs never conflict.
        assert!(!p.conflicted(0, None, 1, Some(&2)));
        assert!(!p.conflicted(0, Some(&1), 1, None));
        assert!(!p.conflicted(0, Some(&4), 2, Some(&4)));
    }

    #[test]
    fn test_count_and_total_conflicts() {
        let mut p = chain();
        p.assign(0, 4).unwrap();
        p.assign(1, 2).unwrap();
        p.assign(2, 2).unwrap();
        // var1 = 2 violates both of its constraints.
        assert_eq!(p.count_conflicts(1, &2), 2);
        assert_eq!(p.count_conflicts(0, &4), 1);
        assert_eq!(p.count_conflicts(0, &1), 0);
        assert_eq!(p.total_conflicts(), 2);
    }

    #[test]
    fn test_total_conflicts_ignores_unassigned() {
        let mut p = chain();
        p.assign(1, 2).unwrap();
        assert_eq!(p.total_conflicts(), 0);
    }

    #[test]
    fn test_set_value_keeps_domain() {
        let mut p = chain();
        p.set_value(0, 3).unwrap();
        assert_eq!(p.value(0), Some(&3));
        assert_eq!(p.domain(0).len(), 5);
        assert!(p.set_value(0, 9).is_err());
    }

    #[test]
    fn test_completeness_and_solution() {
        let mut p = chain();
        assert!(!p.is_complete());
        assert!(!p.is_solution());
        p.assign(0, 1).unwrap();
        p.assign(1, 2).unwrap();
        p.assign(2, 3).unwrap();
        assert!(p.is_complete());
        assert!(p.is_solution());
        assert_eq!(p.complete_assignment(), Some(vec![1, 2, 3]));

        let mut q = chain();
        q.assign(0, 4).unwrap();
        q.assign(1, 2).unwrap();
        q.assign(2, 3).unwrap();
        assert!(q.is_complete());
        assert!(!q.is_solution());
    }

    #[test]
    fn test_consistency() {
        let mut p = chain();
        assert!(p.is_consistent());
        p.domains[1].clear();
        assert!(!p.is_consistent());
    }

    #[test]
    fn test_clone_is_independent_but_shares_table() {
        let mut p = chain();
        p.assign(0, 1).unwrap();
        let mut branch = p.clone();
        branch.assign(1, 3).unwrap();

        assert_eq!(p.value(1), None);
        assert_eq!(p.domain(1).len(), 5);
        assert!(Arc::ptr_eq(&p.constraints, &branch.constraints));
    }

    #[test]
    fn test_propagation_flags_are_exclusive() {
        let mut p = chain();
        p.enable_forward_checking();
        p.enable_arc_consistency();
        assert!(p.arc_consistency);
        assert!(!p.forward_checking);
        p.enable_forward_checking();
        assert!(!p.arc_consistency);
        p.disable_propagation();
        assert!(!p.forward_checking && !p.arc_consistency);
    }

    proptest! {
        #[test]
        fn prop_conflicted_is_symmetric(
            var1 in 0usize..3,
            var2 in 0usize..3,
            val1 in 0i32..5,
            val2 in 0i32..5,
        ) {
            let p = chain();
            prop_assert_eq!(
                p.conflicted(var1, Some(&val1), var2, Some(&val2)),
                p.conflicted(var2, Some(&val2), var1, Some(&val1))
            );
        }
    }
}
