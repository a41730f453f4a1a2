//! Constraint table with canonical-key lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A binary constraint predicate over two variables' values.
///
/// The predicate returns `true` when the pair of values is *allowed*.
/// Predicates are shared (`Arc`) so that every clone of a problem refers
/// to the same table without copying it.
pub type ConstraintFn<V> = Arc<dyn Fn(&V, &V) -> bool + Send + Sync>;

/// The constraint table of a binary CSP.
///
/// Constraints are stored once per unordered pair of variables, keyed by
/// the ordered pair `(i, j)` with `i < j`. The stored predicate takes the
/// lower-indexed variable's value as its first argument. [`lookup`] hides
/// that convention: it returns an [`Oriented`] view that swaps arguments
/// transparently when queried in the other direction, so callers never
/// duplicate the swap logic.
///
/// The table never changes after problem construction.
///
/// [`lookup`]: ConstraintTable::lookup
#[derive(Clone, Default)]
pub struct ConstraintTable<V> {
    entries: HashMap<(usize, usize), ConstraintFn<V>>,
}

/// A constraint predicate viewed from a caller-chosen variable order.
#[derive(Clone)]
pub struct Oriented<'a, V> {
    predicate: &'a ConstraintFn<V>,
    swapped: bool,
}

impl<V> Oriented<'_, V> {
    /// Evaluates the predicate with `val1` belonging to the first variable
    /// passed to [`ConstraintTable::lookup`].
    pub fn satisfied(&self, val1: &V, val2: &V) -> bool {
        if self.swapped {
            (self.predicate)(val2, val1)
        } else {
            (self.predicate)(val1, val2)
        }
    }
}

impl<V> ConstraintTable<V> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds a constraint between two distinct variables.
    ///
    /// The key is normalized to `(min, max)`; `predicate` must take the
    /// lower-indexed variable's value first, as written by the caller for
    /// the `(var1, var2)` order given here.
    ///
    /// # Panics
    ///
    /// Panics if `var1 == var2`; a binary constraint relates two distinct
    /// variables.
    pub fn insert<F>(&mut self, var1: usize, var2: usize, predicate: F)
    where
        F: Fn(&V, &V) -> bool + Send + Sync + 'static,
        V: 'static,
    {
        assert_ne!(var1, var2, "constraint requires two distinct variables");
        let predicate: ConstraintFn<V> = Arc::new(predicate);
        let entry = if var1 < var2 {
            ((var1, var2), predicate)
        } else {
            // Normalize orientation: stored predicate sees (low, high).
            ((var2, var1), Arc::new(move |a: &V, b: &V| predicate(b, a)) as ConstraintFn<V>)
        };
        let _ = self.entries.insert(entry.0, entry.1);
    }

    /// Returns whether a constraint exists between the two variables.
    pub fn contains(&self, var1: usize, var2: usize) -> bool {
        self.entries.contains_key(&canonical(var1, var2))
    }

    /// Looks up the constraint between two variables, oriented so that the
    /// first argument of [`Oriented::satisfied`] is `var1`'s value.
    pub fn lookup(&self, var1: usize, var2: usize) -> Option<Oriented<'_, V>> {
        self.entries.get(&canonical(var1, var2)).map(|predicate| Oriented {
            predicate,
            swapped: var1 > var2,
        })
    }

    /// Number of stored constraints (one per constrained pair).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no constraints.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the canonical `(i, j)` pairs, `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries.keys().copied()
    }
}

fn canonical(var1: usize, var2: usize) -> (usize, usize) {
    (var1.min(var2), var1.max(var2))
}

impl<V> fmt::Debug for ConstraintTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintTable")
            .field("constraints", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn less_than(table: &mut ConstraintTable<i32>, a: usize, b: usize) {
        table.insert(a, b, |x, y| x < y);
    }

    #[test]
    fn test_lookup_in_stored_orientation() {
        let mut table = ConstraintTable::new();
        less_than(&mut table, 0, 1);

        let c = table.lookup(0, 1).unwrap();
        assert!(c.satisfied(&1, &2));
        assert!(!c.satisfied(&2, &1));
    }

    #[test]
    fn test_lookup_swaps_arguments() {
        let mut table = ConstraintTable::new();
        less_than(&mut table, 0, 1);

        // Queried as (1, 0): first argument is now variable 1's value.
        let c = table.lookup(1, 0).unwrap();
        assert!(c.satisfied(&2, &1));
        assert!(!c.satisfied(&1, &2));
    }

    #[test]
    fn test_insert_normalizes_key() {
        let mut table = ConstraintTable::new();
        // Inserted as (2, 0): predicate written for (var 2's value, var 0's value).
        table.insert(2, 0, |x: &i32, y: &i32| x < y);

        assert!(table.contains(0, 2));
        assert_eq!(table.pairs().collect::<Vec<_>>(), vec![(0, 2)]);

        // Looking up as (2, 0) must agree with how it was written.
        let c = table.lookup(2, 0).unwrap();
        assert!(c.satisfied(&1, &5));
        // And (0, 2) sees the swapped view.
        let c = table.lookup(0, 2).unwrap();
        assert!(c.satisfied(&5, &1));
        assert!(!c.satisfied(&1, &5));
    }

    #[test]
    fn test_missing_pair() {
        let table: ConstraintTable<i32> = ConstraintTable::new();
        assert!(table.lookup(0, 1).is_none());
        assert!(!table.contains(0, 1));
        assert!(table.is_empty());
    }

    #[test]
    #[should_panic(expected = "distinct")]
    fn test_self_constraint_panics() {
        let mut table = ConstraintTable::new();
        table.insert(1, 1, |x: &i32, y: &i32| x == y);
    }
}
