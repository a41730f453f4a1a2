//! Backtracking configuration: propagation mode and ordering heuristics.

use std::str::FromStr;

use crate::error::CspError;

/// Domain-filtering mode applied on every assignment during search.
///
/// Exactly one mode is active per run. `ArcConsistency` additionally runs
/// one global pass over all arcs before search starts.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Plain backtracking: domains are only collapsed by assignment.
    #[default]
    None,
    /// Re-filter every other variable's domain against each assignment.
    ForwardChecking,
    /// Worklist arc consistency seeded with arcs into each assigned
    /// variable, after a global pre-processing pass.
    ArcConsistency,
}

impl FromStr for Propagation {
    type Err = CspError;

    /// Parses the mode names accepted at option-parsing boundaries:
    /// `"none"`, `"fc"`, `"ac"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Propagation::None),
            "fc" => Ok(Propagation::ForwardChecking),
            "ac" => Ok(Propagation::ArcConsistency),
            other => Err(CspError::UnknownPropagation(other.to_owned())),
        }
    }
}

/// Strategy for choosing the next variable to assign.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarOrdering {
    /// First unassigned variable by index (static order).
    #[default]
    FirstUnassigned,
    /// Unassigned variable with the smallest current domain, ties broken
    /// by lowest index.
    MinRemainingValues,
}

/// Strategy for ordering a variable's candidate instantiations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrdering {
    /// Try values in domain order.
    #[default]
    DomainOrder,
    /// Least constraining value: prefer children leaving the largest
    /// total remaining domain size across all variables.
    LeastConstraining,
}

/// Configuration for [`BacktrackingRunner`](super::BacktrackingRunner).
///
/// # Examples
///
/// ```
/// use binary_csp::backtracking::{BacktrackingConfig, Propagation, VarOrdering};
///
/// let config = BacktrackingConfig::default()
///     .with_propagation(Propagation::ForwardChecking)
///     .with_var_ordering(VarOrdering::MinRemainingValues);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingConfig {
    /// Propagation mode.
    pub propagation: Propagation,
    /// Variable ordering heuristic.
    pub var_ordering: VarOrdering,
    /// Value ordering heuristic.
    pub value_ordering: ValueOrdering,
}

impl BacktrackingConfig {
    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }

    pub fn with_var_ordering(mut self, ordering: VarOrdering) -> Self {
        self.var_ordering = ordering;
        self
    }

    pub fn with_value_ordering(mut self, ordering: ValueOrdering) -> Self {
        self.value_ordering = ordering;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("none".parse::<Propagation>().unwrap(), Propagation::None);
        assert_eq!("fc".parse::<Propagation>().unwrap(), Propagation::ForwardChecking);
        assert_eq!("ac".parse::<Propagation>().unwrap(), Propagation::ArcConsistency);
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = "bogus".parse::<Propagation>().unwrap_err();
        assert_eq!(err, CspError::UnknownPropagation("bogus".into()));
    }

    #[test]
    fn test_builder() {
        let config = BacktrackingConfig::default()
            .with_propagation(Propagation::ArcConsistency)
            .with_var_ordering(VarOrdering::MinRemainingValues)
            .with_value_ordering(ValueOrdering::LeastConstraining);
        assert_eq!(config.propagation, Propagation::ArcConsistency);
        assert_eq!(config.var_ordering, VarOrdering::MinRemainingValues);
        assert_eq!(config.value_ordering, ValueOrdering::LeastConstraining);
    }
}
