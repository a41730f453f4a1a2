//! Complete backtracking search.
//!
//! Explores partial assignments through an explicit min-priority frontier
//! whose comparator yields depth-first order, with pluggable variable and
//! value ordering heuristics and a per-assignment propagation mode. Every
//! branch works on its own clone of the problem; the first complete,
//! valid assignment popped wins, and an emptied frontier is the normal
//! "no solution" outcome.
//!
//! # References
//!
//! - Russell & Norvig, *Artificial Intelligence: A Modern Approach*,
//!   ch. 6 (backtracking search, MRV, LCV, forward checking)
//! - Mackworth (1977), "Consistency in Networks of Relations" (AC-3)

mod config;
mod runner;

pub use config::{BacktrackingConfig, Propagation, ValueOrdering, VarOrdering};
pub use runner::{BacktrackingRunner, SearchOutcome, SearchResult};
