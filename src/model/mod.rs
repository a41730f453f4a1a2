//! The constraint model and its propagation primitives.
//!
//! # Key Components
//!
//! - **Table**: [`ConstraintTable`] — one predicate per constrained pair,
//!   stored under the canonical `(i, j)` key with `i < j` and queried
//!   through an orientation-aware lookup.
//! - **Problem**: [`BinaryCsp`] — domains, partial assignment, the shared
//!   table, and the consistency/conflict queries search is built on.
//! - **Propagation**: arc enforcement, worklist arc consistency, and
//!   forward checking, implemented on [`BinaryCsp`].
//!
//! # Design
//!
//! The table is immutable after construction and shared by reference
//! across every problem clone produced during search; clones own only
//! their domains and assignment. Search algorithms live in the
//! [`backtracking`](crate::backtracking) and [`local`](crate::local)
//! modules and touch the model exclusively through this public contract.

mod constraints;
mod problem;
mod propagation;

pub use constraints::{ConstraintFn, ConstraintTable, Oriented};
pub use problem::BinaryCsp;
