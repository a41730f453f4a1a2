//! Binary constraint satisfaction problems and the two classic ways to
//! solve them.
//!
//! A problem is a finite set of integer-indexed variables, each with a
//! finite candidate-value domain, related pairwise by boolean
//! constraints. The crate provides:
//!
//! - **Model** ([`model`]): the [`BinaryCsp`] problem type with its
//!   conflict/consistency queries, plus the propagation primitives —
//!   single-arc enforcement, worklist arc consistency, and forward
//!   checking.
//! - **Backtracking** ([`backtracking`]): complete search over partial
//!   assignments via an explicit priority frontier, with pluggable
//!   variable ordering (first-unassigned, MRV), value ordering (domain
//!   order, least-constraining) and propagation mode.
//! - **Local search** ([`local`]): incomplete iterative repair over
//!   complete assignments — min-conflicts with an optional annealing
//!   schedule and a seedable random source.
//! - **Problems** ([`problems`]): ready-made N-Queens, Sudoku, and
//!   map-coloring instances plus text renderers.
//!
//! # Examples
//!
//! ```
//! use binary_csp::backtracking::{BacktrackingConfig, BacktrackingRunner, Propagation};
//! use binary_csp::problems::nqueens;
//!
//! let config = BacktrackingConfig::default().with_propagation(Propagation::ForwardChecking);
//! let result = BacktrackingRunner::run(nqueens(4), &config).unwrap();
//! assert_eq!(result.outcome.solution(), Some(&[1, 3, 0, 2][..]));
//! ```
//!
//! Everything is single-threaded and synchronous. Backtracking clones
//! the problem once per candidate value; the constraint table is the one
//! piece of state shared (immutably) across clones. Runners report
//! statistics in their result types and emit [`log`] events instead of
//! printing; callers own all output.

pub mod backtracking;
pub mod error;
pub mod local;
pub mod model;
pub mod problems;

pub use error::CspError;
pub use model::{BinaryCsp, ConstraintTable};
