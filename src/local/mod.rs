//! Incomplete local search: iterative repair over complete assignments.
//!
//! Starts from a complete (typically conflicted) assignment and repeatedly
//! reassigns one variable at a time — min-conflicts by default — until a
//! solution appears. An optional annealing schedule mixes in random steps
//! to escape local minima. The search is incomplete: it cannot prove
//! unsatisfiability and can cycle on hard instances, so runs are bounded
//! by the configured iteration budget (or by the caller).
//!
//! # References
//!
//! - Minton et al. (1992), "Minimizing conflicts: a heuristic repair
//!   method for constraint satisfaction and scheduling problems"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated
//!   Annealing"

mod config;
mod runner;

pub use config::{Initialization, LocalSearchConfig, Schedule, ValueSelection, VarSelection};
pub use runner::{LocalSearchResult, LocalSearchRunner};
