//! Local search configuration: strategies and annealing schedule.

use crate::error::CspError;

/// Strategy for picking the initial complete assignment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Initialization {
    /// A uniformly random value from each variable's domain.
    #[default]
    RandomValue,
    /// The first value in each variable's domain (deterministic).
    FirstValue,
}

/// Strategy for picking the variable to change next.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarSelection {
    /// A uniformly random variable among those that currently violate a
    /// constraint and have at least two domain values, so a change is
    /// possible.
    #[default]
    AnyConflicting,
    /// A uniformly random variable.
    Random,
}

/// Strategy for picking the new value for the chosen variable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueSelection {
    /// Among all values other than the current one, the value violating
    /// the fewest constraints against the currently assigned neighbors.
    /// Ties break by domain enumeration order.
    #[default]
    MinConflicts,
    /// A uniformly random different value.
    Random,
}

/// Annealing schedule: probability of a random (non-greedy) step as a
/// function of the iteration count.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Schedule {
    /// Never take a random step (pure greedy repair).
    #[default]
    Zero,
    /// A fixed probability at every iteration.
    Constant(f64),
    /// Decrease linearly from `initial` to 0 over `limit` iterations.
    Linear {
        /// Probability at iteration 0.
        initial: f64,
        /// Iteration at which the probability reaches 0.
        limit: usize,
    },
}

impl Schedule {
    /// Probability of a random step at the given iteration, in `[0, 1]`.
    pub fn probability(&self, iteration: usize) -> f64 {
        match *self {
            Schedule::Zero => 0.0,
            Schedule::Constant(p) => p,
            Schedule::Linear { initial, limit } => {
                if limit == 0 {
                    0.0
                } else {
                    initial * limit.saturating_sub(iteration) as f64 / limit as f64
                }
            }
        }
    }
}

/// Configuration for [`LocalSearchRunner`](super::LocalSearchRunner).
///
/// # Examples
///
/// ```
/// use binary_csp::local::{LocalSearchConfig, Schedule};
///
/// let config = LocalSearchConfig::default()
///     .with_schedule(Schedule::Linear { initial: 0.3, limit: 1000 })
///     .with_max_iterations(10_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSearchConfig {
    /// Initial-assignment strategy.
    pub initialization: Initialization,
    /// Variable-selection strategy.
    pub var_selection: VarSelection,
    /// Value-selection strategy.
    pub value_selection: ValueSelection,
    /// Annealing schedule. [`Schedule::Zero`] never steps randomly.
    pub schedule: Schedule,
    /// Maximum iterations before giving up. 0 = no limit; min-conflicts
    /// search is incomplete and can cycle indefinitely on hard instances
    /// without annealing, so unbounded runs are the caller's risk.
    pub max_iterations: usize,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl LocalSearchConfig {
    pub fn with_initialization(mut self, initialization: Initialization) -> Self {
        self.initialization = initialization;
        self
    }

    pub fn with_var_selection(mut self, selection: VarSelection) -> Self {
        self.var_selection = selection;
        self
    }

    pub fn with_value_selection(mut self, selection: ValueSelection) -> Self {
        self.value_selection = selection;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`CspError::InvalidConfig`] if a schedule probability lies outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<(), CspError> {
        let initial = match self.schedule {
            Schedule::Zero => return Ok(()),
            Schedule::Constant(p) => p,
            Schedule::Linear { initial, .. } => initial,
        };
        if !(0.0..=1.0).contains(&initial) {
            return Err(CspError::InvalidConfig(format!(
                "schedule probability must be in [0, 1], got {initial}"
            )));
        }
        Ok(())
    }
}
