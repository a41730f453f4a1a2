//! Iterative-repair execution loop.

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{Initialization, LocalSearchConfig, Schedule, ValueSelection, VarSelection};
use crate::error::CspError;
use crate::model::BinaryCsp;

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult<V> {
    /// Whether the final assignment satisfies every constraint. `false`
    /// only when the iteration budget ran out or no repairing move was
    /// possible.
    pub solved: bool,
    /// The final complete assignment.
    pub assignment: Vec<V>,
    /// Violated constraints remaining in the final assignment (0 when
    /// solved).
    pub conflicts: usize,
    /// Number of repair steps taken.
    pub iterations: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Executes min-conflicts local search with optional annealing.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearchRunner;

impl LocalSearchRunner {
    /// Runs iterative repair on `problem` until it is a solution or the
    /// iteration budget runs out.
    ///
    /// One mutable problem instance lives for the whole run; each
    /// iteration overwrites a single variable's value in place and never
    /// clones or touches domains. With probability `schedule(iteration)`
    /// a step changes a random variable to a random different value
    /// instead of the configured repair strategies, allowing escape from
    /// local minima.
    ///
    /// # Errors
    ///
    /// [`CspError::InvalidConfig`] for an out-of-range schedule and
    /// [`CspError::EmptyDomain`] if any domain is empty before the loop
    /// starts.
    pub fn run<V>(
        mut problem: BinaryCsp<V>,
        config: &LocalSearchConfig,
    ) -> Result<LocalSearchResult<V>, CspError>
    where
        V: Clone + PartialEq + fmt::Debug,
    {
        let start = Instant::now();
        config.validate()?;
        if !problem.is_consistent() {
            return Err(CspError::EmptyDomain);
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        initialize(&mut problem, config.initialization, &mut rng)?;

        let mut iterations = 0usize;
        let mut announced_zero = matches!(config.schedule, Schedule::Zero);

        while !problem.is_solution() {
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                debug!("iteration budget exhausted after {iterations} iterations");
                break;
            }

            let random_step = config.schedule.probability(iterations) > rng.random::<f64>();
            let chosen = if random_step {
                let var = rng.random_range(0..problem.num_vars());
                pick_value(&problem, var, ValueSelection::Random, &mut rng).map(|v| (var, v))
            } else {
                match pick_variable(&problem, config.var_selection, &mut rng) {
                    Some(var) => {
                        pick_value(&problem, var, config.value_selection, &mut rng)
                            .map(|v| (var, v))
                    }
                    None => {
                        // Every remaining conflict sits on a variable with
                        // no alternative value; the instance cannot be
                        // repaired by single-variable moves.
                        debug!("no conflicting variable can change; stopping");
                        break;
                    }
                }
            };

            // A variable without an alternative value yields a counted
            // no-op step.
            if let Some((var, value)) = chosen {
                problem.set_value(var, value)?;
            }
            iterations += 1;

            if !announced_zero && config.schedule.probability(iterations) == 0.0 {
                announced_zero = true;
                debug!(
                    "temperature reached zero at iteration {iterations}; conflicts: {}",
                    problem.total_conflicts()
                );
            }
        }

        let solved = problem.is_solution();
        let conflicts = problem.total_conflicts();
        debug!(
            "local search finished: solved={solved}, iterations={iterations}, conflicts={conflicts}"
        );
        Ok(LocalSearchResult {
            solved,
            assignment: problem.complete_assignment().unwrap_or_default(),
            conflicts,
            iterations,
            elapsed: start.elapsed(),
        })
    }
}

/// Gives every variable an initial value, in place. Domains are left
/// untouched so later repair steps keep their full range of moves.
fn initialize<V>(
    problem: &mut BinaryCsp<V>,
    initialization: Initialization,
    rng: &mut StdRng,
) -> Result<(), CspError>
where
    V: Clone + PartialEq + fmt::Debug,
{
    for var in 0..problem.num_vars() {
        let domain = problem.domain(var);
        let value = match initialization {
            Initialization::FirstValue => domain[0].clone(),
            Initialization::RandomValue => domain[rng.random_range(0..domain.len())].clone(),
        };
        problem.set_value(var, value)?;
    }
    Ok(())
}

/// Picks the variable to change; `None` when no candidate exists.
fn pick_variable<V>(
    problem: &BinaryCsp<V>,
    selection: VarSelection,
    rng: &mut StdRng,
) -> Option<usize>
where
    V: Clone + PartialEq + fmt::Debug,
{
    match selection {
        VarSelection::Random => {
            if problem.num_vars() == 0 {
                None
            } else {
                Some(rng.random_range(0..problem.num_vars()))
            }
        }
        VarSelection::AnyConflicting => {
            let candidates: Vec<usize> = (0..problem.num_vars())
                .filter(|&var| {
                    problem.domain(var).len() > 1
                        && problem
                            .value(var)
                            .is_some_and(|val| problem.count_conflicts(var, val) > 0)
                })
                .collect();
            if candidates.is_empty() {
                None
            } else {
                Some(candidates[rng.random_range(0..candidates.len())])
            }
        }
    }
}

/// Picks a new value for `var` among the domain values different from its
/// current one; `None` when no alternative exists.
fn pick_value<V>(
    problem: &BinaryCsp<V>,
    var: usize,
    selection: ValueSelection,
    rng: &mut StdRng,
) -> Option<V>
where
    V: Clone + PartialEq + fmt::Debug,
{
    let current = problem.value(var);
    let candidates: Vec<&V> = problem
        .domain(var)
        .iter()
        .filter(|value| Some(*value) != current)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    match selection {
        ValueSelection::Random => Some(candidates[rng.random_range(0..candidates.len())].clone()),
        ValueSelection::MinConflicts => {
            // First minimum wins so ties break by domain enumeration order.
            let mut best: Option<(usize, &V)> = None;
            for value in candidates {
                let conflicts = problem.count_conflicts(var, value);
                if best.is_none_or(|(fewest, _)| conflicts < fewest) {
                    best = Some((conflicts, value));
                }
            }
            best.map(|(_, value)| value.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstraintTable;
    use crate::problems::{demo_map, nqueens};

    fn seeded(seed: u64) -> LocalSearchConfig {
        LocalSearchConfig::default()
            .with_max_iterations(10_000)
            .with_seed(seed)
    }

    #[test]
    fn test_empty_domain_precondition() {
        let problem: BinaryCsp<i32> =
            BinaryCsp::new(vec![vec![1], vec![]], ConstraintTable::new());
        let err = LocalSearchRunner::run(problem, &seeded(0)).unwrap_err();
        assert_eq!(err, CspError::EmptyDomain);
    }

    #[test]
    fn test_invalid_schedule_rejected() {
        let problem: BinaryCsp<i32> = BinaryCsp::new(vec![vec![1]], ConstraintTable::new());
        let config = seeded(0).with_schedule(Schedule::Constant(2.0));
        assert!(matches!(
            LocalSearchRunner::run(problem, &config),
            Err(CspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_already_satisfied_after_initialization() {
        // No constraints: any complete assignment is a solution.
        let problem: BinaryCsp<i32> =
            BinaryCsp::new(vec![vec![1, 2], vec![3]], ConstraintTable::new());
        let config = seeded(0).with_initialization(Initialization::FirstValue);
        let result = LocalSearchRunner::run(problem, &config).unwrap();
        assert!(result.solved);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.conflicts, 0);
        assert_eq!(result.assignment, vec![1, 3]);
    }

    #[test]
    fn test_single_repair_step() {
        // Var 1 is the only conflicting variable that can change; one
        // min-conflicts step must fix it.
        let mut table = ConstraintTable::new();
        table.insert(0, 1, |a: &i32, b: &i32| a != b);
        let problem = BinaryCsp::new(vec![vec![0], vec![0, 1]], table);
        let config = seeded(7).with_initialization(Initialization::FirstValue);

        let result = LocalSearchRunner::run(problem, &config).unwrap();
        assert!(result.solved);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.assignment, vec![0, 1]);
    }

    #[test]
    fn test_unrepairable_instance_stops() {
        // Both domains are singletons and conflict: no single-variable
        // move exists, so the loop must stop on its own even without an
        // iteration budget.
        let mut table = ConstraintTable::new();
        table.insert(0, 1, |a: &i32, b: &i32| a != b);
        let problem = BinaryCsp::new(vec![vec![0], vec![0]], table);
        let config = LocalSearchConfig::default()
            .with_initialization(Initialization::FirstValue)
            .with_seed(0);

        let result = LocalSearchRunner::run(problem, &config).unwrap();
        assert!(!result.solved);
        assert_eq!(result.conflicts, 1);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_demo_map_min_conflicts() {
        let solved = (0..5).any(|seed| {
            let result = LocalSearchRunner::run(demo_map(), &seeded(seed)).unwrap();
            if result.solved {
                assert_eq!(result.conflicts, 0);
                let mut check = demo_map();
                for (var, color) in result.assignment.iter().enumerate() {
                    check.assign(var, *color).unwrap();
                }
                assert!(check.is_solution());
            }
            result.solved
        });
        assert!(solved, "min-conflicts never solved the demo map in 5 seeded trials");
    }

    #[test]
    fn test_eight_queens_with_linear_annealing() {
        // Probabilistic property: some seed must succeed within the
        // budget, and success implies zero conflicts.
        let solved = (0..10).any(|seed| {
            let config = seeded(seed)
                .with_max_iterations(20_000)
                .with_schedule(Schedule::Linear { initial: 0.2, limit: 5_000 });
            let result = LocalSearchRunner::run(nqueens(8), &config).unwrap();
            if result.solved {
                assert_eq!(result.conflicts, 0);
                let mut check = nqueens(8);
                for (row, col) in result.assignment.iter().enumerate() {
                    check.assign(row, *col).unwrap();
                }
                assert!(check.is_solution());
            }
            result.solved
        });
        assert!(solved, "annealed min-conflicts never solved 8-queens in 10 seeded trials");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = seeded(1234);
        let a = LocalSearchRunner::run(nqueens(6), &config).unwrap();
        let b = LocalSearchRunner::run(nqueens(6), &config).unwrap();
        assert_eq!(a.solved, b.solved);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.assignment, b.assignment);
    }
}
