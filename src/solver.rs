use crate::formula::{Clause, Formula, Variable};
use crate::propagation::Frontier;
use crate::SatResult;
use log::debug;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Abort once the frontier holds more than this many states.
    pub max_frontier: Option<usize>,
    /// Merge structurally identical states in the frontier.
    pub dedup: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_frontier: None,
            dedup: true,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("frontier grew to {size} states after clause {clause}, limit is {limit}")]
    FrontierLimit { clause: usize, size: usize, limit: usize },
}

/// Decides a 3-CNF formula by folding its clauses, left to right, into a
/// frontier of partial assignments.
pub struct Solver {
    clauses: Vec<Clause>,
    // original variable for each dense index
    variable_map: Vec<Variable>,
    config: SolverConfig,
    frontier_sizes: Vec<usize>,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        Self::with_config(formula, SolverConfig::default())
    }

    pub fn with_config(mut formula: Formula, config: SolverConfig) -> Self {
        let variable_map = formula.canonicalize();
        Self {
            clauses: formula.into_clauses(),
            variable_map,
            config,
            frontier_sizes: vec![],
        }
    }

    pub fn solve(&mut self) -> Result<SatResult, SolveError> {
        self.frontier_sizes.clear();
        let mut frontier = Frontier::new(self.variable_map.len(), self.config.dedup);

        for (idx, clause) in self.clauses.iter().enumerate() {
            frontier.fold(clause);
            self.frontier_sizes.push(frontier.len());
            match frontier.first() {
                Some(example) => debug!(
                    "after clause {} {}: {} constraint sets, e.g. {}",
                    idx + 1,
                    clause,
                    frontier.len(),
                    example
                ),
                None => debug!("after clause {} {}: no constraint sets left", idx + 1, clause),
            }

            if frontier.is_empty() {
                return Ok(SatResult::Unsatisfiable);
            }
            if let Some(limit) = self.config.max_frontier {
                if frontier.len() > limit {
                    return Err(SolveError::FrontierLimit {
                        clause: idx + 1,
                        size: frontier.len(),
                        limit,
                    });
                }
            }
        }

        Ok(match frontier.first() {
            Some(state) => SatResult::Satisfiable(state.materialize_witness(&self.variable_map)),
            None => SatResult::Unsatisfiable,
        })
    }

    /// Frontier size after each clause folded by the last call to `solve`.
    /// Stops early if the run ended before the last clause.
    pub fn frontier_sizes(&self) -> &[usize] {
        &self.frontier_sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::{clauses_3sat_strategy, formula_3sat_strategy, n, p, Assignment};
    use proptest::prelude::*;
    use test_env_log::test;

    fn witness(f: &Formula) -> Assignment {
        match Solver::new(f.clone()).solve() {
            Ok(SatResult::Satisfiable(w)) => w,
            r => panic!("expected SAT for {}, got {:?}", f, r),
        }
    }

    fn verdict(f: Formula) -> SatResult {
        Solver::new(f).solve().expect("no frontier cap")
    }

    #[test]
    fn solve_three_clauses() {
        // (x1 | x2 | x3) & (!x1 | x2 | x4) & (x2 | !x3 | !x4)
        let f = Formula::new(vec![
            Clause::new(p(1), p(2), p(3)),
            Clause::new(n(1), p(2), p(4)),
            Clause::new(p(2), n(3), n(4)),
        ]);
        let w = witness(&f);
        assert!(f.evaluate(&w));
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn solve_contradiction() {
        let f = Formula::new(vec![Clause::new(p(1), p(1), p(1)), Clause::new(n(1), n(1), n(1))]);
        let mut solver = Solver::new(f);
        assert_eq!(solver.solve(), Ok(SatResult::Unsatisfiable));
        assert_eq!(solver.frontier_sizes(), &[1, 0]);
    }

    #[test]
    fn solve_empty() {
        let mut f = Formula::new(vec![]);
        assert_eq!(verdict(f.clone()), SatResult::Satisfiable(Assignment::new()));

        f.declare(Variable(1));
        f.declare(Variable(2));
        let expected: Assignment = vec![(Variable(1), false), (Variable(2), false)].into_iter().collect();
        assert_eq!(verdict(f), SatResult::Satisfiable(expected));
    }

    #[test]
    fn solve_tautology() {
        let f = Formula::new(vec![Clause::new(p(1), n(1), p(2))]);
        let mut solver = Solver::new(f);
        let expected: Assignment = vec![(Variable(1), false), (Variable(2), false)].into_iter().collect();
        assert_eq!(solver.solve(), Ok(SatResult::Satisfiable(expected)));
        assert_eq!(solver.frontier_sizes(), &[1]);
    }

    #[test]
    fn solve_exactly_one_false() {
        // (x1 | x2 | x3) & (!x1 | !x2 | !x3)
        let f = Formula::new(vec![Clause::new(p(1), p(2), p(3)), Clause::new(n(1), n(2), n(3))]);
        let expected: Assignment = vec![(Variable(1), true), (Variable(2), false), (Variable(3), false)]
            .into_iter()
            .collect();
        assert_eq!(verdict(f), SatResult::Satisfiable(expected));
    }

    #[test]
    fn witness_uses_original_names() {
        let f = Formula::new(vec![Clause::new(n(40), n(40), n(40)), Clause::new(p(7), p(40), p(40))]);
        let w = witness(&f);
        assert_eq!(w.get(&Variable(7)), Some(true));
        assert_eq!(w.get(&Variable(40)), Some(false));
        assert_eq!(w.get(&Variable(0)), None);
    }

    #[test]
    fn solve_failing() {
        let f = Formula::new(vec![
            Clause::new(n(1), p(1), n(7)),
            Clause::new(n(10), n(13), n(1)),
            Clause::new(n(7), n(7), n(10)),
            Clause::new(p(6), n(9), n(15)),
            Clause::new(n(2), n(1), n(1)),
            Clause::new(n(6), n(7), n(15)),
            Clause::new(p(9), p(10), p(6)),
            Clause::new(n(13), n(7), n(9)),
            Clause::new(p(9), p(15), p(15)),
        ]);
        println!("{}", f);

        let brute_force = solve_brute_force(&f).expect("few variables");
        assert_eq!(verdict(f).is_satisfiable(), brute_force.is_some());
    }

    #[test]
    fn frontier_limit_aborts() {
        let f = Formula::new(vec![Clause::new(p(0), p(1), p(2)), Clause::new(p(3), p(4), p(5))]);
        let config = SolverConfig {
            max_frontier: Some(4),
            dedup: true,
        };
        let mut solver = Solver::with_config(f.clone(), config);
        assert_eq!(
            solver.solve(),
            Err(SolveError::FrontierLimit {
                clause: 2,
                size: 9,
                limit: 4
            })
        );

        let config = SolverConfig {
            max_frontier: Some(9),
            dedup: true,
        };
        assert!(Solver::with_config(f, config).solve().is_ok());
    }

    #[test]
    fn solve_random_instances() {
        use crate::formula::random::random_3sat;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(0xf01d);
        for size in 3..10 {
            let f = random_3sat(&mut rng, size, 2 * size).unwrap();
            let r = verdict(f.clone());
            let brute_force = solve_brute_force(&f).expect("few variables");
            assert_eq!(r.is_satisfiable(), brute_force.is_some(), "{}", f);
            if let SatResult::Satisfiable(w) = r {
                assert!(f.evaluate(&w));
            }
        }
    }

    proptest! {
        #[test]
        fn proptest_solve(f in formula_3sat_strategy()) {
            let brute_force = solve_brute_force(&f).expect("few variables");
            let solver = verdict(f.clone());
            log::trace!("result = {:?}", solver);
            match solver {
                SatResult::Satisfiable(w) => {
                    prop_assert!(brute_force.is_some());
                    prop_assert!(f.evaluate(&w));
                    prop_assert_eq!(w.len(), f.num_variables());
                }
                SatResult::Unsatisfiable => prop_assert!(brute_force.is_none()),
            }
        }

        #[test]
        fn proptest_dedup_does_not_change_verdict(f in formula_3sat_strategy()) {
            let config = SolverConfig { max_frontier: None, dedup: false };
            let with = verdict(f.clone());
            let without = Solver::with_config(f, config).solve().expect("no frontier cap");
            prop_assert_eq!(with.is_satisfiable(), without.is_satisfiable());
        }

        #[test]
        fn proptest_frontier_growth(f in formula_3sat_strategy()) {
            let mut solver = Solver::new(f);
            let r = solver.solve().expect("no frontier cap");

            let mut previous = 1;
            for size in solver.frontier_sizes() {
                prop_assert!(*size <= 3 * previous);
                previous = *size;
            }
            // an empty frontier ends the run
            let sizes = solver.frontier_sizes();
            prop_assert!(sizes.iter().rev().skip(1).all(|s| *s > 0));
            prop_assert_eq!(sizes.last() == Some(&0), !r.is_satisfiable());
        }

        #[test]
        fn proptest_order_invariance(
            (clauses, shuffled) in clauses_3sat_strategy()
                .prop_flat_map(|clauses| (Just(clauses.clone()), Just(clauses).prop_shuffle()))
        ) {
            let a = verdict(Formula::new(clauses)).is_satisfiable();
            let b = verdict(Formula::new(shuffled)).is_satisfiable();
            prop_assert_eq!(a, b);
        }
    }
}
