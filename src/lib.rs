//! A 3-SAT engine that folds clauses one at a time into a frontier of
//! partial assignments, pruning every assignment a clause falsifies.

pub mod brute_force;
pub mod evaluator;
pub mod formula;
pub mod propagation;
mod solver;
pub mod state;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn witness(&self) -> Option<&Assignment> {
        match self {
            SatResult::Satisfiable(w) => Some(w),
            SatResult::Unsatisfiable => None,
        }
    }
}

pub use formula::{Assignment, Clause, Formula, FormulaError, Literal, Variable};
pub use solver::{SolveError, Solver, SolverConfig};
