use crate::evaluator::{branches, classify, ClauseStatus};
use crate::formula::Clause;
use crate::state::ConstraintState;
use log::trace;
use std::collections::HashSet;

/// The constraint states consistent with every clause folded in so far.
#[derive(Debug)]
pub struct Frontier {
    states: Vec<ConstraintState>,
    dedup: bool,
}

impl Frontier {
    /// The frontier before any clause is folded: a single all-unknown state.
    pub fn new(num_variables: usize, dedup: bool) -> Self {
        Self {
            states: vec![ConstraintState::new(num_variables)],
            dedup,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = &ConstraintState> {
        self.states.iter()
    }

    pub fn first(&self) -> Option<&ConstraintState> {
        self.states.first()
    }

    /// Folds `clause` into the frontier. Satisfied states carry over, falsified
    /// ones are dropped, and undetermined ones are replaced by one child per
    /// way of satisfying the clause.
    pub fn fold(&mut self, clause: &Clause) {
        let mut next = Vec::with_capacity(self.states.len());
        let mut seen = HashSet::new();
        let dedup = self.dedup;
        let mut keep = |state: ConstraintState, next: &mut Vec<ConstraintState>| {
            if !dedup || seen.insert(state.clone()) {
                next.push(state);
            }
        };

        for state in self.states.drain(..) {
            match classify(&state, clause) {
                ClauseStatus::Satisfied => keep(state, &mut next),
                ClauseStatus::Falsified => trace!("pruned {} on {}", state, clause),
                ClauseStatus::Undetermined => {
                    for (variable, value) in branches(&state, clause) {
                        let child = state.pin(variable, value);
                        trace!("branch {} -> {} on {}", state, child, clause);
                        keep(child, &mut next);
                    }
                }
            }
        }

        self.states = next;
    }
}
