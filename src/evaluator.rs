use crate::formula::{Clause, Variable};
use crate::state::{ConstraintState, Value};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClauseStatus {
    Satisfied,
    Falsified,
    Undetermined,
}

/// Classifies `clause` under `state`. A tautological clause is satisfied by
/// every state, even one where its variable is still unknown.
pub fn classify(state: &ConstraintState, clause: &Clause) -> ClauseStatus {
    if clause.is_tautology() {
        return ClauseStatus::Satisfied;
    }

    let mut undetermined = false;
    for literal in clause.literals() {
        match state.value_of(literal) {
            // true => this clause is satisfied
            Value::True => return ClauseStatus::Satisfied,
            Value::False => {}
            Value::Unknown => undetermined = true,
        }
    }
    if undetermined {
        ClauseStatus::Undetermined
    } else {
        ClauseStatus::Falsified
    }
}

/// The single-variable pins that would each satisfy `clause`, one per
/// unknown literal, in the clause's literal order. Repeated literals give one
/// pin.
pub fn branches(state: &ConstraintState, clause: &Clause) -> Vec<(Variable, bool)> {
    debug_assert_eq!(classify(state, clause), ClauseStatus::Undetermined);

    let mut pins: Vec<(Variable, bool)> = Vec::with_capacity(3);
    for literal in clause.literals() {
        if state.value_of(literal) != Value::Unknown {
            continue;
        }
        let pin = (*literal.variable(), literal.satisfying_value());
        if !pins.contains(&pin) {
            pins.push(pin);
        }
    }
    pins
}
