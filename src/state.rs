use crate::formula::{Assignment, Literal, Variable};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Value {
    True,
    False,
    Unknown,
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

/// A partial assignment over densely indexed variables `0..n`. States are
/// never mutated once built; [`ConstraintState::pin`] derives a new one.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ConstraintState {
    values: Vec<Value>,
}

impl ConstraintState {
    /// The state with every variable unknown.
    pub fn new(num_variables: usize) -> Self {
        Self {
            values: vec![Value::Unknown; num_variables],
        }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, variable: Variable) -> Value {
        self.values[variable.0]
    }

    pub fn value_of(&self, literal: &Literal) -> Value {
        match self.values[literal.idx()] {
            Value::True => {
                if literal.is_positive() {
                    Value::True
                } else {
                    Value::False
                }
            }
            Value::False => {
                if literal.is_positive() {
                    Value::False
                } else {
                    Value::True
                }
            }
            Value::Unknown => Value::Unknown,
        }
    }

    /// Returns a copy of this state with `variable` set to `value`.
    ///
    /// Panics if `variable` already holds the opposite value: callers only pin
    /// unknown variables, so reaching that is a bug in branch enumeration.
    pub fn pin(&self, variable: Variable, value: bool) -> Self {
        let value = Value::from(value);
        let current = self.values[variable.0];
        assert!(
            current == Value::Unknown || current == value,
            "cannot pin {} to {:?}, already {:?}",
            variable,
            value,
            current
        );

        let mut values = self.values.clone();
        values[variable.0] = value;
        Self { values }
    }

    /// Completes the state into a total assignment, sending unknown
    /// variables to false. `names[i]` is the caller's name for variable `i`.
    pub fn materialize_witness(&self, names: &[Variable]) -> Assignment {
        debug_assert_eq!(names.len(), self.num_variables());
        names
            .iter()
            .zip(&self.values)
            .map(|(name, value)| (*name, *value == Value::True))
            .collect()
    }
}

impl Display for ConstraintState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("[")?;
        for value in &self.values {
            f.write_str(match value {
                Value::True => "T",
                Value::False => "F",
                Value::Unknown => "?",
            })?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};

    #[test]
    fn value_of_respects_polarity() {
        let s = ConstraintState::new(3).pin(Variable(0), true).pin(Variable(1), false);

        assert_eq!(s.value_of(&p(0)), Value::True);
        assert_eq!(s.value_of(&n(0)), Value::False);
        assert_eq!(s.value_of(&p(1)), Value::False);
        assert_eq!(s.value_of(&n(1)), Value::True);
        assert_eq!(s.value_of(&p(2)), Value::Unknown);
        assert_eq!(s.value_of(&n(2)), Value::Unknown);
    }

    #[test]
    fn pin_leaves_parent_untouched() {
        let parent = ConstraintState::new(2);
        let child = parent.pin(Variable(1), true);

        assert_eq!(parent.value(Variable(1)), Value::Unknown);
        assert_eq!(child.value(Variable(1)), Value::True);
        assert_eq!(child.value(Variable(0)), Value::Unknown);
        assert_ne!(parent, child);
        assert_eq!(child.to_string(), "[?T]");
    }

    #[test]
    fn pin_same_value_is_allowed() {
        let s = ConstraintState::new(1).pin(Variable(0), false);
        assert_eq!(s.pin(Variable(0), false), s);
    }

    #[test]
    #[should_panic(expected = "cannot pin")]
    fn pin_conflicting_value_panics() {
        let s = ConstraintState::new(1).pin(Variable(0), false);
        let _ = s.pin(Variable(0), true);
    }

    #[test]
    fn witness_defaults_unknown_to_false() {
        let s = ConstraintState::new(3).pin(Variable(1), true);
        let names = [Variable(4), Variable(5), Variable(9)];
        let witness = s.materialize_witness(&names);

        assert_eq!(s.num_variables(), 3);
        assert_eq!(witness.len(), 3);
        assert_eq!(witness.get(&Variable(4)), Some(false));
        assert_eq!(witness.get(&Variable(5)), Some(true));
        assert_eq!(witness.get(&Variable(9)), Some(false));
    }
}
