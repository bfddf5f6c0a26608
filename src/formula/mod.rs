pub mod dimacs;
pub mod random;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }

    /// The value the variable must take for this literal to be true.
    pub fn satisfying_value(&self) -> bool {
        self.is_positive()
    }

    pub fn evaluate(&self, value: bool) -> bool {
        value == self.is_positive()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(v) => write!(f, "{}", v),
            Literal::Negative(v) => write!(f, "!{}", v),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormulaError {
    #[error("clause has {0} literals, expected exactly 3")]
    ClauseWidth(usize),
    #[error("need at least 3 variables to build a 3-CNF clause, got {0}")]
    TooFewVariables(usize),
    #[error("{0} variables is too many to enumerate, limit is {1}")]
    TooManyToEnumerate(usize, usize),
    #[error("no value given for {0}")]
    Unassigned(Variable),
    #[error("invalid assignment literal '{0}'")]
    BadAssignment(String),
}

/// A disjunction of exactly three literals.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: [Literal; 3],
}

impl Clause {
    pub fn new(a: Literal, b: Literal, c: Literal) -> Self {
        Self { literals: [a, b, c] }
    }

    pub fn from_literals(disjuncts: impl IntoIterator<Item = Literal>) -> Result<Self, FormulaError> {
        let literals = disjuncts.into_iter().collect::<Vec<_>>();
        match literals.as_slice() {
            [a, b, c] => Ok(Self::new(*a, *b, *c)),
            _ => Err(FormulaError::ClauseWidth(literals.len())),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// True if the clause holds a literal together with its complement.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .enumerate()
            .any(|(i, l)| self.literals[i + 1..].contains(&l.negated()))
    }

    /// Evaluates the clause under a total assignment. Variables missing from
    /// the assignment make their literals false.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        self.literals.iter().any(|l| match assignment.get(l.variable()) {
            Some(value) => l.evaluate(value),
            None => false,
        })
    }

    fn rename(&self, rewrite: &BTreeMap<Variable, Variable>) -> Self {
        let rename = |l: &Literal| match l {
            Literal::Positive(v) => Literal::Positive(rewrite[v]),
            Literal::Negative(v) => Literal::Negative(rewrite[v]),
        };
        Self::new(rename(&self.literals[0]), rename(&self.literals[1]), rename(&self.literals[2]))
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let [a, b, c] = &self.literals;
        write!(f, "({} | {} | {})", a, b, c)
    }
}

/// A conjunction of clauses together with every variable it mentions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
    variables: BTreeSet<Variable>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let clauses = conjuncts.into_iter().collect::<Vec<_>>();
        let variables = clauses
            .iter()
            .flat_map(|clause| clause.literals().map(|literal| *literal.variable()))
            .collect();
        Self { clauses, variables }
    }

    /// Registers a variable even if no clause mentions it.
    pub fn declare(&mut self, variable: Variable) {
        self.variables.insert(variable);
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| clause.evaluate(assignment))
    }

    /// Like [`Formula::evaluate`], but every variable of the formula must be
    /// given a value.
    pub fn check(&self, assignment: &Assignment) -> Result<bool, FormulaError> {
        if let Some(missing) = self.variables.iter().find(|v| assignment.get(v).is_none()) {
            return Err(FormulaError::Unassigned(*missing));
        }
        Ok(self.evaluate(assignment))
    }

    /// Renames variables so they are densely indexed from 0, in ascending
    /// order of the original names. Returns the original variable for each
    /// new index.
    pub fn canonicalize(&mut self) -> Vec<Variable> {
        let original = self.variables.iter().cloned().collect::<Vec<_>>();
        let rewrite = original
            .iter()
            .enumerate()
            .map(|(i, v)| (*v, Variable(i)))
            .collect::<BTreeMap<_, _>>();
        self.clauses = self.clauses.iter().map(|clause| clause.rename(&rewrite)).collect();
        self.variables = rewrite.values().cloned().collect();
        original
    }

    pub(crate) fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("true");
        }
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// A total TRUE/FALSE assignment, keyed by the caller's variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment(BTreeMap<Variable, bool>);

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, variable: Variable, value: bool) {
        self.0.insert(variable, value);
    }

    pub fn get(&self, variable: &Variable) -> Option<bool> {
        self.0.get(variable).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &bool)> {
        self.0.iter()
    }
}

impl std::iter::FromIterator<(Variable, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Variable, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reads DIMACS-style signed literals such as `1 -2 3`, optionally prefixed
/// by `v` and terminated by `0`. Commas also separate literals.
impl FromStr for Assignment {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut assignment = Assignment::new();
        for token in s.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty()) {
            if token == "v" {
                continue;
            }
            let l = token
                .parse::<isize>()
                .map_err(|_| FormulaError::BadAssignment(token.to_string()))?;
            if l == 0 {
                break;
            }
            assignment.set(Variable(l.unsigned_abs()), l > 0);
        }
        Ok(assignment)
    }
}

/// Prints the assignment as a DIMACS `v` line.
impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("v")?;
        for (variable, value) in &self.0 {
            if *value {
                write!(f, " {}", variable.0)?;
            } else {
                write!(f, " -{}", variable.0)?;
            }
        }
        f.write_str(" 0")
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

#[cfg(test)]
pub(crate) fn clause_3sat_strategy(num_vars: usize) -> impl proptest::strategy::Strategy<Value = Clause> {
    use proptest::prelude::*;

    let literal = move || {
        (0..num_vars, any::<bool>()).prop_map(|(x, positive)| if positive { p(x) } else { n(x) })
    };
    (literal(), literal(), literal()).prop_map(|(a, b, c)| Clause::new(a, b, c))
}

/// Random 3-CNF clause lists over at most 8 variables, small enough to
/// cross-check against brute force.
#[cfg(test)]
pub(crate) fn clauses_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Vec<Clause>> {
    use proptest::prelude::*;

    (1usize..=8).prop_flat_map(|num_vars| prop::collection::vec(clause_3sat_strategy(num_vars), 0..24))
}

#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    clauses_3sat_strategy().prop_map(Formula::new)
}
