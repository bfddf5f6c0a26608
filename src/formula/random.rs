use crate::formula::{Clause, Formula, FormulaError, Literal, Variable};
use rand::seq::index;
use rand::Rng;

/// Generates a random 3-CNF formula over variables `1..=num_variables`.
/// Each clause mentions three distinct variables, each negated with
/// probability 1/2.
pub fn random_3sat<R: Rng + ?Sized>(
    rng: &mut R,
    num_variables: usize,
    num_clauses: usize,
) -> Result<Formula, FormulaError> {
    if num_variables < 3 {
        return Err(FormulaError::TooFewVariables(num_variables));
    }

    let clauses = (0..num_clauses)
        .map(|_| {
            let literals = index::sample(&mut *rng, num_variables, 3)
                .into_iter()
                .map(|i| {
                    let var = Variable(i + 1);
                    if rng.gen_bool(0.5) {
                        Literal::Negative(var)
                    } else {
                        Literal::Positive(var)
                    }
                })
                .collect::<Vec<_>>();
            Clause::from_literals(literals)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut formula = Formula::new(clauses);
    for x in 1..=num_variables {
        formula.declare(Variable(x));
    }
    Ok(formula)
}
