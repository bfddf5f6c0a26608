use crate::formula::{Assignment, Formula, FormulaError, Variable};

/// Formulas with more variables than this are not enumerated.
pub const MAX_ENUMERATED_VARIABLES: usize = 24;

/// One row of a truth table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub assignment: Assignment,
    pub satisfied: bool,
}

/// Every assignment of the formula's variables, in binary counting order with
/// the first variable as the low bit, paired with the formula's value.
pub fn truth_table(f: &Formula) -> Result<impl Iterator<Item = Row> + '_, FormulaError> {
    let variables = f.variables().cloned().collect::<Vec<Variable>>();
    if variables.len() > MAX_ENUMERATED_VARIABLES {
        return Err(FormulaError::TooManyToEnumerate(variables.len(), MAX_ENUMERATED_VARIABLES));
    }

    Ok((0..1u32 << variables.len()).map(move |bits| {
        let assignment = variables
            .iter()
            .enumerate()
            .map(|(x, v)| (*v, bits & (1 << x) != 0))
            .collect::<Assignment>();
        let satisfied = f.evaluate(&assignment);
        Row { assignment, satisfied }
    }))
}

/// Number of satisfying assignments.
pub fn count_models(f: &Formula) -> Result<u64, FormulaError> {
    Ok(truth_table(f)?.filter(|row| row.satisfied).count() as u64)
}

/// First satisfying assignment in truth-table order.
pub fn solve_brute_force(f: &Formula) -> Result<Option<Assignment>, FormulaError> {
    Ok(truth_table(f)?.find(|row| row.satisfied).map(|row| row.assignment))
}
