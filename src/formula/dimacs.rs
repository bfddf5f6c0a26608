use crate::formula::{Clause, Formula, FormulaError, Literal, Variable};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Headers declaring more variables than this are rejected before any
/// clause is read.
pub const MAX_VARIABLES: usize = 1 << 20;

/// Parses a 3-CNF formula in DIMACS format. Clauses end at each `0` and may
/// share or span lines; every clause must have exactly three literals, and the
/// clause count must match the header. Every variable in `1..=num_variables`
/// is declared on the formula whether or not a clause mentions it.
pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut pending = vec![];
    let mut header = None;

    'lines: for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"%") => break,
            Some(&"p") => {
                if header.is_some() {
                    return Err(DimacsParseError::Format("duplicate 'p' line".into()));
                }
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;
                if num_variables > MAX_VARIABLES {
                    return Err(DimacsParseError::TooManyVariables(num_variables, MAX_VARIABLES));
                }

                let num_clauses = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?;

                header = Some((num_variables, num_clauses));
            }
            Some(_) => {
                let (num_variables, _) =
                    header.ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;

                for x in line {
                    if x == "%" {
                        break 'lines;
                    }
                    match parse_literal(x, num_variables)? {
                        Some(l) => pending.push(l),
                        None => clauses.push(Clause::from_literals(pending.drain(..))?),
                    }
                }
            }
        }
    }

    let (num_variables, num_clauses) =
        header.ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;

    if !pending.is_empty() {
        return Err(DimacsParseError::Format(format!(
            "input ends inside a clause ({} literals without a terminating 0)",
            pending.len()
        )));
    }
    if clauses.len() != num_clauses {
        return Err(DimacsParseError::Format(format!(
            "header declares {} clauses, found {}",
            num_clauses,
            clauses.len()
        )));
    }

    let mut formula = Formula::new(clauses);
    for x in 1..=num_variables {
        formula.declare(Variable(x));
    }
    Ok(formula)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn parse_literal(s: &str, num_variables: usize) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<isize>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    let x = l.unsigned_abs();
    if x > num_variables {
        return Err(DimacsParseError::UndeclaredVariable(x, num_variables));
    }
    if l > 0 {
        Ok(Some(Literal::Positive(Variable(x))))
    } else if l < 0 {
        Ok(Some(Literal::Negative(Variable(x))))
    } else {
        Ok(None)
    }
}

#[derive(Debug, Error)]
pub enum DimacsParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("format error: {0}")]
    Format(String),
    #[error("variable {0} is outside the declared range 1..={1}")]
    UndeclaredVariable(usize, usize),
    #[error("header declares {0} variables, at most {1} are supported")]
    TooManyVariables(usize, usize),
    #[error(transparent)]
    Formula(#[from] FormulaError),
}
