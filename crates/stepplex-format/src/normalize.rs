use num_traits::{One, Zero};
use stepplex_solver::{LpProblem, Rational, Solution};
use tracing::debug;

use crate::error::FormatError;
use crate::file::{ProblemFile, Relation};

/// Slack or surplus variable introduced for one inequality row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedColumn {
    /// 0-based index of the constraint it belongs to
    pub constraint: usize,
    /// 1-based variable label in the normalized problem
    pub variable: usize,
    pub relation: Relation,
}

/// Equality-form problem ready for a [`stepplex_solver::Session`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub problem: LpProblem,
    /// Variables of the file itself; the rest are `added`
    pub original_variables: usize,
    pub added: Vec<AddedColumn>,
}

impl Normalized {
    /// Values of the file's own variables, dropping slack and surplus columns.
    pub fn project(&self, solution: &Solution) -> Vec<Rational> {
        solution
            .values
            .iter()
            .take(self.original_variables)
            .cloned()
            .collect()
    }
}

impl ProblemFile {
    /// Turn every `<=` row into an equality with a slack column and every
    /// `>=` row into one with a surplus column. Added columns cost nothing.
    pub fn to_lp(&self) -> Result<Normalized, FormatError> {
        self.validate()?;

        let n = self.num_variables();
        let inequalities: Vec<(usize, Relation)> = self
            .constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| c.relation != Relation::Eq)
            .map(|(i, c)| (i, c.relation))
            .collect();
        let width = n + inequalities.len();

        let mut objective = self
            .function
            .iter()
            .map(|s| s.to_rational())
            .collect::<Result<Vec<_>, _>>()?;
        objective.resize(width, Rational::zero());

        let added: Vec<AddedColumn> = inequalities
            .iter()
            .enumerate()
            .map(|(k, &(constraint, relation))| AddedColumn {
                constraint,
                variable: n + k + 1,
                relation,
            })
            .collect();

        let mut problem = LpProblem::new(self.sense(), objective);
        for (i, c) in self.constraints.iter().enumerate() {
            let mut coefficients = c
                .coeffs
                .iter()
                .map(|s| s.to_rational())
                .collect::<Result<Vec<_>, _>>()?;
            coefficients.resize(width, Rational::zero());

            if let Some(column) = added.iter().find(|a| a.constraint == i) {
                coefficients[column.variable - 1] = match column.relation {
                    Relation::Ge => -Rational::one(),
                    _ => Rational::one(),
                };
            }
            problem.add_constraint(coefficients, c.rhs.to_rational()?);
        }

        debug!(
            variables = n,
            added = added.len(),
            constraints = problem.num_constraints(),
            "normalized problem to equality form"
        );
        Ok(Normalized {
            problem,
            original_variables: n,
            added,
        })
    }
}
