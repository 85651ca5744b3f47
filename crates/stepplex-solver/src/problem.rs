use crate::error::SolverError;
use crate::number::Rational;

/// Optimization direction of an [`LpProblem`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// Represents a linear program in equality form
///
/// All variables are implicitly non-negative. Inequalities must already have
/// been turned into equalities (slack/surplus columns) by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Whether to minimize or maximize
    pub sense: Sense,
    /// Objective function coefficients, one per structural variable
    pub objective: Vec<Rational>,
    /// Equality constraints
    pub constraints: Vec<EqualityConstraint>,
}

/// `coefficients · x = rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityConstraint {
    /// Coefficients for each variable
    pub coefficients: Vec<Rational>,
    /// Right-hand side value
    pub rhs: Rational,
}

impl LpProblem {
    pub fn new(sense: Sense, objective: Vec<Rational>) -> Self {
        Self {
            sense,
            objective,
            constraints: Vec::new(),
        }
    }

    pub fn add_constraint(&mut self, coefficients: Vec<Rational>, rhs: Rational) {
        self.constraints.push(EqualityConstraint { coefficients, rhs });
    }

    /// Builder form of [`LpProblem::add_constraint`].
    pub fn with_constraint(mut self, coefficients: Vec<Rational>, rhs: Rational) -> Self {
        self.add_constraint(coefficients, rhs);
        self
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Reject problems whose dimensions disagree before any tableau is built.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.objective.is_empty() {
            return Err(SolverError::MalformedInput(
                "objective function has no coefficients".to_string(),
            ));
        }
        if self.constraints.is_empty() {
            return Err(SolverError::MalformedInput("problem has no constraints".to_string()));
        }
        let n = self.num_variables();
        for (i, c) in self.constraints.iter().enumerate() {
            if c.coefficients.len() != n {
                return Err(SolverError::MalformedInput(format!(
                    "constraint {} has {} coefficients, expected {}",
                    i + 1,
                    c.coefficients.len(),
                    n
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::integer;

    #[test]
    fn test_validate_accepts_matching_dimensions() {
        let problem = LpProblem::new(Sense::Maximize, vec![integer(3), integer(2)])
            .with_constraint(vec![integer(1), integer(1)], integer(4));
        assert_eq!(problem.validate(), Ok(()));
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 1);
    }

    #[test]
    fn test_validate_rejects_short_constraint() {
        let problem = LpProblem::new(Sense::Minimize, vec![integer(1), integer(1)])
            .with_constraint(vec![integer(1)], integer(4));
        match problem.validate() {
            Err(SolverError::MalformedInput(msg)) => assert!(msg.contains("constraint 1")),
            other => panic!("Expected malformed input, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_problem() {
        let no_vars = LpProblem::new(Sense::Minimize, Vec::new());
        assert!(matches!(no_vars.validate(), Err(SolverError::MalformedInput(_))));

        let no_rows = LpProblem::new(Sense::Minimize, vec![integer(1)]);
        assert!(matches!(no_rows.validate(), Err(SolverError::MalformedInput(_))));
    }
}
