use crate::error::SolverError;
use crate::pivot_rule::{PivotRule, RandomPivot};
use crate::problem::LpProblem;
use crate::session::Session;
use crate::solution::Solution;

/// Solves a whole problem in one call by auto-stepping a [`Session`]
pub struct Solver {
    /// Maximum pivots before giving up
    max_steps: usize,
    /// Seed for the random pivot choice, `None` for a fresh one per solve
    seed: Option<u64>,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            seed: None,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Solve the LP problem using the two-phase tableau method
    pub fn solve(&self, problem: &LpProblem) -> Result<Solution, SolverError> {
        let seed = self.seed.unwrap_or_else(rand::random);
        self.solve_with(problem, &mut RandomPivot::seeded(seed))
    }

    /// Solve, letting `rule` pick every pivot
    pub fn solve_with<P: PivotRule + ?Sized>(
        &self,
        problem: &LpProblem,
        rule: &mut P,
    ) -> Result<Solution, SolverError> {
        let mut session = Session::new(problem)?;
        session.run(rule, self.max_steps)?;
        session.solution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::{integer, Rational};
    use crate::pivot_rule::FirstPivot;
    use crate::problem::Sense;

    fn ints(values: &[i64]) -> Vec<Rational> {
        values.iter().map(|&v| integer(v)).collect()
    }

    #[test]
    fn test_simple_maximization() {
        // Maximize: 3x + 2y
        // Subject to (slacks s1..s3 already added):
        //   x + y + s1 = 4
        //   x + s2     = 3
        //   y + s3     = 3
        // Optimal: x=3, y=1, obj=11
        let problem = LpProblem::new(Sense::Maximize, ints(&[3, 2, 0, 0, 0]))
            .with_constraint(ints(&[1, 1, 1, 0, 0]), integer(4))
            .with_constraint(ints(&[1, 0, 0, 1, 0]), integer(3))
            .with_constraint(ints(&[0, 1, 0, 0, 1]), integer(3));

        for seed in 0..10 {
            let solution = Solver::new().with_seed(seed).solve(&problem).unwrap();
            assert_eq!(solution.values, ints(&[3, 1, 0, 0, 2]), "seed {}", seed);
            assert_eq!(solution.objective, integer(11), "seed {}", seed);
        }
    }

    #[test]
    fn test_minimization_with_surplus() {
        // Minimize: 2x + 3y
        // Subject to:
        //   x + y - s1 = 4
        //   x + s2     = 3
        //   y + s3     = 3
        // Optimal: x=3, y=1, obj=9
        let problem = LpProblem::new(Sense::Minimize, ints(&[2, 3, 0, 0, 0]))
            .with_constraint(ints(&[1, 1, -1, 0, 0]), integer(4))
            .with_constraint(ints(&[1, 0, 0, 1, 0]), integer(3))
            .with_constraint(ints(&[0, 1, 0, 0, 1]), integer(3));

        let solution = Solver::new().with_seed(3).solve(&problem).unwrap();
        assert_eq!(solution.values[..2], ints(&[3, 1])[..]);
        assert_eq!(solution.objective, integer(9));
    }

    #[test]
    fn test_infeasible() {
        // x - s1 = 5, x + s2 = 3
        let problem = LpProblem::new(Sense::Minimize, ints(&[1, 0, 0]))
            .with_constraint(ints(&[1, -1, 0]), integer(5))
            .with_constraint(ints(&[1, 0, 1]), integer(3));

        let result = Solver::new().solve_with(&problem, &mut FirstPivot);
        assert_eq!(result, Err(SolverError::Infeasible));
    }

    #[test]
    fn test_step_limit() {
        let problem = LpProblem::new(Sense::Maximize, ints(&[3, 2]))
            .with_constraint(ints(&[1, 1]), integer(4))
            .with_constraint(ints(&[1, 0]), integer(2));

        let result = Solver::new().with_max_steps(0).solve(&problem);
        assert_eq!(result, Err(SolverError::StepLimit(0)));
    }
}
