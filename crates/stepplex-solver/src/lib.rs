mod error;
mod history;
mod number;
mod pivot_rule;
mod problem;
mod session;
mod simplex;
mod solution;
mod tableau;

pub use error::SolverError;
pub use history::History;
pub use number::{integer, ratio, Rational};
pub use pivot_rule::{FirstPivot, PivotRule, RandomPivot};
pub use problem::{EqualityConstraint, LpProblem, Sense};
pub use session::Session;
pub use simplex::Solver;
pub use solution::{Solution, Status};
pub use tableau::{Phase, Pivot, Tableau};
