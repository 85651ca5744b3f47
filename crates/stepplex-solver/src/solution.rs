use crate::number::Rational;

/// Optimal basic solution read off a finished phase-two tableau
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Value of every structural variable, `values[k]` is `x(k+1)`
    pub values: Vec<Rational>,
    /// Objective value in the problem's own sense
    pub objective: Rational,
    /// Variable label basic in each constraint row
    pub basis: Vec<usize>,
}

/// Where a session stands after its latest operation
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Pivot candidates remain
    Continuing,
    /// An optimal solution was found
    Optimal,
    /// The constraints cannot be satisfied together
    Infeasible,
    /// The objective can improve without bound
    Unbounded,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Continuing)
    }
}
