use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Invalid pivot: ({row}, {column}) is not a current candidate")]
    InvalidPivot { row: usize, column: usize },
    #[error("No feasible solution")]
    Infeasible,
    #[error("Objective is unbounded")]
    Unbounded,
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("The simplex walk has not finished yet")]
    NotFinished,
    #[error("Step limit of {0} reached before termination")]
    StepLimit(usize),
}
