use tracing::{debug, info};

use crate::error::SolverError;
use crate::history::History;
use crate::pivot_rule::PivotRule;
use crate::problem::LpProblem;
use crate::solution::{Solution, Status};
use crate::tableau::{Phase, Pivot, Tableau};

/// One problem being walked through the two-phase method.
///
/// Owns the live tableau and its own undo history. Every mutating call either
/// completes or leaves the session untouched.
#[derive(Debug, Clone)]
pub struct Session {
    tableau: Tableau,
    history: History,
    candidates: Vec<Pivot>,
    status: Status,
    steps: usize,
}

impl Session {
    /// Validate `problem` and build its phase-one tableau.
    ///
    /// A tableau that is already terminal is resolved right away, so the
    /// session may start out in phase two or finished.
    pub fn new(problem: &LpProblem) -> Result<Self, SolverError> {
        problem.validate()?;

        let mut session = Self {
            tableau: Tableau::phase_one(problem),
            history: History::new(),
            candidates: Vec::new(),
            status: Status::Continuing,
            steps: 0,
        };
        debug!(
            variables = problem.num_variables(),
            constraints = problem.num_constraints(),
            "built phase one tableau"
        );
        session.settle();
        Ok(session)
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn phase(&self) -> Phase {
        self.tableau.phase()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Pivots the next [`step`](Session::step) accepts. Empty once finished.
    pub fn candidates(&self) -> &[Pivot] {
        &self.candidates
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Pivots applied and not undone.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Apply one of the current candidates.
    pub fn step(&mut self, pivot: Pivot) -> Result<Status, SolverError> {
        if !self.candidates.contains(&pivot) {
            return Err(SolverError::InvalidPivot {
                row: pivot.row,
                column: pivot.column,
            });
        }

        self.history.record(&self.tableau);
        self.tableau.pivot(pivot);
        self.steps += 1;
        debug!(
            row = pivot.row,
            column = pivot.column,
            phase = ?self.tableau.phase(),
            step = self.steps,
            "pivot applied"
        );

        self.settle();
        Ok(self.status)
    }

    /// Candidate `rule` would take next, if any.
    pub fn suggest<P: PivotRule + ?Sized>(&self, rule: &mut P) -> Option<Pivot> {
        rule.choose(&self.candidates)
    }

    /// Step on the candidate chosen by `rule`. Without candidates the
    /// current status is returned unchanged.
    pub fn auto_step<P: PivotRule + ?Sized>(&mut self, rule: &mut P) -> Result<Status, SolverError> {
        match self.suggest(rule) {
            Some(pivot) => self.step(pivot),
            None => Ok(self.status),
        }
    }

    /// Auto-step until the session finishes, at most `max_steps` pivots.
    pub fn run<P: PivotRule + ?Sized>(&mut self, rule: &mut P, max_steps: usize) -> Result<Status, SolverError> {
        for _ in 0..max_steps {
            if self.status.is_terminal() {
                return Ok(self.status);
            }
            self.auto_step(rule)?;
        }

        if self.status.is_terminal() {
            Ok(self.status)
        } else {
            Err(SolverError::StepLimit(max_steps))
        }
    }

    /// Restore the tableau, phase included, from before the latest step.
    pub fn undo(&mut self) -> Result<(), SolverError> {
        let previous = self.history.pop().ok_or(SolverError::NothingToUndo)?;
        self.tableau = previous;
        self.steps = self.steps.saturating_sub(1);
        debug!(phase = ?self.tableau.phase(), remaining = self.history.len(), "undid step");

        self.settle();
        Ok(())
    }

    /// Optimal solution. Only available once the status is `Optimal`.
    pub fn solution(&self) -> Result<Solution, SolverError> {
        match self.status {
            Status::Optimal => Ok(Solution {
                values: self.tableau.basic_solution(),
                objective: self.tableau.objective_value(),
                basis: self.tableau.row_labels().to_vec(),
            }),
            Status::Infeasible => Err(SolverError::Infeasible),
            Status::Unbounded => Err(SolverError::Unbounded),
            Status::Continuing => Err(SolverError::NotFinished),
        }
    }

    /// Recompute status and candidates, moving to phase two when phase one
    /// has run out of pivots on a feasible basis.
    fn settle(&mut self) {
        let mut candidates = self.tableau.candidates();

        if self.tableau.phase() == Phase::One && candidates.is_empty() {
            if self.tableau.is_infeasible() {
                self.finish(Status::Infeasible);
                return;
            }
            self.tableau = self.tableau.to_phase_two();
            candidates = self.tableau.candidates();
            debug!(basis = ?self.tableau.row_labels(), "switched to phase two");
        }

        let status = match self.tableau.phase() {
            Phase::One => Status::Continuing,
            Phase::Two if !self.tableau.has_next_step() => Status::Optimal,
            Phase::Two if self.tableau.is_unbounded() => Status::Unbounded,
            Phase::Two => Status::Continuing,
        };

        if status.is_terminal() {
            self.finish(status);
        } else {
            self.status = status;
            self.candidates = candidates;
        }
    }

    fn finish(&mut self, status: Status) {
        info!(?status, steps = self.steps, "simplex walk finished");
        self.status = status;
        self.candidates.clear();
    }
}
