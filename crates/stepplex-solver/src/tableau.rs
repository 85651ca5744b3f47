use num_traits::{Signed, Zero};

use crate::number::Rational;
use crate::problem::{LpProblem, Sense};

/// Stage of the two-phase method a [`Tableau`] belongs to.
///
/// Both phases share the same grid; they differ in what the objective row
/// means and in how a tableau without candidates is judged.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Driving the synthetic row variables out: the objective row is the
    /// negated column sums of the constraint rows.
    One,
    /// Optimizing the original objective over the basis phase one found.
    Two,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::One => "Basic tableau",
            Phase::Two => "Simplex tableau",
        }
    }
}

/// A cell of the grid chosen for a basis exchange (0-based coordinates).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pivot {
    pub row: usize,
    pub column: usize,
}

impl Pivot {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Jordan-exchange tableau.
///
/// Row `i` reads `x[rows[i]] = rhs(i) - Σ data[i][k] * x[columns[k]]`. The
/// last row is the objective row and the last column is the right-hand side.
/// Variable labels are 1-based: `1..=n` are the structural variables, the
/// synthetic row variables of phase one follow.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    data: Vec<Vec<Rational>>,
    columns: Vec<usize>,
    rows: Vec<usize>,
    costs: Vec<Rational>,
    sense: Sense,
    phase: Phase,
}

impl Tableau {
    /// Build the phase-one tableau. The problem must already be validated.
    pub(crate) fn phase_one(problem: &LpProblem) -> Self {
        let n_vars = problem.num_variables();
        let n_constraints = problem.num_constraints();

        // Internally we always minimize
        let costs = match problem.sense {
            Sense::Minimize => problem.objective.clone(),
            Sense::Maximize => problem.objective.iter().map(|c| -c).collect(),
        };

        let mut data = Vec::with_capacity(n_constraints + 1);
        for c in &problem.constraints {
            let mut row = c.coefficients.clone();
            row.push(c.rhs.clone());
            if c.rhs.is_negative() {
                for value in row.iter_mut() {
                    *value = -&*value;
                }
            }
            data.push(row);
        }

        let objective = (0..=n_vars)
            .map(|col| {
                let sum = data
                    .iter()
                    .fold(Rational::zero(), |acc, row: &Vec<Rational>| acc + &row[col]);
                -sum
            })
            .collect();
        data.push(objective);

        Self {
            data,
            columns: (1..=n_vars).collect(),
            rows: (n_vars + 1..=n_vars + n_constraints).collect(),
            costs,
            sense: problem.sense,
            phase: Phase::One,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Full grid including the objective row and the right-hand side column.
    pub fn grid(&self) -> &[Vec<Rational>] {
        &self.data
    }

    pub fn value(&self, row: usize, column: usize) -> &Rational {
        &self.data[row][column]
    }

    /// Variable index of every non-RHS column.
    pub fn column_labels(&self) -> &[usize] {
        &self.columns
    }

    /// Variable index basic in every constraint row.
    pub fn row_labels(&self) -> &[usize] {
        &self.rows
    }

    /// Internal (minimization) cost vector, indexed by `label - 1`.
    pub fn costs(&self) -> &[Rational] {
        &self.costs
    }

    /// Number of structural variables of the problem.
    pub fn num_variables(&self) -> usize {
        self.costs.len()
    }

    /// Grid rows, objective row included.
    pub fn num_rows(&self) -> usize {
        self.data.len()
    }

    /// Grid columns, RHS column included.
    pub fn num_columns(&self) -> usize {
        self.columns.len() + 1
    }

    fn objective_row(&self) -> &[Rational] {
        &self.data[self.rows.len()]
    }

    fn rhs_col(&self) -> usize {
        self.columns.len()
    }

    pub fn rhs(&self, row: usize) -> &Rational {
        &self.data[row][self.rhs_col()]
    }

    /// RHS entry of the objective row, in the engine's sign convention.
    pub fn objective_rhs(&self) -> &Rational {
        &self.objective_row()[self.rhs_col()]
    }

    /// Objective value of the current basic solution in the caller's sense.
    pub fn objective_value(&self) -> Rational {
        match self.sense {
            Sense::Minimize => -self.objective_rhs(),
            Sense::Maximize => self.objective_rhs().clone(),
        }
    }

    /// Cost of a variable; synthetic row variables cost nothing.
    fn cost(&self, label: usize) -> Rational {
        label
            .checked_sub(1)
            .and_then(|i| self.costs.get(i))
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    /// Every column with a negative reduced cost paired with its
    /// minimum-ratio row, in column order.
    pub fn candidates(&self) -> Vec<Pivot> {
        let objective = self.objective_row();
        (0..self.columns.len())
            .filter(|&col| objective[col].is_negative())
            .filter_map(|col| self.ratio_test(col).map(|row| Pivot::new(row, col)))
            .collect()
    }

    /// Row minimizing `rhs / entry` over strictly positive entries of `col`.
    /// Ties go to the first row.
    fn ratio_test(&self, col: usize) -> Option<usize> {
        let rhs_col = self.rhs_col();
        let mut best: Option<(usize, Rational)> = None;

        for (i, row) in self.data[..self.rows.len()].iter().enumerate() {
            if !row[col].is_positive() {
                continue;
            }
            let ratio = &row[rhs_col] / &row[col];
            let better = match &best {
                Some((_, min_ratio)) => ratio < *min_ratio,
                None => true,
            };
            if better {
                best = Some((i, ratio));
            }
        }

        best.map(|(i, _)| i)
    }

    /// Exchange the variables of `pivot.row` and `pivot.column` and prune the
    /// departed column. The caller guarantees a non-zero pivot element.
    pub(crate) fn pivot(&mut self, pivot: Pivot) {
        let Pivot { row: r, column: s } = pivot;
        let p = self.data[r][s].clone();
        debug_assert!(!p.is_zero(), "pivot on a zero element");

        let pivot_row = &self.data[r];
        let next: Vec<Vec<Rational>> = self
            .data
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let factor = &line[s];
                line.iter()
                    .enumerate()
                    .map(|(k, value)| match (i == r, k == s) {
                        (true, true) => p.recip(),
                        (true, false) => value / &p,
                        (false, true) => -(value / &p),
                        (false, false) => value - factor * &pivot_row[k] / &p,
                    })
                    .collect()
            })
            .collect();

        // Commit only once the whole grid is computed
        self.data = next;
        std::mem::swap(&mut self.columns[s], &mut self.rows[r]);
        self.prune_column(s);
    }

    /// Drop `column` when it now holds a synthetic variable. Structural
    /// variables always keep their column.
    fn prune_column(&mut self, column: usize) {
        if column >= self.columns.len() || self.columns[column] <= self.costs.len() {
            return;
        }
        for line in self.data.iter_mut() {
            line.remove(column);
        }
        self.columns.remove(column);
    }

    /// Phase-one test: a leftover correction in the objective row means the
    /// equalities cannot all hold.
    pub fn is_infeasible(&self) -> bool {
        self.phase == Phase::One && self.objective_row().iter().any(|v| !v.is_zero())
    }

    /// True while some reduced cost is still negative.
    pub fn has_next_step(&self) -> bool {
        self.objective_row()[..self.rhs_col()]
            .iter()
            .any(|v| v.is_negative())
    }

    /// An improving column with no positive entry can grow without bound.
    pub fn is_unbounded(&self) -> bool {
        let objective = self.objective_row();
        (0..self.columns.len()).any(|col| {
            objective[col].is_negative()
                && self.data[..self.rows.len()]
                    .iter()
                    .all(|row| !row[col].is_positive())
        })
    }

    /// Rebuild the objective row from the original costs over the current
    /// basis, producing the phase-two tableau.
    pub(crate) fn to_phase_two(&self) -> Tableau {
        let n_constraints = self.rows.len();
        let rhs_col = self.rhs_col();
        let basic_costs: Vec<Rational> = self.rows.iter().map(|&label| self.cost(label)).collect();

        let mut objective: Vec<Rational> = (0..=rhs_col)
            .map(|col| {
                let total = self.data[..n_constraints]
                    .iter()
                    .zip(&basic_costs)
                    .fold(Rational::zero(), |acc, (row, c)| acc + c * &row[col]);
                -total
            })
            .collect();
        for (col, &label) in self.columns.iter().enumerate() {
            objective[col] += self.cost(label);
        }

        let mut data = self.data.clone();
        data[n_constraints] = objective;

        Tableau {
            data,
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            costs: self.costs.clone(),
            sense: self.sense,
            phase: Phase::Two,
        }
    }

    /// Values of the structural variables in the current basic solution.
    pub fn basic_solution(&self) -> Vec<Rational> {
        let mut values = vec![Rational::zero(); self.costs.len()];
        for (i, &label) in self.rows.iter().enumerate() {
            if (1..=values.len()).contains(&label) {
                values[label - 1] = self.rhs(i).clone();
            }
        }
        values
    }
}
