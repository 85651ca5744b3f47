use crate::tableau::Tableau;

/// Undo stack owned by a single [`Session`](crate::Session).
///
/// Snapshots are stored by value, so later pivots on the live tableau never
/// reach a recorded state.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Tableau>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tableau: &Tableau) {
        self.snapshots.push(tableau.clone());
    }

    /// Most recent snapshot, removed from the stack.
    pub fn pop(&mut self) -> Option<Tableau> {
        self.snapshots.pop()
    }

    pub fn peek(&self) -> Option<&Tableau> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::integer;
    use crate::problem::{LpProblem, Sense};
    use crate::tableau::Pivot;

    #[test]
    fn test_snapshot_is_independent_of_live_tableau() {
        let problem = LpProblem::new(Sense::Minimize, vec![integer(1), integer(2)])
            .with_constraint(vec![integer(1), integer(1)], integer(3));
        let mut live = Tableau::phase_one(&problem);
        let before = live.clone();

        let mut history = History::new();
        history.record(&live);
        live.pivot(Pivot::new(0, 0));

        assert_ne!(live, before);
        assert_eq!(history.peek(), Some(&before));
        assert_eq!(history.pop(), Some(before));
        assert!(history.is_empty());
        assert_eq!(history.pop(), None);
    }
}
