use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tableau::Pivot;

/// Picks one of the currently valid pivots for an automatic step.
pub trait PivotRule {
    /// `None` only when `candidates` is empty.
    fn choose(&mut self, candidates: &[Pivot]) -> Option<Pivot>;
}

/// Smallest row, then smallest column. Fully reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPivot;

impl PivotRule for FirstPivot {
    fn choose(&mut self, candidates: &[Pivot]) -> Option<Pivot> {
        candidates.iter().min().copied()
    }
}

/// Uniformly random candidate from an injected generator.
#[derive(Debug, Clone)]
pub struct RandomPivot<R> {
    rng: R,
}

impl<R: Rng> RandomPivot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPivot<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl<R: Rng> PivotRule for RandomPivot<R> {
    fn choose(&mut self, candidates: &[Pivot]) -> Option<Pivot> {
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..candidates.len());
        Some(candidates[index])
    }
}
