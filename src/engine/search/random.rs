//! Uniformly random legal move.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::core::error::SelectError;
use crate::core::moves::Move;

use super::searcher::{SearchContext, Strategy};

pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Reproducible sequence of choices.
    pub fn seeded(seed: u64) -> Self {
        RandomMover {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomMover {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select(
        &mut self,
        ctx: &mut SearchContext<'_>,
        candidates: &[Move],
    ) -> Result<Move, SelectError> {
        if ctx.should_stop() {
            return Err(SelectError::SearchCancelled);
        }
        ctx.count_node();
        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(SelectError::NoLegalMoves)
    }
}
