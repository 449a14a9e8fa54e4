//! One-ply greedy selection on the static evaluation.

use crate::core::error::SelectError;
use crate::core::moves::Move;
use crate::engine::eval::evaluate;

use super::searcher::{SearchContext, Strategy};

#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyMover;

impl GreedyMover {
    pub fn new() -> Self {
        GreedyMover
    }
}

impl Strategy for GreedyMover {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select(
        &mut self,
        ctx: &mut SearchContext<'_>,
        candidates: &[Move],
    ) -> Result<Move, SelectError> {
        let mut best: Option<(Move, i32)> = None;

        for &mv in candidates {
            if ctx.should_stop() {
                break;
            }
            ctx.count_node();
            let mut next = ctx.board.clone();
            next.relocate(mv.from, mv.to);
            let score = evaluate(&next, ctx.side);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        let (mv, score) = best.ok_or(SelectError::SearchCancelled)?;
        ctx.stats.depth = 1;
        ctx.stats.score = Some(score);
        Ok(mv)
    }
}
