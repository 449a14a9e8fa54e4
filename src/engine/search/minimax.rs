//! Depth-bounded minimax in negamax form with alpha-beta pruning.
//!
//! Moves are searched in generation order and the root only replaces its best
//! move on a strictly better score, so equal scores keep the first move found.

use tracing::debug;

use crate::core::board::{Board, Color};
use crate::core::error::SelectError;
use crate::core::moves::Move;
use crate::engine::eval::evaluate;
use crate::engine::movegen::legal_moves;

use super::searcher::{SearchContext, Strategy};
use super::types::{DRAW_SCORE, INFINITY, MATE_SCORE, MAX_DEPTH, REPETITION_PENALTY};

#[derive(Clone, Debug)]
pub struct MinimaxMover {
    repetition_penalty: i32,
}

impl MinimaxMover {
    pub fn new() -> Self {
        MinimaxMover {
            repetition_penalty: REPETITION_PENALTY,
        }
    }

    pub fn with_repetition_penalty(mut self, penalty: i32) -> Self {
        self.repetition_penalty = penalty;
        self
    }

    /// Search every root move to `depth` plies. Returns the best move among
    /// those fully searched and whether the iteration ran to completion.
    fn search_root(
        &self,
        ctx: &mut SearchContext<'_>,
        candidates: &[Move],
        depth: i32,
    ) -> (Option<(Move, i32)>, bool) {
        let undo = ctx.own_previous_move().map(Move::reversed);
        let opponent = ctx.side.opposite();
        let mut alpha = -INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for &mv in candidates {
            if ctx.should_stop() {
                return (best, false);
            }
            let mut next = ctx.board.clone();
            next.relocate(mv.from, mv.to);
            let mut score = -negamax(ctx, &next, depth - 1, -INFINITY, -alpha, opponent, 1);
            if ctx.should_stop() {
                return (best, false);
            }
            if undo == Some(mv) {
                score -= self.repetition_penalty;
            }
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
                alpha = alpha.max(score);
            }
        }

        (best, true)
    }
}

impl Default for MinimaxMover {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MinimaxMover {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn select(
        &mut self,
        ctx: &mut SearchContext<'_>,
        candidates: &[Move],
    ) -> Result<Move, SelectError> {
        let mut best: Option<(Move, i32)> = None;

        for depth in 1..=ctx.max_depth {
            let (found, completed) = self.search_root(ctx, candidates, depth);
            if !completed {
                // A partial first iteration still beats having nothing
                if best.is_none() {
                    best = found;
                }
                break;
            }
            best = found;
            ctx.stats.depth = depth;

            if let Some((mv, score)) = best {
                debug!(depth, %mv, score, nodes = ctx.stats.nodes, "iteration complete");
                if score.abs() >= MATE_SCORE - MAX_DEPTH {
                    break;
                }
            }
        }

        let (mv, score) = best.ok_or(SelectError::SearchCancelled)?;
        ctx.stats.score = Some(score);
        Ok(mv)
    }
}

/// Score of `board` for `side` to move, searched `depth` plies deep.
fn negamax(
    ctx: &mut SearchContext<'_>,
    board: &Board,
    depth: i32,
    mut alpha: i32,
    beta: i32,
    side: Color,
    ply: i32,
) -> i32 {
    ctx.count_node();
    if depth <= 0 || ctx.should_stop() {
        return evaluate(board, side);
    }

    let moves = legal_moves(ctx.rules, board, side);
    if moves.is_empty() {
        if !ctx.rules.king_safety() {
            return evaluate(board, side);
        }
        return if ctx.rules.in_check(board, side) {
            -MATE_SCORE + ply
        } else {
            DRAW_SCORE
        };
    }

    for mv in moves {
        let mut next = board.clone();
        next.relocate(mv.from, mv.to);
        let score = -negamax(ctx, &next, depth - 1, -beta, -alpha, side.opposite(), ply + 1);
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
