//! Move enumeration
//!
//! Candidate moves are every (from, to) pair the legality rules accept for a
//! side. Order is fixed: source squares a1..h8, then destinations a1..h8.

use crate::core::board::{Board, Color, Square};
use crate::core::moves::Move;

use super::rules::Rules;

/// All legal moves of `side` on `board`.
pub fn legal_moves(rules: &Rules, board: &Board, side: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, piece) in board.pieces() {
        if piece.color != side {
            continue;
        }
        for to in Square::all() {
            let mv = Move::new(from, to);
            if rules.is_legal_move(&mv, board) {
                moves.push(mv);
            }
        }
    }
    moves
}

/// Legal destinations of the piece on `from`.
pub fn destinations(rules: &Rules, board: &Board, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| rules.is_legal_move(&Move::new(from, to), board))
        .collect()
}

/// Whether `side` has at least one legal move.
pub fn has_legal_move(rules: &Rules, board: &Board, side: Color) -> bool {
    board
        .pieces()
        .filter(|(_, p)| p.color == side)
        .any(|(from, _)| {
            Square::all().any(|to| rules.is_legal_move(&Move::new(from, to), board))
        })
}

/// Count leaf nodes of the move tree to `depth` plies, sides alternating.
pub fn perft(rules: &Rules, board: &Board, side: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(rules, board, side);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| {
            let mut next = board.clone();
            next.relocate(mv.from, mv.to);
            perft(rules, &next, side.opposite(), depth - 1)
        })
        .sum()
}
