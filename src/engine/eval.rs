//! Static evaluation: material plus a small centralization term.

use crate::core::board::{Board, Color, Piece, PieceType, Square};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
/// Kings can be captured when king safety is off, so losing one must dominate.
pub const KING_VALUE: i32 = 20000;

const CENTER_BONUS: i32 = 4;

/// Static scores are clamped to this magnitude, which stays below every mate
/// score the search can produce.
pub const EVAL_BOUND: i32 = 28000;

pub fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

/// Closeness to the four center squares, 0 on the rim to 3 in the center.
fn centrality(sq: Square) -> i32 {
    let file_dist = (2 * sq.file() as i32 - 9).abs() / 2;
    let rank_dist = (2 * sq.rank() as i32 - 9).abs() / 2;
    3 - file_dist.max(rank_dist)
}

fn piece_score(piece: Piece, sq: Square) -> i32 {
    let positional = match piece.piece_type {
        PieceType::Knight | PieceType::Bishop | PieceType::Pawn => centrality(sq) * CENTER_BONUS,
        _ => 0,
    };
    piece_value(piece.piece_type) + positional
}

/// Score in centipawns from `perspective`'s point of view, within
/// `-EVAL_BOUND..=EVAL_BOUND`.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let score: i32 = board
        .pieces()
        .map(|(sq, piece)| {
            let score = piece_score(piece, sq);
            if piece.color == perspective { score } else { -score }
        })
        .sum();
    score.clamp(-EVAL_BOUND, EVAL_BOUND)
}

/// Material only, from `perspective`'s point of view.
pub fn material(board: &Board, perspective: Color) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = piece_value(piece.piece_type);
            if piece.color == perspective { value } else { -value }
        })
        .sum()
}
