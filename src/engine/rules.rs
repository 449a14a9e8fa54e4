//! Move legality
//!
//! A move is checked in two stages. The shared preconditions (a piece on the
//! source square, a non-null move, no capture of one's own piece) run once; the
//! geometry is then decided by a rule looked up by the mover's piece type.
//!
//! Rules are pure predicates over the current board. Own-king safety is an
//! optional extension switched on with [`Rules::with_king_safety`]. Castling,
//! en passant and promotion are not part of the rule set.

use crate::core::board::{Board, Color, Piece, PieceType, Square};
use crate::core::error::MoveRejected;
use crate::core::moves::Move;

/// Geometry rule for one piece type. Called only after the shared
/// preconditions hold, with the piece standing on `mv.from`.
pub type RuleFn = fn(&Move, &Board, Piece) -> bool;

/// Rule table keyed by [`PieceType`].
#[derive(Clone, Copy, Debug)]
pub struct Rules {
    table: [RuleFn; 6],
    king_safety: bool,
}

impl Rules {
    /// Standard piece geometry, king safety off.
    pub const fn standard() -> Self {
        // Same order as `PieceType::ALL`
        Rules {
            table: [
                king_rule,
                queen_rule,
                rook_rule,
                bishop_rule,
                knight_rule,
                pawn_rule,
            ],
            king_safety: false,
        }
    }

    /// Reject moves that leave the mover's own king attacked.
    pub const fn with_king_safety(mut self, enabled: bool) -> Self {
        self.king_safety = enabled;
        self
    }

    #[inline]
    pub const fn king_safety(&self) -> bool {
        self.king_safety
    }

    /// Replace the rule used for `piece_type`.
    pub fn register(&mut self, piece_type: PieceType, rule: RuleFn) {
        self.table[piece_type.index()] = rule;
    }

    #[inline]
    pub fn rule(&self, piece_type: PieceType) -> RuleFn {
        self.table[piece_type.index()]
    }

    pub fn is_legal_move(&self, mv: &Move, board: &Board) -> bool {
        self.review(mv, board).is_ok()
    }

    /// Check `mv` against `board` and return the moving piece, or the reason
    /// the move is rejected.
    pub fn review(&self, mv: &Move, board: &Board) -> Result<Piece, MoveRejected> {
        let piece = board
            .piece_on(mv.from)
            .ok_or(MoveRejected::EmptySourceSquare { square: mv.from })?;

        if mv.from == mv.to {
            return Err(MoveRejected::IllegalGeometry { mv: *mv });
        }
        if board.piece_on(mv.to).is_some_and(|p| p.color == piece.color) {
            return Err(MoveRejected::IllegalGeometry { mv: *mv });
        }
        if !self.is_specific_legal_move(mv, board, piece) {
            return Err(MoveRejected::IllegalGeometry { mv: *mv });
        }

        if self.king_safety {
            let mut after = board.clone();
            after.relocate(mv.from, mv.to);
            if self.in_check(&after, piece.color) {
                return Err(MoveRejected::KingInDanger { mv: *mv });
            }
        }

        Ok(piece)
    }

    /// Dispatch to the geometry rule of `piece`.
    #[inline]
    pub fn is_specific_legal_move(&self, mv: &Move, board: &Board, piece: Piece) -> bool {
        (self.table[piece.piece_type.index()])(mv, board, piece)
    }

    /// Whether any piece of `by` could capture on `target`.
    ///
    /// Pawns attack diagonally forward whether or not `target` is occupied.
    pub fn is_attacked(&self, board: &Board, target: Square, by: Color) -> bool {
        board
            .pieces()
            .filter(|(sq, p)| p.color == by && *sq != target)
            .any(|(sq, p)| {
                let mv = Move::new(sq, target);
                if p.piece_type == PieceType::Pawn {
                    let (df, dr) = mv.delta();
                    df.abs() == 1 && dr == by.pawn_direction()
                } else {
                    self.is_specific_legal_move(&mv, board, p)
                }
            })
    }

    /// Whether the king of `color` stands attacked. A board without that
    /// king is never in check.
    pub fn in_check(&self, board: &Board, color: Color) -> bool {
        board
            .king_square(color)
            .is_some_and(|king| self.is_attacked(board, king, color.opposite()))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Legality under the standard rules.
pub fn is_legal_move(mv: &Move, board: &Board) -> bool {
    Rules::standard().is_legal_move(mv, board)
}

fn king_rule(mv: &Move, _board: &Board, _piece: Piece) -> bool {
    let (df, dr) = mv.delta();
    df.abs() <= 1 && dr.abs() <= 1
}

fn knight_rule(mv: &Move, _board: &Board, _piece: Piece) -> bool {
    let (df, dr) = mv.delta();
    matches!((df.abs(), dr.abs()), (2, 1) | (1, 2))
}

fn rook_rule(mv: &Move, board: &Board, _piece: Piece) -> bool {
    let (df, dr) = mv.delta();
    is_orthogonal(df, dr) && path_is_clear(mv, board)
}

fn bishop_rule(mv: &Move, board: &Board, _piece: Piece) -> bool {
    let (df, dr) = mv.delta();
    is_diagonal(df, dr) && path_is_clear(mv, board)
}

fn queen_rule(mv: &Move, board: &Board, _piece: Piece) -> bool {
    let (df, dr) = mv.delta();
    (is_orthogonal(df, dr) || is_diagonal(df, dr)) && path_is_clear(mv, board)
}

fn pawn_rule(mv: &Move, board: &Board, piece: Piece) -> bool {
    let (df, dr) = mv.delta();
    let dir = piece.color.pawn_direction();

    match board.piece_on(mv.to) {
        // Captures: one step diagonally forward onto an opposing piece
        Some(target) => target.color != piece.color && df.abs() == 1 && dr == dir,
        None if df != 0 => false,
        None if dr == dir => true,
        None => {
            dr == 2 * dir
                && mv.from.rank() == piece.color.pawn_start_rank()
                && Square::offset(mv.from.file() as i8, mv.from.rank() as i8 + dir)
                    .is_some_and(|mid| board.is_empty_on(mid))
        }
    }
}

#[inline]
fn is_orthogonal(df: i8, dr: i8) -> bool {
    (df == 0) != (dr == 0)
}

#[inline]
fn is_diagonal(df: i8, dr: i8) -> bool {
    df != 0 && df.abs() == dr.abs()
}

/// Every square strictly between `from` and `to` is empty. Assumes the two
/// squares share a rank, file or diagonal.
fn path_is_clear(mv: &Move, board: &Board) -> bool {
    let (df, dr) = mv.delta();
    let (step_f, step_r) = (df.signum(), dr.signum());
    let distance = df.abs().max(dr.abs());
    let (file, rank) = (mv.from.file() as i8, mv.from.rank() as i8);

    (1..distance).all(|i| {
        Square::offset(file + i * step_f, rank + i * step_r)
            .is_some_and(|sq| board.is_empty_on(sq))
    })
}
