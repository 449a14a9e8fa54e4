//! Turn controller
//!
//! [`apply_move`] is the only way a legal move reaches a board. [`Game`] owns
//! the live board, tracks whose turn it is and keeps an append-only record of
//! every move played.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::core::board::{Board, Color, Piece};
use crate::core::error::{BoardError, MoveRejected, TurnError};
use crate::core::moves::Move;
use crate::engine::movegen::has_legal_move;
use crate::engine::rules::Rules;
use crate::engine::search::Searcher;

/// Apply `mv` to `board` under the standard rules.
pub fn apply_move(mv: &Move, board: &Board) -> Result<Board, MoveRejected> {
    apply_move_with(&Rules::standard(), mv, board)
}

/// Apply `mv` to `board` under `rules`, returning the resulting board.
///
/// `board` itself is never modified, so a rejected move leaves it untouched.
pub fn apply_move_with(rules: &Rules, mv: &Move, board: &Board) -> Result<Board, MoveRejected> {
    rules.review(mv, board)?;
    let mut next = board.clone();
    next.relocate(mv.from, mv.to);
    Ok(next)
}

/// One entry of the game record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Played {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub played_at: DateTime<Utc>,
}

/// State of the game for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    /// No legal move and in check. Only reported with king safety on.
    Checkmate { loser: Color },
    /// No legal move and not in check. Only reported with king safety on.
    Stalemate,
    /// No legal move with king safety off, where mate and stalemate are not told apart.
    NoMoves { side: Color },
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    rules: Rules,
    turn: Color,
    records: Vec<Played>,
}

impl Game {
    /// Standard starting position, white to move.
    pub fn new() -> Self {
        Self::with_board(Board::startpos(), Color::White)
    }

    pub fn with_board(board: Board, turn: Color) -> Self {
        Game {
            board,
            rules: Rules::standard(),
            turn,
            records: Vec::new(),
        }
    }

    pub fn from_position(text: &str, turn: Color) -> Result<Self, BoardError> {
        Ok(Self::with_board(Board::from_position(text)?, turn))
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn records(&self) -> &[Played] {
        &self.records
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> Vec<Move> {
        self.records.iter().map(|r| r.mv).collect()
    }

    /// Play `mv` for the side to move.
    pub fn play(&mut self, mv: Move) -> Result<Played, MoveRejected> {
        if let Some(piece) = self.board.piece_on(mv.from) {
            if piece.color != self.turn {
                debug!(%mv, turn = %self.turn, "move rejected: out of turn");
                return Err(MoveRejected::OutOfTurn { mv });
            }
        }

        let piece = match self.rules.review(&mv, &self.board) {
            Ok(piece) => piece,
            Err(reason) => {
                debug!(%mv, %reason, "move rejected");
                return Err(reason);
            }
        };

        let captured = self.board.relocate(mv.from, mv.to);
        let played = Played {
            mv,
            piece,
            captured,
            played_at: Utc::now(),
        };
        debug!(%mv, side = %self.turn, captured = ?captured, "move played");

        self.records.push(played.clone());
        self.turn = self.turn.opposite();
        Ok(played)
    }

    /// Let `searcher` choose a move for the side to move and play it.
    ///
    /// The searcher is pointed at the side to move and searches with this
    /// game's rules.
    pub fn play_engine(&mut self, searcher: &mut Searcher) -> Result<Played, TurnError> {
        searcher.set_side(self.turn);
        searcher.set_rules(self.rules);
        let mv = searcher.best_move(&self.board, &self.history())?;
        let played = self.play(mv)?;
        info!(%mv, side = %played.piece.color, "engine move");
        Ok(played)
    }

    pub fn outcome(&self) -> Outcome {
        if has_legal_move(&self.rules, &self.board, self.turn) {
            return Outcome::Ongoing;
        }
        if !self.rules.king_safety() {
            return Outcome::NoMoves { side: self.turn };
        }
        if self.rules.in_check(&self.board, self.turn) {
            Outcome::Checkmate { loser: self.turn }
        } else {
            Outcome::Stalemate
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
