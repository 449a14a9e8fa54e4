//! Error types
//!
//! Parsing and bounds errors abort the operation that caused them. Move
//! rejections and selector outcomes are ordinary results the caller branches on.

use thiserror::Error;

use super::board::Square;
use super::moves::Move;

/// Errors raised by the board model.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The placement string contains a character outside the grammar, or one
    /// that would place past the edge of the board.
    #[error("invalid position token '{token}' at index {index}")]
    InvalidPositionToken { token: char, index: usize },

    /// File or rank outside `1..=8`.
    #[error("coordinate out of bounds: file {file}, rank {rank} (must be 1-8)")]
    OutOfBoundsCoordinate { file: u8, rank: u8 },
}

/// Why a move was not applied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejected {
    #[error("no piece on source square {square}")]
    EmptySourceSquare { square: Square },

    #[error("illegal move {mv}")]
    IllegalGeometry { mv: Move },

    /// Only produced when king safety is enabled.
    #[error("move {mv} leaves the king in check")]
    KingInDanger { mv: Move },

    #[error("move {mv} moves a piece of the side not on turn")]
    OutOfTurn { mv: Move },
}

/// Outcomes of the opponent move selector that are not a move.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    /// The side to move has no legal move (checkmate or stalemate).
    #[error("no legal moves")]
    NoLegalMoves,

    /// The search was stopped before any candidate was evaluated.
    #[error("search cancelled before a move was found")]
    SearchCancelled,

    /// A strategy proposed a move that fails the legality check.
    #[error("strategy proposed unverified move {mv}")]
    Unverified { mv: Move },
}

/// Malformed move text such as `"e2e9"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid move text '{text}'")]
pub struct MoveParseError {
    pub text: String,
}

/// Failure of one turn driven by [`crate::game::Game`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    #[error(transparent)]
    Rejected(#[from] MoveRejected),

    #[error(transparent)]
    Selector(#[from] SelectError),
}
