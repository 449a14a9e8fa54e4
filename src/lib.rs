//! Chess move legality and opponent move selection.
//!
//! - [`core`]: board, squares, pieces, moves and errors
//! - [`engine`]: legality rules, move enumeration, evaluation and search
//! - [`game`]: applying moves and keeping the game record
//! - [`uci`]: UCI front end

pub mod core;
pub mod engine;
pub mod game;
pub mod uci;

pub use crate::core::{
    Board, BoardError, Color, Move, MoveRejected, Piece, PieceType, SelectError, Square,
};
pub use engine::{is_legal_move, Rules, SearchLimits, Searcher};
pub use game::{apply_move, Game, Outcome};
pub use uci::Uci;
