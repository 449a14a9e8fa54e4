//! Core chess types and representations
//!
//! This module contains the fundamental building blocks:
//! - Board, squares and pieces
//! - Move representation
//! - Error types

pub mod board;
pub mod error;
pub mod moves;

pub use board::{Board, Color, Piece, PieceType, Square, START_PLACEMENT};
pub use error::{BoardError, MoveParseError, MoveRejected, SelectError, TurnError};
pub use moves::Move;
