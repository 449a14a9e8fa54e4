//! Chess engine components
//!
//! This module contains the engine functionality:
//! - Move legality rules keyed by piece type
//! - Legal move enumeration
//! - Static evaluation
//! - Opponent move selection

pub mod eval;
pub mod movegen;
pub mod rules;
pub mod search;

pub use eval::evaluate;
pub use movegen::legal_moves;
pub use rules::{is_legal_move, RuleFn, Rules};
pub use search::{
    GreedyMover, MinimaxMover, RandomMover, SearchHandle, SearchLimits, SearchStats, Searcher,
    Strategy,
};
