//! Opponent move selection: a searcher driving a pluggable strategy.

mod greedy;
mod minimax;
mod random;
mod searcher;
mod types;

pub use greedy::GreedyMover;
pub use minimax::MinimaxMover;
pub use random::RandomMover;
pub use searcher::{SearchContext, SearchHandle, Searcher, Strategy};
pub use types::{
    SearchLimits, SearchStats, DEFAULT_DEPTH, DRAW_SCORE, INFINITY, MATE_SCORE, MAX_DEPTH,
    REPETITION_PENALTY,
};
