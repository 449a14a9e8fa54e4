//! Search limits, stats, and constants.

use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    /// Ply limit; `None` means [`DEFAULT_DEPTH`].
    pub depth: Option<i32>,
    pub nodes: Option<u64>,
    pub movetime: Option<Duration>,
}

impl SearchLimits {
    pub fn depth(depth: i32) -> Self {
        SearchLimits {
            depth: Some(depth),
            ..Self::default()
        }
    }

    /// Ply limit actually searched.
    pub fn max_depth(&self) -> i32 {
        self.depth.unwrap_or(DEFAULT_DEPTH).clamp(1, MAX_DEPTH)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    /// Deepest fully completed iteration.
    pub depth: i32,
    /// Score of the chosen move from the mover's side, when the strategy scores moves.
    pub score: Option<i32>,
}

pub const INFINITY: i32 = 30000;
pub const MATE_SCORE: i32 = 29000;
pub const DRAW_SCORE: i32 = 0;
pub const MAX_DEPTH: i32 = 16;
pub const DEFAULT_DEPTH: i32 = 3;
/// Charged at the root for undoing the side's own previous move.
pub const REPETITION_PENALTY: i32 = 15;
