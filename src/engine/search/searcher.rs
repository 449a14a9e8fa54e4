//! Searcher: strategy driver, time/node limits, cancellation, and the worker thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::core::board::{Board, Color};
use crate::core::error::SelectError;
use crate::core::moves::Move;
use crate::engine::movegen::legal_moves;
use crate::engine::rules::Rules;

use super::minimax::MinimaxMover;
use super::types::{SearchLimits, SearchStats};

/// A move selection algorithm.
pub trait Strategy: Send {
    fn name(&self) -> &'static str;

    /// Pick one of `candidates`, which is non-empty and in generation order.
    ///
    /// Strategies poll [`SearchContext::should_stop`] and, when stopped, return
    /// the best move evaluated so far or [`SelectError::SearchCancelled`].
    fn select(
        &mut self,
        ctx: &mut SearchContext<'_>,
        candidates: &[Move],
    ) -> Result<Move, SelectError>;
}

/// What a strategy sees during one search.
pub struct SearchContext<'a> {
    pub rules: &'a Rules,
    pub board: &'a Board,
    pub history: &'a [Move],
    pub side: Color,
    pub max_depth: i32,
    pub stats: SearchStats,
    stop: &'a AtomicBool,
    start_time: Instant,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
}

impl<'a> SearchContext<'a> {
    pub fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(limit) = self.node_limit {
            if self.stats.nodes >= limit {
                return true;
            }
        }
        if let Some(limit) = self.time_limit {
            if self.start_time.elapsed() >= limit {
                return true;
            }
        }
        false
    }

    #[inline]
    pub fn count_node(&mut self) {
        self.stats.nodes += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// The side's own previous move, assuming strict alternation in `history`.
    pub fn own_previous_move(&self) -> Option<Move> {
        self.history.iter().rev().nth(1).copied()
    }
}

/// The opponent move selector for one side.
pub struct Searcher {
    side: Color,
    rules: Rules,
    strategy: Box<dyn Strategy>,
    limits: SearchLimits,
    stop: Arc<AtomicBool>,
    stats: SearchStats,
}

impl Searcher {
    /// Depth-bounded minimax with standard rules and default limits.
    pub fn new(side: Color) -> Self {
        Self::with_strategy(side, Box::new(MinimaxMover::new()))
    }

    pub fn with_strategy(side: Color, strategy: Box<dyn Strategy>) -> Self {
        Searcher {
            side,
            rules: Rules::standard(),
            strategy,
            limits: SearchLimits::default(),
            stop: Arc::new(AtomicBool::new(false)),
            stats: SearchStats::default(),
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.limits = limits;
    }

    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    pub fn set_side(&mut self, side: Color) {
        self.side = side;
    }

    pub fn side(&self) -> Color {
        self.side
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Setting this flag stops a running search.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    /// Stats of the most recent search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Choose a move for this searcher's side on `board`.
    ///
    /// The returned move is always legal on `board` under this searcher's rules.
    pub fn best_move(&mut self, board: &Board, history: &[Move]) -> Result<Move, SelectError> {
        self.stop.store(false, Ordering::Relaxed);
        self.run(board, history)
    }

    /// Run [`Searcher::best_move`] on a worker thread over an owned board.
    pub fn spawn(mut self, board: Board, history: Vec<Move>) -> SearchHandle {
        self.stop.store(false, Ordering::Relaxed);
        let stop = self.stop.clone();
        let handle = thread::spawn(move || {
            let result = self.run(&board, &history);
            (self, result)
        });
        SearchHandle { stop, handle }
    }

    fn run(&mut self, board: &Board, history: &[Move]) -> Result<Move, SelectError> {
        let candidates = legal_moves(&self.rules, board, self.side);
        if candidates.is_empty() {
            debug!(side = %self.side, "no legal moves");
            self.stats = SearchStats::default();
            return Err(SelectError::NoLegalMoves);
        }

        let mut ctx = SearchContext {
            rules: &self.rules,
            board,
            history,
            side: self.side,
            max_depth: self.limits.max_depth(),
            stats: SearchStats::default(),
            stop: &self.stop,
            start_time: Instant::now(),
            time_limit: self.limits.movetime,
            node_limit: self.limits.nodes,
        };

        let result = self.strategy.select(&mut ctx, &candidates);
        let elapsed = ctx.elapsed();
        self.stats = ctx.stats;
        let mv = result?;

        if !self.rules.is_legal_move(&mv, board) {
            warn!(strategy = self.strategy.name(), %mv, "strategy proposed an illegal move");
            return Err(SelectError::Unverified { mv });
        }

        info!(
            strategy = self.strategy.name(),
            side = %self.side,
            %mv,
            depth = self.stats.depth,
            nodes = self.stats.nodes,
            score = ?self.stats.score,
            time_ms = elapsed.as_millis() as u64,
            "best move"
        );
        Ok(mv)
    }
}

/// A search running on a worker thread.
pub struct SearchHandle {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<(Searcher, Result<Move, SelectError>)>,
}

impl SearchHandle {
    /// Ask the search to finish with the best move found so far.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the result and get the searcher back.
    pub fn join(self) -> (Searcher, Result<Move, SelectError>) {
        self.handle
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    }
}
