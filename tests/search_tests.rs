use std::thread;
use std::time::Duration;

use kibitz::core::board::{Board, Color};
use kibitz::core::error::SelectError;
use kibitz::core::moves::Move;
use kibitz::engine::eval::EVAL_BOUND;
use kibitz::engine::rules::Rules;
use kibitz::engine::search::{
    GreedyMover, MinimaxMover, RandomMover, SearchContext, SearchLimits, Searcher, Strategy,
};

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

fn board(placement: &str) -> Board {
    Board::from_position(placement).unwrap()
}

#[test]
fn test_search_startpos() {
    let pos = Board::startpos();
    let mut searcher = Searcher::new(Color::White).with_limits(SearchLimits::depth(2));
    let best = searcher.best_move(&pos, &[]).unwrap();
    assert!(Rules::standard().is_legal_move(&best, &pos));
    assert_eq!(searcher.stats().depth, 2);
    assert!(searcher.stats().nodes > 20);
}

#[test]
fn test_search_black_side() {
    let pos = Board::startpos();
    let mut searcher = Searcher::new(Color::Black).with_limits(SearchLimits::depth(1));
    let best = searcher.best_move(&pos, &[]).unwrap();
    assert_eq!(pos.piece_on(best.from).map(|p| p.color), Some(Color::Black));
}

#[test]
fn test_search_no_legal_moves() {
    let pos = board("8/8/8/8/8/p7/P7/8");
    let mut searcher = Searcher::new(Color::White);
    assert_eq!(searcher.best_move(&pos, &[]), Err(SelectError::NoLegalMoves));

    let mut greedy = Searcher::with_strategy(Color::White, Box::new(GreedyMover::new()));
    assert_eq!(greedy.best_move(&pos, &[]), Err(SelectError::NoLegalMoves));
}

#[test]
fn test_search_takes_hanging_queen() {
    let pos = board("4k3/8/8/3q4/8/8/3R4/4K3");

    let mut greedy = Searcher::with_strategy(Color::White, Box::new(GreedyMover::new()));
    assert_eq!(greedy.best_move(&pos, &[]), Ok(mv("d2d5")));

    let mut minimax = Searcher::new(Color::White).with_limits(SearchLimits::depth(2));
    assert_eq!(minimax.best_move(&pos, &[]), Ok(mv("d2d5")));
}

#[test]
fn test_search_mate_in_one() {
    let pos = board("6k1/5ppp/8/8/8/8/8/4R2K");
    let mut searcher = Searcher::new(Color::White)
        .with_rules(Rules::standard().with_king_safety(true))
        .with_limits(SearchLimits::depth(3));
    assert_eq!(searcher.best_move(&pos, &[]), Ok(mv("e1e8")));
    // Deeper iterations are skipped once a mate is found
    assert_eq!(searcher.stats().depth, 2);
}

#[test]
fn test_search_ties_keep_first_move() {
    // Every king step scores the same; a1b1 is generated first
    let pos = board("8/8/8/8/8/8/8/K7");
    let mut searcher = Searcher::new(Color::White).with_limits(SearchLimits::depth(2));
    assert_eq!(searcher.best_move(&pos, &[]), Ok(mv("a1b1")));
}

#[test]
fn test_search_avoids_undoing_previous_move() {
    let pos = board("8/8/8/8/8/8/8/1K6");
    let history = [mv("a1b1"), mv("h7h8")];

    let mut searcher = Searcher::new(Color::White).with_limits(SearchLimits::depth(2));
    assert_eq!(searcher.best_move(&pos, &history), Ok(mv("b1c1")));

    let mut searcher = Searcher::with_strategy(
        Color::White,
        Box::new(MinimaxMover::new().with_repetition_penalty(0)),
    )
    .with_limits(SearchLimits::depth(2));
    assert_eq!(searcher.best_move(&pos, &history), Ok(mv("b1a1")));
}

#[test]
fn test_search_zero_movetime_is_cancelled() {
    let limits = SearchLimits {
        movetime: Some(Duration::ZERO),
        ..SearchLimits::default()
    };
    let mut searcher = Searcher::new(Color::White).with_limits(limits);
    assert_eq!(
        searcher.best_move(&Board::startpos(), &[]),
        Err(SelectError::SearchCancelled)
    );
}

#[test]
fn test_search_node_limit() {
    let pos = Board::startpos();
    let limits = SearchLimits {
        nodes: Some(0),
        ..SearchLimits::default()
    };
    let mut searcher = Searcher::new(Color::White).with_limits(limits);
    assert_eq!(searcher.best_move(&pos, &[]), Err(SelectError::SearchCancelled));

    // Enough for the first iteration, not for the second
    let limits = SearchLimits {
        depth: Some(4),
        nodes: Some(50),
        ..SearchLimits::default()
    };
    let mut searcher = Searcher::new(Color::White).with_limits(limits);
    let best = searcher.best_move(&pos, &[]).unwrap();
    assert!(Rules::standard().is_legal_move(&best, &pos));
    assert_eq!(searcher.stats().depth, 1);
}

#[test]
fn test_search_partial_first_iteration_keeps_best_so_far() {
    // The budget runs out on the third root move, so only b1a3 and b1c3 count
    let pos = Board::startpos();
    let limits = SearchLimits {
        depth: Some(3),
        nodes: Some(3),
        ..SearchLimits::default()
    };
    let mut searcher = Searcher::new(Color::White).with_limits(limits);
    let best = searcher.best_move(&pos, &[]).unwrap();
    assert!(Rules::standard().is_legal_move(&best, &pos));
    assert_eq!(best, mv("b1c3"));
    assert_eq!(searcher.stats().depth, 0);
}

#[test]
fn test_greedy_stopped_partway_keeps_best_so_far() {
    // Three candidates are scored before the budget stops the scan
    let pos = Board::startpos();
    let limits = SearchLimits {
        nodes: Some(3),
        ..SearchLimits::default()
    };
    let mut searcher = Searcher::with_strategy(Color::White, Box::new(GreedyMover::new()))
        .with_limits(limits);
    let best = searcher.best_move(&pos, &[]).unwrap();
    assert!(Rules::standard().is_legal_move(&best, &pos));
    assert_eq!(best, mv("b1c3"));
    assert_eq!(searcher.stats().nodes, 3);
}

#[test]
fn test_search_scores_stay_bounded() {
    let pos = board("4k3/8/QQQQQQQQ/QQQQQQQQ/QQQQQQQQ/QQQQQQQQ/QQQQQQQQ/QQQQKQQQ");
    let mut searcher = Searcher::new(Color::White).with_limits(SearchLimits::depth(2));
    let best = searcher.best_move(&pos, &[]).unwrap();
    assert!(Rules::standard().is_legal_move(&best, &pos));
    let score = searcher.stats().score.unwrap();
    assert!(score.abs() <= EVAL_BOUND, "score {score}");
}

#[test]
fn test_search_stop_from_another_thread() {
    let searcher = Searcher::new(Color::White).with_limits(SearchLimits::depth(16));
    let handle = searcher.spawn(Board::startpos(), Vec::new());
    thread::sleep(Duration::from_millis(100));
    handle.stop();
    while !handle.is_finished() {
        thread::sleep(Duration::from_millis(1));
    }
    let (searcher, result) = handle.join();
    let best = result.unwrap();
    assert!(searcher.rules().is_legal_move(&best, &Board::startpos()));
}

#[test]
fn test_search_searcher_is_reusable_after_stop() {
    let searcher = Searcher::new(Color::White).with_limits(SearchLimits::depth(16));
    let stop = searcher.stop_flag();
    let handle = searcher.spawn(Board::startpos(), Vec::new());
    thread::sleep(Duration::from_millis(50));
    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    let (mut searcher, _) = handle.join();

    searcher.set_limits(SearchLimits::depth(1));
    assert!(searcher.best_move(&Board::startpos(), &[]).is_ok());
}

#[test]
fn test_random_is_reproducible_with_seed() {
    let pos = Board::startpos();
    let pick = |seed| {
        let mut searcher =
            Searcher::with_strategy(Color::White, Box::new(RandomMover::seeded(seed)));
        searcher.best_move(&pos, &[]).unwrap()
    };
    let first = pick(7);
    assert_eq!(first, pick(7));
    assert!(Rules::standard().is_legal_move(&first, &pos));
}

struct Blunder;

impl Strategy for Blunder {
    fn name(&self) -> &'static str {
        "blunder"
    }

    fn select(
        &mut self,
        _ctx: &mut SearchContext<'_>,
        _candidates: &[Move],
    ) -> Result<Move, SelectError> {
        Ok(mv("e2e5"))
    }
}

#[test]
fn test_search_rejects_illegal_strategy_output() {
    let mut searcher = Searcher::with_strategy(Color::White, Box::new(Blunder));
    assert_eq!(searcher.strategy_name(), "blunder");
    assert_eq!(
        searcher.best_move(&Board::startpos(), &[]),
        Err(SelectError::Unverified { mv: mv("e2e5") })
    );
}
