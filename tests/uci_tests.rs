//! UCI Protocol Tests
//!
//! These tests drive the front end line by line and inspect what it prints.

use kibitz::core::board::{Board, Color};
use kibitz::core::moves::Move;
use kibitz::engine::rules::Rules;
use kibitz::uci::{StrategyKind, Uci};

fn send(uci: &mut Uci, lines: &[&str]) -> String {
    let mut out = Vec::new();
    for line in lines {
        uci.handle_line(line, &mut out).unwrap();
    }
    String::from_utf8(out).unwrap()
}

fn bestmove(output: &str) -> &str {
    output
        .lines()
        .find_map(|l| l.strip_prefix("bestmove "))
        .expect("no bestmove line")
}

// ============================================================================
// Handshake Tests
// ============================================================================

#[test]
fn test_uci_handshake() {
    let mut uci = Uci::new();
    let output = send(&mut uci, &["uci", "isready"]);
    assert!(output.contains("id name Kibitz"));
    assert!(output.contains("option name Strategy"));
    assert!(output.contains("uciok"));
    assert!(output.trim_end().ends_with("readyok"));
}

#[test]
fn test_uci_quit() {
    let mut uci = Uci::new();
    let mut out = Vec::new();
    assert!(uci.handle_line("isready", &mut out).unwrap());
    assert!(!uci.handle_line("quit", &mut out).unwrap());
}

#[test]
fn test_uci_ignores_blank_and_unknown_lines() {
    let mut uci = Uci::new();
    let output = send(&mut uci, &["", "   ", "xyzzy"]);
    assert!(output.is_empty());
}

// ============================================================================
// Position Tests
// ============================================================================

#[test]
fn test_position_startpos_with_moves() {
    let mut uci = Uci::new();
    send(&mut uci, &["position startpos moves e2e4 e7e5"]);
    assert_eq!(uci.game().turn(), Color::White);
    assert_eq!(uci.game().records().len(), 2);
    assert_eq!(
        uci.game().board().to_placement(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR"
    );
}

#[test]
fn test_position_fen_side_to_move() {
    let mut uci = Uci::new();
    send(
        &mut uci,
        &["position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"],
    );
    assert_eq!(uci.game().turn(), Color::Black);
}

#[test]
fn test_position_replay_stops_at_illegal_move() {
    let mut uci = Uci::new();
    send(&mut uci, &["position startpos moves e2e4 e2e4 d7d5"]);
    assert_eq!(uci.game().records().len(), 1);
    assert_eq!(uci.game().turn(), Color::Black);
}

#[test]
fn test_ucinewgame_resets() {
    let mut uci = Uci::new();
    send(&mut uci, &["position startpos moves g1f3", "ucinewgame"]);
    assert_eq!(*uci.game().board(), Board::startpos());
    assert!(uci.game().records().is_empty());
}

// ============================================================================
// Search Tests
// ============================================================================

#[test]
fn test_go_returns_legal_move() {
    let mut uci = Uci::new();
    let output = send(&mut uci, &["position startpos moves e2e4 e7e5", "go depth 1"]);
    let mv: Move = bestmove(&output).parse().unwrap();
    assert!(Rules::standard().is_legal_move(&mv, uci.game().board()));
    assert_eq!(
        uci.game().board().piece_on(mv.from).map(|p| p.color),
        Some(Color::White)
    );
    // go does not play the move
    assert_eq!(uci.game().records().len(), 2);
}

#[test]
fn test_go_without_moves_reports_null_move() {
    let mut uci = Uci::new();
    let output = send(
        &mut uci,
        &["position fen 8/8/8/8/8/p7/P7/8 w - - 0 1", "go depth 2"],
    );
    assert_eq!(bestmove(&output), "0000");
}

#[test]
fn test_go_with_time_control() {
    let mut uci = Uci::new();
    let output = send(
        &mut uci,
        &["position startpos", "go wtime 60000 btime 60000 winc 1000 binc 1000"],
    );
    let mv: Move = bestmove(&output).parse().unwrap();
    assert!(Rules::standard().is_legal_move(&mv, &Board::startpos()));
}

#[test]
fn test_go_greedy_takes_queen() {
    let mut uci = Uci::new();
    let output = send(
        &mut uci,
        &[
            "setoption name Strategy value greedy",
            "position fen 4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1",
            "go",
        ],
    );
    assert_eq!(uci.strategy(), StrategyKind::Greedy);
    assert_eq!(bestmove(&output), "d2d5");
}

// ============================================================================
// Option Tests
// ============================================================================

#[test]
fn test_setoption_king_safety() {
    let mut uci = Uci::new();
    send(
        &mut uci,
        &[
            "setoption name KingSafety value true",
            "position fen 4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1",
        ],
    );
    assert!(uci.game().rules().king_safety());

    let mut out = Vec::new();
    uci.handle_line("moves", &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();
    assert!(!output.contains("e2d3"));
}

#[test]
fn test_setoption_unknown_strategy_is_ignored() {
    let mut uci = Uci::new();
    send(&mut uci, &["setoption name Strategy value alphazero"]);
    assert_eq!(uci.strategy(), StrategyKind::Minimax);
}

#[test]
fn test_seeded_random_is_reproducible() {
    let run = || {
        let mut uci = Uci::new();
        let output = send(
            &mut uci,
            &[
                "setoption name Strategy value random",
                "setoption name Seed value 42",
                "position startpos",
                "go",
            ],
        );
        bestmove(&output).to_string()
    };
    assert_eq!(run(), run());
}

// ============================================================================
// Debug Command Tests
// ============================================================================

#[test]
fn test_display_command() {
    let mut uci = Uci::new();
    let output = send(&mut uci, &["d"]);
    assert!(output.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"));
    assert!(output.contains("Turn: white"));
}

#[test]
fn test_moves_command() {
    let mut uci = Uci::new();
    let output = send(&mut uci, &["moves"]);
    let line = output.lines().next().unwrap();
    assert_eq!(line.split_whitespace().count(), 21);
    assert!(line.contains("e2e4"));
}
