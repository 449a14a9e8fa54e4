use std::io::{self, BufRead, Write};
use std::time::Duration;

use tracing::warn;
use vampirc_uci::uci::{UciSearchControl, UciTimeControl};
use vampirc_uci::{parser, UciMessage};

use crate::core::board::Color;
use crate::core::moves::Move;
use crate::engine::movegen::legal_moves;
use crate::engine::rules::Rules;
use crate::engine::search::{
    GreedyMover, MinimaxMover, RandomMover, SearchLimits, Searcher, Strategy, MAX_DEPTH,
};
use crate::game::Game;

/// Selector strategy chosen with `setoption name Strategy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    Minimax,
    Greedy,
    Random,
}

impl StrategyKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "minimax" => Some(StrategyKind::Minimax),
            "greedy" => Some(StrategyKind::Greedy),
            "random" => Some(StrategyKind::Random),
            _ => None,
        }
    }
}

pub struct Uci {
    game: Game,
    strategy: StrategyKind,
    king_safety: bool,
    /// Ply limit used when `go` names none.
    depth: Option<i32>,
    /// Seed for the random strategy; fresh entropy when unset.
    seed: Option<u64>,
}

impl Uci {
    pub fn new() -> Self {
        Uci {
            game: Game::new(),
            strategy: StrategyKind::Minimax,
            king_safety: false,
            depth: None,
            seed: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn run(&mut self) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            match self.handle_line(&line, &mut stdout) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    warn!(%err, "failed to write to stdout");
                    break;
                }
            }
        }
    }

    /// Handle one input line. Returns `Ok(false)` on `quit`.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }

        match parser::parse_one(line) {
            UciMessage::Uci => self.cmd_uci(out)?,
            UciMessage::IsReady => writeln!(out, "readyok")?,
            UciMessage::SetOption { name, value } => {
                self.apply_setoption(name.trim(), value.as_deref());
            }
            UciMessage::UciNewGame => self.cmd_ucinewgame(),
            UciMessage::Position {
                startpos,
                fen,
                moves,
            } => {
                let fen_str = fen.as_ref().map(|f| f.as_str());
                let move_strs: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
                self.apply_position(startpos, fen_str, &move_strs);
            }
            UciMessage::Go {
                time_control,
                search_control,
            } => {
                let limits = self.go_to_limits(time_control.as_ref(), search_control.as_ref());
                self.do_go(limits, out)?;
            }
            // Searches run to completion before the next line is read
            UciMessage::Stop => {}
            UciMessage::Quit => return Ok(false),
            UciMessage::Unknown(ref s, _) => match s.split_whitespace().next() {
                Some("d") | Some("display") => self.cmd_display(out)?,
                Some("moves") => self.cmd_moves(out)?,
                _ => warn!(command = %s, "unknown command"),
            },
            _ => {}
        }
        out.flush()?;
        Ok(true)
    }

    fn cmd_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name Kibitz {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author Kibitz developers")?;
        writeln!(out)?;
        writeln!(
            out,
            "option name Strategy type combo default minimax var minimax var greedy var random"
        )?;
        writeln!(out, "option name KingSafety type check default false")?;
        writeln!(out, "option name Depth type spin default 3 min 1 max {}", MAX_DEPTH)?;
        writeln!(out, "option name Seed type string default")?;
        writeln!(out, "uciok")
    }

    fn apply_setoption(&mut self, name: &str, value: Option<&str>) {
        let opt = name.to_lowercase().replace([' ', '_'], "");
        let value = value.unwrap_or("").trim();
        match opt.as_str() {
            "strategy" => match StrategyKind::parse(value) {
                Some(kind) => self.strategy = kind,
                None => warn!(value, "unknown strategy"),
            },
            "kingsafety" => {
                self.king_safety = value.eq_ignore_ascii_case("true") || value == "1";
                self.game.set_rules(self.rules());
            }
            "depth" => {
                if let Ok(depth) = value.parse::<i32>() {
                    self.depth = Some(depth.clamp(1, MAX_DEPTH));
                }
            }
            "seed" => self.seed = value.parse().ok(),
            _ => warn!(name, "unknown option"),
        }
    }

    fn rules(&self) -> Rules {
        Rules::standard().with_king_safety(self.king_safety)
    }

    pub fn cmd_ucinewgame(&mut self) {
        self.game = Game::new().with_rules(self.rules());
    }

    /// Set up the position and replay `move_strs`. An unparsable position keeps
    /// the current game; replay stops at the first rejected move.
    fn apply_position(&mut self, startpos: bool, fen: Option<&str>, move_strs: &[String]) {
        let game = if startpos {
            Game::new()
        } else if let Some(fen_str) = fen {
            let turn = match fen_str.split_whitespace().nth(1) {
                Some("b") => Color::Black,
                _ => Color::White,
            };
            match Game::from_position(fen_str, turn) {
                Ok(game) => game,
                Err(err) => {
                    warn!(%err, fen = fen_str, "invalid position");
                    return;
                }
            }
        } else {
            return;
        };
        self.game = game.with_rules(self.rules());

        for s in move_strs {
            let mv: Move = match s.parse() {
                Ok(mv) => mv,
                Err(err) => {
                    warn!(%err, "cannot replay move");
                    return;
                }
            };
            if let Err(reason) = self.game.play(mv) {
                warn!(%reason, "cannot replay move");
                return;
            }
        }
    }

    /// Build SearchLimits from a parsed go command (time_control, search_control).
    fn go_to_limits(
        &self,
        time_control: Option<&UciTimeControl>,
        search_control: Option<&UciSearchControl>,
    ) -> SearchLimits {
        let mut limits = SearchLimits {
            depth: self.depth,
            ..SearchLimits::default()
        };

        if let Some(sc) = search_control {
            if let Some(depth) = sc.depth {
                limits.depth = Some(i32::from(depth));
            }
            limits.nodes = sc.nodes;
        }

        match time_control {
            Some(UciTimeControl::MoveTime(d)) => limits.movetime = to_std(d),
            Some(UciTimeControl::TimeLeft {
                white_time,
                black_time,
                white_increment,
                black_increment,
                moves_to_go,
            }) => {
                let (time, inc) = match self.game.turn() {
                    Color::White => (white_time, white_increment),
                    Color::Black => (black_time, black_increment),
                };
                if let Some(time) = time {
                    let moves_to_go = moves_to_go.map(i32::from).unwrap_or(30).max(1);
                    let inc = inc.unwrap_or_else(vampirc_uci::Duration::zero);
                    let budget = (*time / moves_to_go + inc / 2).min(*time / 2);
                    limits.movetime = to_std(&budget);
                }
            }
            _ => {}
        }

        limits
    }

    fn strategy_box(&self) -> Box<dyn Strategy> {
        match self.strategy {
            StrategyKind::Minimax => Box::new(MinimaxMover::new()),
            StrategyKind::Greedy => Box::new(GreedyMover::new()),
            StrategyKind::Random => match self.seed {
                Some(seed) => Box::new(RandomMover::seeded(seed)),
                None => Box::new(RandomMover::new()),
            },
        }
    }

    /// Search the current position and print `bestmove`. The move is not played.
    fn do_go<W: Write>(&mut self, limits: SearchLimits, out: &mut W) -> io::Result<()> {
        let mut searcher = Searcher::with_strategy(self.game.turn(), self.strategy_box())
            .with_rules(*self.game.rules())
            .with_limits(limits);

        match searcher.best_move(self.game.board(), &self.game.history()) {
            Ok(mv) => writeln!(out, "bestmove {}", mv),
            Err(err) => {
                warn!(%err, "no move to report");
                writeln!(out, "bestmove 0000")
            }
        }
    }

    fn cmd_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.game.board())?;
        writeln!(out, "  Turn: {}", self.game.turn())
    }

    fn cmd_moves<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let moves = legal_moves(self.game.rules(), self.game.board(), self.game.turn());
        let list: Vec<String> = moves.iter().copied().map(Move::to_uci).collect();
        writeln!(out, "moves {}", list.join(" "))
    }
}

fn to_std(d: &vampirc_uci::Duration) -> Option<Duration> {
    d.to_std().ok()
}

impl Default for Uci {
    fn default() -> Self {
        Self::new()
    }
}
