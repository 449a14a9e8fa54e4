//! Move representation
//!
//! A move is a pair of squares. It carries no piece and no board reference;
//! everything else is resolved against the board it is played on.

use super::board::Square;
use super::error::MoveParseError;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// The move that undoes this one geometrically.
    #[inline]
    pub const fn reversed(self) -> Self {
        Move {
            from: self.to,
            to: self.from,
        }
    }

    /// Signed (file, rank) delta from `from` to `to`.
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        (
            self.to.file() as i8 - self.from.file() as i8,
            self.to.rank() as i8 - self.from.rank() as i8,
        )
    }

    /// Convert to UCI notation (e.g., "e2e4")
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parse UCI long algebraic notation. Promotion suffixes are not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MoveParseError {
            text: s.to_string(),
        };
        if s.len() != 4 || !s.is_ascii() {
            return Err(err());
        }
        let from = Square::from_algebraic(&s[0..2]).ok_or_else(err)?;
        let to = Square::from_algebraic(&s[2..4]).ok_or_else(err)?;
        Ok(Move::new(from, to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
