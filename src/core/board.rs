//! Chess board representation
//!
//! The board is a flat array of 64 optional pieces indexed a1 = 0 .. h8 = 63.
//! Every translation between the public 1-based (file, rank) coordinates and the
//! internal index lives in [`Square`].

use super::error::BoardError;
use std::fmt;

/// Placement field of the standard starting position.
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Square representation (0-63, a1=0, h8=63)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const H1: Square = Square(7);
    pub const E1: Square = Square(4);
    pub const E8: Square = Square(60);
    pub const A8: Square = Square(56);
    pub const H8: Square = Square(63);

    /// Build a square from 1-based coordinates.
    pub fn new(file: u8, rank: u8) -> Result<Self, BoardError> {
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Ok(Square((rank - 1) * 8 + (file - 1)))
        } else {
            Err(BoardError::OutOfBoundsCoordinate { file, rank })
        }
    }

    /// Build a square from signed 1-based coordinates, `None` when off the board.
    #[inline]
    pub fn offset(file: i8, rank: i8) -> Option<Self> {
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Some(Square(((rank - 1) * 8 + (file - 1)) as u8))
        } else {
            None
        }
    }

    /// Square from a zero-based index; `None` for 64 and above.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    /// All 64 squares in index order (a1, b1, .. h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// File as an ordinal, 1 (a) to 8 (h).
    #[inline]
    pub const fn file(self) -> u8 {
        (self.0 & 7) + 1
    }

    /// Rank as an ordinal, 1 to 8.
    #[inline]
    pub const fn rank(self) -> u8 {
        (self.0 >> 3) + 1
    }

    /// File as its letter, `'a'..='h'`.
    #[inline]
    pub const fn file_label(self) -> char {
        (b'a' + (self.0 & 7)) as char
    }

    /// Rank as its label, `'1'..='8'`.
    #[inline]
    pub const fn rank_label(self) -> char {
        (b'1' + (self.0 >> 3)) as char
    }

    /// Parse a square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Convert to algebraic notation
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_label(), self.rank_label())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_label(), self.rank_label())
    }
}

/// Piece color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a forward pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank (1-based) pawns start on.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

/// Piece type
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum PieceType {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Pawn,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase letter of the piece type
    pub const fn to_char(self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Rook => 'r',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Pawn => 'p',
        }
    }

    /// Parse piece type from character, ignoring case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceType::King),
            'q' => Some(PieceType::Queen),
            'r' => Some(PieceType::Rook),
            'b' => Some(PieceType::Bishop),
            'n' => Some(PieceType::Knight),
            'p' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/// A colored piece
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// Uppercase for white, lowercase for black
    pub fn to_char(self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Decode a placement letter. Case carries the color.
    pub fn from_char(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(piece_type, color))
    }
}

/// The chess board: 64 squares, at most one piece each.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Create a new empty board
    pub fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    pub fn create_empty() -> Self {
        Self::empty()
    }

    /// Create a board from the starting position
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        board.squares = parse_placement(START_PLACEMENT)
            .unwrap_or_else(|_| unreachable!("start placement is well formed"));
        board
    }

    /// Create a board from a placement string.
    pub fn from_position(text: &str) -> Result<Self, BoardError> {
        let mut board = Board::empty();
        board.import_position(text)?;
        Ok(board)
    }

    /// Replace the placement with the one described by `text`.
    ///
    /// Only the first whitespace-separated field is read, so a full FEN record
    /// is accepted. Nothing changes on error.
    pub fn import_position(&mut self, text: &str) -> Result<(), BoardError> {
        self.squares = parse_placement(text)?;
        Ok(())
    }

    /// Render the placement field, the inverse of [`Board::import_position`].
    pub fn to_placement(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    pub fn piece_at(&self, file: u8, rank: u8) -> Result<Option<Piece>, BoardError> {
        Ok(self.piece_on(Square::new(file, rank)?))
    }

    pub fn set_piece_at(
        &mut self,
        file: u8,
        rank: u8,
        piece: Option<Piece>,
    ) -> Result<(), BoardError> {
        self.set_piece_on(Square::new(file, rank)?, piece);
        Ok(())
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn set_piece_on(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    #[inline]
    pub fn is_empty_on(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Move whatever stands on `from` to `to`, capturing any occupant.
    /// Returns the captured piece. Callers are expected to have checked legality.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mover = self.squares[from.index()].take();
        std::mem::replace(&mut self.squares[to.index()], mover)
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_on(sq).map(|p| (sq, p)))
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().flatten().count()
    }

    /// First king of `color` in index order, if any.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.piece_type == PieceType::King && p.color == color)
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// Walk the placement field left to right with a (file, rank) cursor.
fn parse_placement(text: &str) -> Result<[Option<Piece>; 64], BoardError> {
    let mut squares = [None; 64];
    let placement = text.split_whitespace().next().unwrap_or("");
    let mut rank: u8 = 8;
    let mut file: u8 = 1;

    for (index, c) in placement.chars().enumerate() {
        let invalid = BoardError::InvalidPositionToken { token: c, index };
        match c {
            '/' => {
                if rank == 1 {
                    return Err(invalid);
                }
                rank -= 1;
                file = 1;
            }
            // '0' advances nothing; larger runs are bounded by the file check
            '0'..='9' => {
                let skip = c as u8 - b'0';
                if file + skip > 9 {
                    return Err(invalid);
                }
                file += skip;
            }
            _ => {
                let piece = Piece::from_char(c).ok_or(invalid)?;
                let sq = Square::new(file, rank).map_err(|_| invalid)?;
                squares[sq.index()] = Some(piece);
                file += 1;
            }
        }
    }

    Ok(squares)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")?;
        write!(f, "  Placement: {}", self.to_placement())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_placement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_index_is_rank_major() {
        let e4 = Square::new(5, 4).unwrap();
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.file(), 5);
        assert_eq!(e4.rank(), 4);
        assert_eq!(e4.rank_label(), '4');
        assert_eq!(e4.file_label(), 'e');
        assert_eq!(Square::from_index(28), Some(e4));
        assert_eq!(Square::from_index(63), Some(Square::H8));
        assert_eq!(Square::from_index(64), None);
    }

    #[test]
    fn placement_overflow_is_rejected() {
        assert_eq!(
            parse_placement("ppppppppp"),
            Err(BoardError::InvalidPositionToken { token: 'p', index: 8 })
        );
        assert_eq!(
            parse_placement("p8"),
            Err(BoardError::InvalidPositionToken { token: '8', index: 1 })
        );
        assert!(parse_placement("8/8/8/8/8/8/8/8/8").is_err());
    }
}
