//! Square indexing.
//!
//! A `Square` is a checked index into the 64 squares of the board, laid out
//! a1 = 0, b1 = 1, ..., h8 = 63. File is `index % 8`, rank is `index / 8`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ChessError, ChessResult};

/// File and rank names for algebraic notation
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
pub const RANK_NAMES: &[u8; 8] = b"12345678";

/// A board square, always in 0-63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const E1: Square = Square(4);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const E8: Square = Square(60);
    pub const H8: Square = Square(63);

    /// Square from a linear index (0 = a1, 63 = h8).
    pub fn from_index(index: usize) -> ChessResult<Square> {
        if index < 64 {
            Ok(Square(index as u8))
        } else {
            Err(ChessError::InvalidSquareIndex(index))
        }
    }

    /// Square from algebraic notation such as `"e4"` or `"H8"`.
    ///
    /// The input must be exactly two characters; the file letter is
    /// case-insensitive.
    pub fn from_algebraic(name: &str) -> ChessResult<Square> {
        let invalid = || ChessError::InvalidAlgebraic(name.to_string());

        let [file, rank] = name.as_bytes() else {
            return Err(invalid());
        };
        let file = match file.to_ascii_lowercase() {
            f @ b'a'..=b'h' => f - b'a',
            _ => return Err(invalid()),
        };
        let rank = match *rank {
            r @ b'1'..=b'8' => r - b'1',
            _ => return Err(invalid()),
        };

        Ok(Square(rank * 8 + file))
    }

    /// Square from 1-based coordinates: `x` is the file (1 = a), `y` the rank.
    pub fn from_coordinates(x: u8, y: u8) -> ChessResult<Square> {
        if !(1..=8).contains(&x) || !(1..=8).contains(&y) {
            return Err(ChessError::InvalidCoordinates { x, y });
        }
        Ok(Square((x - 1) + (y - 1) * 8))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based file, 0 = a.
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Zero-based rank, 0 = rank 1.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// 1-based `(file, rank)` coordinates.
    #[inline]
    pub const fn to_coordinates(self) -> (u8, u8) {
        (self.file() + 1, self.rank() + 1)
    }

    /// Lowercase algebraic name, e.g. `"g6"`.
    pub fn to_algebraic(self) -> String {
        self.to_string()
    }

    /// Point reflection through the board centre (`63 - index`).
    ///
    /// Used to read white-oriented tables for black pieces.
    #[inline]
    pub const fn mirror(self) -> Square {
        Square(63 - self.0)
    }

    /// All squares from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            FILE_NAMES[self.file() as usize] as char,
            RANK_NAMES[self.rank() as usize] as char
        )
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

impl TryFrom<usize> for Square {
    type Error = ChessError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Square::from_index(index)
    }
}
