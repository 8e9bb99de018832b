//! Error types for board construction, move application and FEN parsing.

use thiserror::Error;

use crate::square::Square;
use crate::types::Color;

/// Errors returned by the board representation.
///
/// Internal corruption (a nibble holding an impossible piece code) is not
/// represented here; it panics instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Square index outside 0-63.
    #[error("invalid square index: {0} (must be 0-63)")]
    InvalidSquareIndex(usize),

    /// Algebraic square that is not exactly a file a-h followed by a rank 1-8.
    #[error("invalid algebraic square: {0:?}")]
    InvalidAlgebraic(String),

    /// 1-based coordinates outside 1-8.
    #[error("invalid coordinates: ({x}, {y}) (must be 1-8)")]
    InvalidCoordinates { x: u8, y: u8 },

    /// The source square is empty or holds a piece of the side not to move.
    #[error("moving out of turn: no {to_move:?} piece on {from}")]
    OutOfTurn { from: Square, to_move: Color },

    #[error("can't capture own piece: {from} to {to}")]
    CaptureOwnPiece { from: Square, to: Square },

    /// Any FEN syntax problem. The payload says which field was rejected.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A metadata value does not fit its bit field.
    #[error("{field} out of range: {value} (max {max})")]
    FieldOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// En-passant targets only exist on rank 3 or rank 6.
    #[error("invalid en passant square: {0} (must be on rank 3 or 6)")]
    InvalidEnPassantSquare(Square),
}

/// Result type alias for board operations
pub type ChessResult<T> = Result<T, ChessError>;
