//! packed_chess - compact chess positions
//!
//! A chess position packed into four 64-bit words plus a 32-bit metadata
//! word, with:
//! - Checked square indexing and algebraic notation
//! - Immutable boards; `move_piece` returns a new position
//! - FEN parsing and generation
//! - Material and piece-square evaluation
//! - Zobrist position keys
//!
//! Legal move generation and search are left to the caller.

pub mod error;
pub mod square;
pub mod types;
pub mod board;
pub mod fen;
pub mod evaluation;
pub mod zobrist;

pub use board::{Board, BoardBuilder, STARTING_FEN};
pub use error::{ChessError, ChessResult};
pub use evaluation::{EndgamePolicy, Evaluator, MaterialThreshold, NeverEndgame};
pub use square::Square;
pub use types::{CastlingRight, Color, Piece, PieceKind};
