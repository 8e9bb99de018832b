//! Board representation.
//!
//! A `Board` is 36 bytes: four 64-bit words holding 16 squares of 4 bits
//! each, and one 32-bit metadata word. Boards are `Copy` values with no
//! public mutators; `move_piece` returns a new board and staging goes
//! through `BoardBuilder`.
//!
//! Metadata layout:
//!
//! | bits  | field                                              |
//! |-------|----------------------------------------------------|
//! | 0     | side to move (0 = white, 1 = black)                |
//! | 1-7   | half-move clock                                    |
//! | 8-11  | castling rights WK, WQ, BK, BQ                     |
//! | 12-16 | en passant: 0 none, 1-8 file on rank 3, 9-16 rank 6 |
//! | 17-31 | full move number                                   |

use std::fmt;

use crate::error::{ChessError, ChessResult};
use crate::square::Square;
use crate::types::*;

/// Starting position FEN
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const MAX_HALFMOVE_CLOCK: u32 = 0x7F;
pub const MAX_FULLMOVE_NUMBER: u32 = 0x7FFF;

const NIBBLE: u64 = 0b1111;

const SIDE_MASK: u32 = 0b1;
const HALFMOVE_SHIFT: u32 = 1;
const CASTLING_SHIFT: u32 = 8;
const EN_PASSANT_SHIFT: u32 = 12;
const EN_PASSANT_MASK: u32 = 0b1_1111;
const FULLMOVE_SHIFT: u32 = 17;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Packed chess position
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [u64; 4],
    meta: u32,
}

impl Board {
    /// Create a board. With `setup` the standard 32 pieces are placed,
    /// otherwise every square is empty.
    ///
    /// Either way white is to move, all four castling rights are set, there
    /// is no en passant target, the half-move clock is 0 and the move
    /// number is 1.
    pub fn new(setup: bool) -> Self {
        let mut board = Board {
            squares: [0; 4],
            meta: 0,
        };

        if setup {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                board.set_piece(Piece::new(kind, Color::White), square(file));
                board.set_piece(Piece::new(PieceKind::Pawn, Color::White), square(8 + file));
                board.set_piece(Piece::new(PieceKind::Pawn, Color::Black), square(48 + file));
                board.set_piece(Piece::new(kind, Color::Black), square(56 + file));
            }
        }

        for right in CastlingRight::ALL {
            board.set_castling_right(right, true);
        }
        board.set_fullmove_number(1);

        board
    }

    /// Piece on a square. Pure bit extraction.
    #[inline]
    pub fn piece(&self, at: Square) -> Piece {
        let (word, shift) = locate(at);
        let code = ((self.squares[word] >> shift) & NIBBLE) as u8;
        match Piece::from_code(code) {
            Some(piece) => piece,
            None => unreachable!("corrupt piece code {code:#06b} on {at}"),
        }
    }

    /// Color of the piece on a square, `None` when empty.
    #[inline]
    pub fn color(&self, at: Square) -> Option<Color> {
        self.piece(at).color()
    }

    /// Occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all()
            .map(|sq| (sq, self.piece(sq)))
            .filter(|(_, piece)| !piece.is_empty())
    }

    pub fn side_to_move(&self) -> Color {
        if self.meta & SIDE_MASK == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Moves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        (self.meta >> HALFMOVE_SHIFT) & MAX_HALFMOVE_CLOCK
    }

    pub fn fullmove_number(&self) -> u32 {
        (self.meta >> FULLMOVE_SHIFT) & MAX_FULLMOVE_NUMBER
    }

    pub fn castling_right(&self, right: CastlingRight) -> bool {
        (self.meta >> CASTLING_SHIFT) & right.bit() != 0
    }

    /// Raw 4-bit castling field (WK = bit 0 ... BQ = bit 3).
    pub fn castling_bits(&self) -> u32 {
        (self.meta >> CASTLING_SHIFT) & 0b1111
    }

    /// Raw en passant code: 0 none, 1-8 a3-h3, 9-16 a6-h6.
    pub fn en_passant_code(&self) -> u8 {
        ((self.meta >> EN_PASSANT_SHIFT) & EN_PASSANT_MASK) as u8
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        match self.en_passant_code() {
            0 => None,
            code @ 1..=8 => Some(square(16 + code as usize - 1)),
            code => Some(square(40 + code as usize - 9)),
        }
    }

    /// The four packed square words.
    pub fn words(&self) -> [u64; 4] {
        self.squares
    }

    /// The packed metadata word.
    pub fn meta(&self) -> u32 {
        self.meta
    }

    pub fn copy(&self) -> Self {
        *self
    }

    /// Relocate the piece on `from` to `to` and return the resulting board.
    ///
    /// Only ownership is validated: the source must hold a piece of the
    /// side to move and the destination must not hold a piece of the same
    /// color. An empty source has no color, so it fails the turn check.
    /// `self` is never modified.
    pub fn move_piece(&self, from: Square, to: Square) -> ChessResult<Board> {
        let moving = self.piece(from);
        let mover = self.side_to_move();
        if moving.color() != Some(mover) {
            return Err(ChessError::OutOfTurn { from, to_move: mover });
        }
        let target = self.color(to);
        if target == Some(mover) {
            return Err(ChessError::CaptureOwnPiece { from, to });
        }

        // Everything below classifies from `self` and writes to `next`.
        let mut next = *self;

        next.set_piece(moving, to);
        next.remove_piece(from);

        next.set_en_passant_code(double_push_code(moving, from, to));

        match from {
            Square::A1 => next.set_castling_right(CastlingRight::WhiteQueen, false),
            Square::H1 => next.set_castling_right(CastlingRight::WhiteKing, false),
            Square::E1 => {
                next.set_castling_right(CastlingRight::WhiteKing, false);
                next.set_castling_right(CastlingRight::WhiteQueen, false);
            }
            Square::A8 => next.set_castling_right(CastlingRight::BlackQueen, false),
            Square::H8 => next.set_castling_right(CastlingRight::BlackKing, false),
            Square::E8 => {
                next.set_castling_right(CastlingRight::BlackKing, false);
                next.set_castling_right(CastlingRight::BlackQueen, false);
            }
            _ => {}
        }

        next.toggle_side_to_move();
        if next.side_to_move() == Color::White {
            next.set_fullmove_number((self.fullmove_number() + 1).min(MAX_FULLMOVE_NUMBER));
        }

        let is_pawn = moving.kind() == Some(PieceKind::Pawn);
        let is_capture = target == Some(mover.opposite());
        if is_pawn || is_capture {
            next.set_halfmove_clock(0);
        } else {
            next.set_halfmove_clock((self.halfmove_clock() + 1).min(MAX_HALFMOVE_CLOCK));
        }

        Ok(next)
    }

    /// Plain text view: eight rows of eight characters (rank 8 first, space
    /// for empty squares) followed by the game state.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity(160);

        for rank in (0..8).rev() {
            for file in 0..8 {
                out.push(self.piece(square(rank * 8 + file)).letter());
            }
            out.push('\n');
        }

        match self.side_to_move() {
            Color::White => out.push_str("White to move\n"),
            Color::Black => out.push_str("Black to move\n"),
        }
        if self.castling_bits() != 0 {
            let rights: String = CastlingRight::ALL
                .iter()
                .filter(|&&r| self.castling_right(r))
                .map(|r| r.to_fen())
                .collect();
            out.push_str(&format!("Castling : {rights}\n"));
        }
        if let Some(target) = self.en_passant_target() {
            out.push_str(&format!("En passant : {target}\n"));
        }
        out.push_str(&format!("Half move count : {}\n", self.halfmove_clock()));
        out.push_str(&format!("Move count : {}\n", self.fullmove_number()));

        out
    }

    /// Display the board as a framed grid
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for rank in (0..8).rev() {
            let mut row = format!("{} |", rank + 1);
            for file in 0..8 {
                let piece = self.piece(square(rank * 8 + file));
                row.push_str(&format!(" {} |", piece.letter()));
            }
            lines.push(row);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());

        lines.join("\n")
    }

    // Staging writers. Only `BoardBuilder`, the constructors and
    // `move_piece` (on its private copy) call these.

    fn set_piece(&mut self, piece: Piece, at: Square) {
        let (word, shift) = locate(at);
        self.squares[word] = (self.squares[word] & !(NIBBLE << shift)) | (u64::from(piece.code()) << shift);
    }

    fn remove_piece(&mut self, at: Square) {
        let (word, shift) = locate(at);
        self.squares[word] &= !(NIBBLE << shift);
    }

    fn set_side_to_move(&mut self, color: Color) {
        match color {
            Color::White => self.meta &= !SIDE_MASK,
            Color::Black => self.meta |= SIDE_MASK,
        }
    }

    fn toggle_side_to_move(&mut self) {
        self.meta ^= SIDE_MASK;
    }

    fn set_halfmove_clock(&mut self, count: u32) {
        debug_assert!(count <= MAX_HALFMOVE_CLOCK);
        self.meta &= !(MAX_HALFMOVE_CLOCK << HALFMOVE_SHIFT);
        self.meta |= (count & MAX_HALFMOVE_CLOCK) << HALFMOVE_SHIFT;
    }

    fn set_fullmove_number(&mut self, count: u32) {
        debug_assert!(count <= MAX_FULLMOVE_NUMBER);
        self.meta &= !(MAX_FULLMOVE_NUMBER << FULLMOVE_SHIFT);
        self.meta |= (count & MAX_FULLMOVE_NUMBER) << FULLMOVE_SHIFT;
    }

    fn set_castling_right(&mut self, right: CastlingRight, enabled: bool) {
        let bit = right.bit() << CASTLING_SHIFT;
        if enabled {
            self.meta |= bit;
        } else {
            self.meta &= !bit;
        }
    }

    fn set_en_passant_code(&mut self, code: u8) {
        debug_assert!(code <= 16);
        self.meta &= !(EN_PASSANT_MASK << EN_PASSANT_SHIFT);
        self.meta |= (u32::from(code) & EN_PASSANT_MASK) << EN_PASSANT_SHIFT;
    }
}

/// Word index and bit shift of a square's nibble.
#[inline]
fn locate(at: Square) -> (usize, u32) {
    let index = at.index();
    (index / 16, (index % 16) as u32 * 4)
}

/// Square for an index known to be in range.
#[inline]
fn square(index: usize) -> Square {
    match Square::from_index(index) {
        Ok(sq) => sq,
        Err(_) => unreachable!("square index {index} out of range"),
    }
}

/// En passant code left behind by a move: a pawn leaving its home rank two
/// ranks forward on the same file.
fn double_push_code(moving: Piece, from: Square, to: Square) -> u8 {
    if from.file() != to.file() {
        return 0;
    }
    match (moving, from.rank(), to.rank()) {
        (Piece::WhitePawn, 1, 3) => from.file() + 1,
        (Piece::BlackPawn, 6, 4) => from.file() + 9,
        _ => 0,
    }
}

/// Encode an en passant target square, rejecting squares off ranks 3 and 6.
fn en_passant_code_for(target: Square) -> ChessResult<u8> {
    match target.rank() {
        2 => Ok(target.file() + 1),
        5 => Ok(target.file() + 9),
        _ => Err(ChessError::InvalidEnPassantSquare(target)),
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(true)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("squares", &format_args!("{:016x?}", self.squares))
            .field("meta", &format_args!("{:#034b}", self.meta))
            .finish()
    }
}

/// Staging area for building a board piece by piece.
///
/// The builder owns its board privately; `build` hands out a copy, so a
/// built board can never be changed through the builder afterwards.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    board: Board,
}

impl BoardBuilder {
    /// Empty squares with the default metadata of `Board::new(false)`.
    pub fn new() -> Self {
        BoardBuilder {
            board: Board::new(false),
        }
    }

    /// Start from an existing position.
    pub fn from_board(board: Board) -> Self {
        BoardBuilder { board }
    }

    /// Put `piece` on `at`, replacing whatever was there.
    pub fn piece(&mut self, piece: Piece, at: Square) -> &mut Self {
        self.board.set_piece(piece, at);
        self
    }

    pub fn remove_piece(&mut self, at: Square) -> &mut Self {
        self.board.remove_piece(at);
        self
    }

    pub fn side_to_move(&mut self, color: Color) -> &mut Self {
        self.board.set_side_to_move(color);
        self
    }

    pub fn castling_right(&mut self, right: CastlingRight, enabled: bool) -> &mut Self {
        self.board.set_castling_right(right, enabled);
        self
    }

    pub fn clear_castling_rights(&mut self) -> &mut Self {
        for right in CastlingRight::ALL {
            self.board.set_castling_right(right, false);
        }
        self
    }

    /// Set or clear the en passant target. Only rank 3 and rank 6 squares
    /// are representable.
    pub fn en_passant_target(&mut self, target: Option<Square>) -> ChessResult<&mut Self> {
        let code = match target {
            Some(sq) => en_passant_code_for(sq)?,
            None => 0,
        };
        self.board.set_en_passant_code(code);
        Ok(self)
    }

    pub fn halfmove_clock(&mut self, count: u32) -> ChessResult<&mut Self> {
        if count > MAX_HALFMOVE_CLOCK {
            return Err(ChessError::FieldOutOfRange {
                field: "half-move clock",
                value: count,
                max: MAX_HALFMOVE_CLOCK,
            });
        }
        self.board.set_halfmove_clock(count);
        Ok(self)
    }

    pub fn fullmove_number(&mut self, count: u32) -> ChessResult<&mut Self> {
        if count > MAX_FULLMOVE_NUMBER {
            return Err(ChessError::FieldOutOfRange {
                field: "full move number",
                value: count,
                max: MAX_FULLMOVE_NUMBER,
            });
        }
        self.board.set_fullmove_number(count);
        Ok(self)
    }

    pub fn build(&self) -> Board {
        self.board
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        BoardBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn empty_board_metadata() {
        let b = Board::new(false);
        assert_eq!(b.words(), [0; 4]);
        assert_eq!(b.side_to_move(), Color::White);
        assert_eq!(b.halfmove_clock(), 0);
        assert_eq!(b.fullmove_number(), 1);
        assert_eq!(b.en_passant_target(), None);
        assert!(CastlingRight::ALL.iter().all(|&r| b.castling_right(r)));
        assert_eq!(b.meta(), 0b1111 << 8 | 1 << 17);
    }

    #[test]
    fn starting_position_layout() {
        let b = Board::new(true);
        let black_back = [
            Piece::BlackRook,
            Piece::BlackKnight,
            Piece::BlackBishop,
            Piece::BlackQueen,
            Piece::BlackKing,
            Piece::BlackBishop,
            Piece::BlackKnight,
            Piece::BlackRook,
        ];
        for file in 0..8u8 {
            let x = file + 1;
            assert_eq!(b.piece(Square::from_coordinates(x, 8).unwrap()), black_back[file as usize]);
            assert_eq!(b.piece(Square::from_coordinates(x, 7).unwrap()), Piece::BlackPawn);
            assert_eq!(b.piece(Square::from_coordinates(x, 2).unwrap()), Piece::WhitePawn);
            assert_eq!(b.piece(Square::from_coordinates(x, 1).unwrap()), black_back[file as usize].flipped());
            for y in 3..=6 {
                assert_eq!(b.piece(Square::from_coordinates(x, y).unwrap()), Piece::Empty);
            }
        }
        assert_eq!(b.pieces().count(), 32);
        assert_eq!(b, Board::default());
    }

    #[test]
    fn set_piece_touches_one_nibble() {
        for at in Square::all() {
            for piece in Piece::ALL {
                let mut builder = BoardBuilder::from_board(Board::new(true));
                let before = builder.build();

                builder.piece(piece, at);
                let placed = builder.build();
                assert_eq!(placed.piece(at), piece);
                assert_eq!(placed.color(at), piece.color());

                builder.remove_piece(at);
                let removed = builder.build();
                assert_eq!(removed.piece(at), Piece::Empty);
                assert_eq!(removed.color(at), None);

                for other in Square::all().filter(|&o| o != at) {
                    assert_eq!(placed.piece(other), before.piece(other), "{piece:?} on {at} disturbed {other}");
                    assert_eq!(removed.piece(other), before.piece(other));
                }
                assert_eq!(removed.meta(), before.meta());
            }
        }
    }

    #[test]
    fn set_piece_overwrites_occupied_square() {
        let mut builder = BoardBuilder::new();
        builder.piece(Piece::BlackQueen, sq("d4"));
        builder.piece(Piece::WhitePawn, sq("d4"));
        assert_eq!(builder.build().piece(sq("d4")), Piece::WhitePawn);
        builder.piece(Piece::Empty, sq("d4"));
        assert_eq!(builder.build(), Board::new(false));
    }

    #[test]
    fn builder_metadata_fields_do_not_overlap() {
        let mut builder = BoardBuilder::new();
        builder
            .side_to_move(Color::Black)
            .clear_castling_rights()
            .castling_right(CastlingRight::BlackKing, true);
        builder.halfmove_clock(MAX_HALFMOVE_CLOCK).unwrap();
        builder.fullmove_number(MAX_FULLMOVE_NUMBER).unwrap();
        builder.en_passant_target(Some(sq("h6"))).unwrap();
        let b = builder.build();

        assert_eq!(b.side_to_move(), Color::Black);
        assert_eq!(b.halfmove_clock(), 127);
        assert_eq!(b.fullmove_number(), 32767);
        assert_eq!(b.en_passant_code(), 16);
        assert_eq!(b.en_passant_target(), Some(sq("h6")));
        assert_eq!(b.castling_bits(), 0b0100);
        assert!(b.castling_right(CastlingRight::BlackKing));
        assert!(!b.castling_right(CastlingRight::WhiteKing));

        builder.halfmove_clock(0).unwrap();
        let b2 = builder.build();
        assert_eq!(b2.fullmove_number(), 32767);
        assert_eq!(b2.en_passant_code(), 16);
        assert_eq!(b2.side_to_move(), Color::Black);
    }

    #[test]
    fn builder_rejects_out_of_range_metadata() {
        let mut builder = BoardBuilder::new();
        assert!(matches!(builder.halfmove_clock(128), Err(ChessError::FieldOutOfRange { .. })));
        assert!(matches!(builder.fullmove_number(32768), Err(ChessError::FieldOutOfRange { .. })));
        assert_eq!(
            builder.en_passant_target(Some(sq("e4"))).map(|_| ()),
            Err(ChessError::InvalidEnPassantSquare(sq("e4")))
        );
        assert_eq!(builder.build(), Board::new(false));
    }

    #[test]
    fn en_passant_codes_map_to_squares() {
        let mut builder = BoardBuilder::new();
        for file in 0..8u8 {
            let white_target = Square::from_coordinates(file + 1, 3).unwrap();
            builder.en_passant_target(Some(white_target)).unwrap();
            assert_eq!(builder.build().en_passant_code(), file + 1);
            assert_eq!(builder.build().en_passant_target(), Some(white_target));

            let black_target = Square::from_coordinates(file + 1, 6).unwrap();
            builder.en_passant_target(Some(black_target)).unwrap();
            assert_eq!(builder.build().en_passant_code(), file + 9);
            assert_eq!(builder.build().en_passant_target(), Some(black_target));
        }
        builder.en_passant_target(None).unwrap();
        assert_eq!(builder.build().en_passant_code(), 0);
    }

    #[test]
    fn copy_is_independent() {
        let mut builder = BoardBuilder::new();
        builder
            .piece(Piece::WhiteBishop, Square::from_index(34).unwrap())
            .piece(Piece::WhiteKing, Square::from_index(36).unwrap())
            .piece(Piece::BlackKing, Square::from_index(43).unwrap());
        let b = builder.build();
        let c = b.copy();
        assert_eq!(b, c);
        assert_eq!(b.words(), c.words());
        assert_eq!(b.meta(), c.meta());

        builder.remove_piece(Square::from_index(34).unwrap());
        assert_eq!(b, c);
        assert_ne!(builder.build(), b);
    }

    #[test]
    fn move_touches_only_affected_words() {
        let mut builder = BoardBuilder::new();
        builder
            .piece(Piece::WhiteBishop, Square::from_index(34).unwrap())
            .piece(Piece::WhiteKing, Square::from_index(36).unwrap())
            .piece(Piece::BlackKing, Square::from_index(43).unwrap());
        let b = builder.build();

        let nb = b
            .move_piece(Square::from_index(36).unwrap(), Square::from_index(52).unwrap())
            .unwrap();

        assert_ne!(nb.side_to_move(), b.side_to_move());
        assert_eq!(nb.words()[0], b.words()[0]);
        assert_eq!(nb.words()[1], b.words()[1]);
        assert_ne!(nb.words()[2], b.words()[2]);
        assert_ne!(nb.words()[3], b.words()[3]);
    }

    #[test]
    fn move_preconditions() {
        let b = Board::new(true);

        assert_eq!(
            b.move_piece(sq("e4"), sq("e5")),
            Err(ChessError::OutOfTurn {
                from: sq("e4"),
                to_move: Color::White
            })
        );
        assert_eq!(
            b.move_piece(sq("e7"), sq("e5")),
            Err(ChessError::OutOfTurn {
                from: sq("e7"),
                to_move: Color::White
            })
        );
        assert_eq!(
            b.move_piece(sq("a1"), sq("a2")),
            Err(ChessError::CaptureOwnPiece {
                from: sq("a1"),
                to: sq("a2")
            })
        );
        assert_eq!(
            b.move_piece(sq("e2"), sq("e2")),
            Err(ChessError::CaptureOwnPiece {
                from: sq("e2"),
                to: sq("e2")
            })
        );
        assert_eq!(b, Board::new(true));
    }

    #[test]
    fn turn_check_runs_before_other_preconditions() {
        let b = Board::new(true).move_piece(sq("e2"), sq("e4")).unwrap();

        // Empty source with black to move.
        assert_eq!(
            b.move_piece(sq("d4"), sq("d5")),
            Err(ChessError::OutOfTurn {
                from: sq("d4"),
                to_move: Color::Black
            })
        );
        // White piece onto its own piece: the turn is reported, not the capture.
        assert_eq!(
            b.move_piece(sq("d1"), sq("d2")),
            Err(ChessError::OutOfTurn {
                from: sq("d1"),
                to_move: Color::Black
            })
        );
        assert_eq!(
            b.move_piece(sq("d8"), sq("d7")),
            Err(ChessError::CaptureOwnPiece {
                from: sq("d8"),
                to: sq("d7")
            })
        );
    }

    #[test]
    fn move_does_not_mutate_receiver() {
        let b = Board::new(true);
        let snapshot = b;
        let nb = b.move_piece(sq("g1"), sq("f3")).unwrap();
        assert_eq!(b, snapshot);
        assert_eq!(nb.piece(sq("f3")), Piece::WhiteKnight);
        assert_eq!(nb.piece(sq("g1")), Piece::Empty);
        assert_eq!(b.piece(sq("g1")), Piece::WhiteKnight);
    }

    #[test]
    fn capture_resets_halfmove_clock() {
        let mut builder = BoardBuilder::new();
        builder
            .piece(Piece::WhiteRook, sq("a4"))
            .piece(Piece::BlackKnight, sq("a7"))
            .piece(Piece::BlackKing, sq("h8"));
        builder.halfmove_clock(9).unwrap();
        let b = builder.build();

        let quiet = b.move_piece(sq("a4"), sq("b4")).unwrap();
        assert_eq!(quiet.halfmove_clock(), 10);

        let capture = b.move_piece(sq("a4"), sq("a7")).unwrap();
        assert_eq!(capture.halfmove_clock(), 0);
        assert_eq!(capture.piece(sq("a7")), Piece::WhiteRook);
        assert_eq!(capture.pieces().count(), 2);
    }

    #[test]
    fn clocks_saturate() {
        let mut builder = BoardBuilder::new();
        builder
            .piece(Piece::BlackRook, sq("a4"))
            .side_to_move(Color::Black);
        builder.halfmove_clock(MAX_HALFMOVE_CLOCK).unwrap();
        builder.fullmove_number(MAX_FULLMOVE_NUMBER).unwrap();
        let nb = builder.build().move_piece(sq("a4"), sq("a5")).unwrap();
        assert_eq!(nb.halfmove_clock(), MAX_HALFMOVE_CLOCK);
        assert_eq!(nb.fullmove_number(), MAX_FULLMOVE_NUMBER);
        assert_eq!(nb.side_to_move(), Color::White);
    }

    #[test]
    fn double_push_sets_en_passant() {
        let b = Board::new(true);
        let white = b.move_piece(sq("e2"), sq("e4")).unwrap();
        assert_eq!(white.en_passant_code(), 5);
        assert_eq!(white.en_passant_target(), Some(sq("e3")));

        let black = white.move_piece(sq("c7"), sq("c5")).unwrap();
        assert_eq!(black.en_passant_code(), 11);
        assert_eq!(black.en_passant_target(), Some(sq("c6")));

        let single = black.move_piece(sq("a2"), sq("a3")).unwrap();
        assert_eq!(single.en_passant_target(), None);
    }

    #[test]
    fn non_pawn_or_off_file_two_rank_moves_clear_en_passant() {
        let b = Board::new(true).move_piece(sq("d2"), sq("d4")).unwrap();
        assert_eq!(b.en_passant_code(), 4);
        let knight = b.move_piece(sq("g8"), sq("f6")).unwrap();
        assert_eq!(knight.en_passant_code(), 0);

        let mut builder = BoardBuilder::new();
        builder.piece(Piece::WhitePawn, sq("b2"));
        let diagonal = builder.build().move_piece(sq("b2"), sq("c4")).unwrap();
        assert_eq!(diagonal.en_passant_code(), 0);
    }

    #[test]
    fn king_move_revokes_both_rights() {
        let mut builder = BoardBuilder::new();
        builder
            .piece(Piece::WhiteKing, Square::E1)
            .piece(Piece::BlackKing, Square::E8);
        let b = builder.build().move_piece(Square::E1, sq("e2")).unwrap();
        assert!(!b.castling_right(CastlingRight::WhiteKing));
        assert!(!b.castling_right(CastlingRight::WhiteQueen));
        assert!(b.castling_right(CastlingRight::BlackKing));
        assert!(b.castling_right(CastlingRight::BlackQueen));

        let b = b.move_piece(Square::E8, sq("d7")).unwrap();
        assert_eq!(b.castling_bits(), 0);
    }

    #[test]
    fn corner_moves_revoke_single_right() {
        let cases = [
            (Square::A1, Piece::WhiteRook, Color::White, CastlingRight::WhiteQueen),
            (Square::H1, Piece::WhiteRook, Color::White, CastlingRight::WhiteKing),
            (Square::A8, Piece::BlackRook, Color::Black, CastlingRight::BlackQueen),
            (Square::H8, Piece::BlackRook, Color::Black, CastlingRight::BlackKing),
        ];
        for (corner, rook, side, right) in cases {
            let mut builder = BoardBuilder::new();
            builder.piece(rook, corner).side_to_move(side);
            let to = Square::from_index(27).unwrap();
            let b = builder.build().move_piece(corner, to).unwrap();
            for other in CastlingRight::ALL {
                assert_eq!(b.castling_right(other), other != right, "{corner} revoked {other:?}");
            }
        }
    }

    #[test]
    fn dump_shows_pieces_and_state() {
        let b = Board::new(true);
        assert_eq!(
            b.dump(),
            "rnbqkbnr\npppppppp\n        \n        \n        \n        \nPPPPPPPP\nRNBQKBNR\n\
             White to move\nCastling : KQkq\nHalf move count : 0\nMove count : 1\n"
        );

        let b = b
            .move_piece(sq("b1"), sq("c3"))
            .and_then(|b| b.move_piece(sq("b8"), sq("c6")))
            .and_then(|b| b.move_piece(sq("d2"), sq("d4")))
            .unwrap();
        assert_eq!(
            b.dump(),
            "r bqkbnr\npppppppp\n  n     \n        \n   P    \n  N     \nPPP PPPP\nR BQKBNR\n\
             Black to move\nCastling : KQkq\nEn passant : d3\nHalf move count : 0\nMove count : 2\n"
        );
    }

    #[test]
    fn display_has_frame() {
        let text = Board::new(true).to_string();
        assert!(text.starts_with("  +---+"));
        assert!(text.contains("8 | r | n | b | q | k | b | n | r |"));
        assert!(text.ends_with("    a   b   c   d   e   f   g   h"));
    }
}
