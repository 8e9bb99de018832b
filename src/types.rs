//! Piece, color and castling definitions.
//!
//! A piece is stored on the board as a 4-bit code: bits 0-2 hold the kind
//! (1 = pawn ... 6 = king) and bit 3 holds the color (0 = white, 1 = black).
//! Code 0 is an empty square. Codes 7, 8 and 15 are never valid.

/// Kind bits of a piece code
pub const KIND_MASK: u8 = 0b0111;
/// Color bit of a piece code
pub const COLOR_MASK: u8 = 0b1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Bishop = 2,
    Knight = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

/// Contents of one square, with its 4-bit board code as discriminant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    #[default]
    Empty = 0b0000,
    WhitePawn = 0b0001,
    WhiteBishop = 0b0010,
    WhiteKnight = 0b0011,
    WhiteRook = 0b0100,
    WhiteQueen = 0b0101,
    WhiteKing = 0b0110,
    BlackPawn = 0b1001,
    BlackBishop = 0b1010,
    BlackKnight = 0b1011,
    BlackRook = 0b1100,
    BlackQueen = 0b1101,
    BlackKing = 0b1110,
}

impl Piece {
    /// Every non-empty piece, white first.
    pub const ALL: [Piece; 12] = [
        Piece::WhitePawn,
        Piece::WhiteBishop,
        Piece::WhiteKnight,
        Piece::WhiteRook,
        Piece::WhiteQueen,
        Piece::WhiteKing,
        Piece::BlackPawn,
        Piece::BlackBishop,
        Piece::BlackKnight,
        Piece::BlackRook,
        Piece::BlackQueen,
        Piece::BlackKing,
    ];

    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        match (color, kind) {
            (Color::White, PieceKind::Pawn) => Piece::WhitePawn,
            (Color::White, PieceKind::Bishop) => Piece::WhiteBishop,
            (Color::White, PieceKind::Knight) => Piece::WhiteKnight,
            (Color::White, PieceKind::Rook) => Piece::WhiteRook,
            (Color::White, PieceKind::Queen) => Piece::WhiteQueen,
            (Color::White, PieceKind::King) => Piece::WhiteKing,
            (Color::Black, PieceKind::Pawn) => Piece::BlackPawn,
            (Color::Black, PieceKind::Bishop) => Piece::BlackBishop,
            (Color::Black, PieceKind::Knight) => Piece::BlackKnight,
            (Color::Black, PieceKind::Rook) => Piece::BlackRook,
            (Color::Black, PieceKind::Queen) => Piece::BlackQueen,
            (Color::Black, PieceKind::King) => Piece::BlackKing,
        }
    }

    /// Decode a 4-bit board code. Returns `None` for codes that are never
    /// written (7, 8, 15 and anything above 15).
    pub const fn from_code(code: u8) -> Option<Piece> {
        let piece = match code {
            0b0000 => Piece::Empty,
            0b0001 => Piece::WhitePawn,
            0b0010 => Piece::WhiteBishop,
            0b0011 => Piece::WhiteKnight,
            0b0100 => Piece::WhiteRook,
            0b0101 => Piece::WhiteQueen,
            0b0110 => Piece::WhiteKing,
            0b1001 => Piece::BlackPawn,
            0b1010 => Piece::BlackBishop,
            0b1011 => Piece::BlackKnight,
            0b1100 => Piece::BlackRook,
            0b1101 => Piece::BlackQueen,
            0b1110 => Piece::BlackKing,
            _ => return None,
        };
        Some(piece)
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    /// Color derived from bit 3; `None` for an empty square.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self {
            Piece::Empty => None,
            _ if self.code() & COLOR_MASK == 0 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    pub const fn kind(self) -> Option<PieceKind> {
        match self.code() & KIND_MASK {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Knight),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Same kind, other color. Empty stays empty.
    pub const fn flipped(self) -> Piece {
        match (self.kind(), self.color()) {
            (Some(kind), Some(color)) => Piece::new(kind, color.opposite()),
            _ => Piece::Empty,
        }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub const fn to_fen(self) -> Option<char> {
        match self {
            Piece::Empty => None,
            Piece::WhitePawn => Some('P'),
            Piece::WhiteBishop => Some('B'),
            Piece::WhiteKnight => Some('N'),
            Piece::WhiteRook => Some('R'),
            Piece::WhiteQueen => Some('Q'),
            Piece::WhiteKing => Some('K'),
            Piece::BlackPawn => Some('p'),
            Piece::BlackBishop => Some('b'),
            Piece::BlackKnight => Some('n'),
            Piece::BlackRook => Some('r'),
            Piece::BlackQueen => Some('q'),
            Piece::BlackKing => Some('k'),
        }
    }

    pub const fn from_fen(c: char) -> Option<Piece> {
        match c {
            'P' => Some(Piece::WhitePawn),
            'B' => Some(Piece::WhiteBishop),
            'N' => Some(Piece::WhiteKnight),
            'R' => Some(Piece::WhiteRook),
            'Q' => Some(Piece::WhiteQueen),
            'K' => Some(Piece::WhiteKing),
            'p' => Some(Piece::BlackPawn),
            'b' => Some(Piece::BlackBishop),
            'n' => Some(Piece::BlackKnight),
            'r' => Some(Piece::BlackRook),
            'q' => Some(Piece::BlackQueen),
            'k' => Some(Piece::BlackKing),
            _ => None,
        }
    }

    /// Character used by the debug dump; a space for an empty square.
    pub const fn letter(self) -> char {
        match self.to_fen() {
            Some(c) => c,
            None => ' ',
        }
    }
}

/// Castling rights bits, in meta order WK, WQ, BK, BQ
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastlingRight {
    WhiteKing,
    WhiteQueen,
    BlackKing,
    BlackQueen,
}

impl CastlingRight {
    /// FEN order: `KQkq`.
    pub const ALL: [CastlingRight; 4] = [
        CastlingRight::WhiteKing,
        CastlingRight::WhiteQueen,
        CastlingRight::BlackKing,
        CastlingRight::BlackQueen,
    ];

    /// Bit within the 4-bit castling field.
    #[inline]
    pub const fn bit(self) -> u32 {
        match self {
            CastlingRight::WhiteKing => 0b0001,
            CastlingRight::WhiteQueen => 0b0010,
            CastlingRight::BlackKing => 0b0100,
            CastlingRight::BlackQueen => 0b1000,
        }
    }

    pub const fn to_fen(self) -> char {
        match self {
            CastlingRight::WhiteKing => 'K',
            CastlingRight::WhiteQueen => 'Q',
            CastlingRight::BlackKing => 'k',
            CastlingRight::BlackQueen => 'q',
        }
    }

    pub const fn from_fen(c: char) -> Option<CastlingRight> {
        match c {
            'K' => Some(CastlingRight::WhiteKing),
            'Q' => Some(CastlingRight::WhiteQueen),
            'k' => Some(CastlingRight::BlackKing),
            'q' => Some(CastlingRight::BlackQueen),
            _ => None,
        }
    }
}
