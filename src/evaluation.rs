//! Static position evaluation.
//!
//! The score is material plus piece-square bonuses, in centipawns, from
//! white's point of view: white pieces count positive, black negative. A
//! black piece reads the tables at its mirrored square, so a position and
//! its color-flipped point reflection always score as exact negatives.

use crate::board::Board;
use crate::square::Square;
use crate::types::*;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

/// Non-king material per side at or below which `MaterialThreshold`
/// reports an endgame.
pub const ENDGAME_MATERIAL_LIMIT: i32 = 1300;

// Authored from white's side with rank 8 as the first row, so a white piece
// on (x, y) reads TABLE[8 - y][x - 1].

type Table = [[i32; 8]; 8];

const PAWN_TABLE: Table = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

const KNIGHT_TABLE: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE: Table = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  0,   0,   0,   5,   5,   0,   0,   0],
];

const QUEEN_TABLE: Table = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

// Kings read the central table until the endgame policy fires, then the
// shelter table.
const KING_SHELTER_TABLE: Table = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [ 20,  30,  10,   0,   0,  10,  30,  20],
];

const KING_CENTRAL_TABLE: Table = [
    [-50, -40, -30, -20, -20, -30, -40, -50],
    [-30, -20, -10,   0,   0, -10, -20, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -30,   0,   0,   0,   0, -30, -30],
    [-50, -30, -30, -30, -30, -30, -30, -50],
];

/// Decides which king table applies to a position.
pub trait EndgamePolicy {
    fn is_endgame(&self, board: &Board) -> bool;
}

/// Never reports an endgame, so kings always read the central table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeverEndgame;

impl EndgamePolicy for NeverEndgame {
    fn is_endgame(&self, _board: &Board) -> bool {
        false
    }
}

/// Endgame once both sides' non-king material is at or below `limit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialThreshold {
    pub limit: i32,
}

impl Default for MaterialThreshold {
    fn default() -> Self {
        MaterialThreshold {
            limit: ENDGAME_MATERIAL_LIMIT,
        }
    }
}

impl EndgamePolicy for MaterialThreshold {
    fn is_endgame(&self, board: &Board) -> bool {
        let (white, black) = material(board);
        white <= self.limit && black <= self.limit
    }
}

impl<F> EndgamePolicy for F
where
    F: Fn(&Board) -> bool,
{
    fn is_endgame(&self, board: &Board) -> bool {
        self(board)
    }
}

pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Signed piece-square bonus for `piece` standing on `at`.
pub fn position_bonus(piece: Piece, at: Square, endgame: bool) -> i32 {
    let (Some(kind), Some(color)) = (piece.kind(), piece.color()) else {
        return 0;
    };

    let table = match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King if endgame => &KING_SHELTER_TABLE,
        PieceKind::King => &KING_CENTRAL_TABLE,
    };

    let (lookup, sign) = match color {
        Color::White => (at, 1),
        Color::Black => (at.mirror(), -1),
    };
    let (x, y) = lookup.to_coordinates();

    sign * table[8 - y as usize][x as usize - 1]
}

/// Count material for both sides (excluding kings)
pub fn material(board: &Board) -> (i32, i32) {
    let mut white_material = 0;
    let mut black_material = 0;

    for (_, piece) in board.pieces() {
        let (Some(kind), Some(color)) = (piece.kind(), piece.color()) else {
            continue;
        };
        if kind == PieceKind::King {
            continue;
        }

        match color {
            Color::White => white_material += piece_value(kind),
            Color::Black => black_material += piece_value(kind),
        }
    }

    (white_material, black_material)
}

/// Material and piece-square evaluator, parameterised by its endgame rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator<P = NeverEndgame> {
    policy: P,
}

impl Evaluator<NeverEndgame> {
    pub const fn new() -> Self {
        Evaluator {
            policy: NeverEndgame,
        }
    }
}

impl<P: EndgamePolicy> Evaluator<P> {
    pub fn with_policy(policy: P) -> Self {
        Evaluator { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Evaluate the position from white's perspective (positive = white is better)
    pub fn value(&self, board: &Board) -> i32 {
        let endgame = self.policy.is_endgame(board);

        board
            .pieces()
            .map(|(at, piece)| {
                let (Some(kind), Some(color)) = (piece.kind(), piece.color()) else {
                    return 0;
                };
                let material = match color {
                    Color::White => piece_value(kind),
                    Color::Black => -piece_value(kind),
                };
                material + position_bonus(piece, at, endgame)
            })
            .sum()
    }

    /// Score from the perspective of the side to move
    pub fn relative_value(&self, board: &Board) -> i32 {
        match board.side_to_move() {
            Color::White => self.value(board),
            Color::Black => -self.value(board),
        }
    }
}

impl Board {
    /// Evaluation with the default evaluator.
    pub fn value(&self) -> i32 {
        Evaluator::new().value(self)
    }
}
