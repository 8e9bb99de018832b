//! FEN parsing and generation.
//!
//! Six space separated fields: placement, side to move, castling rights,
//! en passant target, half-move clock, full move number.

use std::str::FromStr;

use crate::board::{Board, BoardBuilder, MAX_FULLMOVE_NUMBER, MAX_HALFMOVE_CLOCK};
use crate::error::{ChessError, ChessResult};
use crate::square::Square;
use crate::types::*;

fn invalid(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(reason.into())
}

impl Board {
    /// Create a board from a FEN string
    pub fn from_fen(fen: &str) -> ChessResult<Board> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let [placement, side, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
            return Err(invalid(format!("expected 6 fields, found {}", fields.len())));
        };

        let mut builder = BoardBuilder::new();
        parse_placement(placement, &mut builder)?;
        builder.side_to_move(parse_side_to_move(side)?);
        parse_castling(castling, &mut builder)?;
        builder
            .en_passant_target(parse_en_passant(en_passant)?)
            .map_err(|e| invalid(e.to_string()))?;
        builder
            .halfmove_clock(parse_counter(halfmove, "half-move clock", MAX_HALFMOVE_CLOCK)?)
            .map_err(|e| invalid(e.to_string()))?;
        builder
            .fullmove_number(parse_counter(fullmove, "full move number", MAX_FULLMOVE_NUMBER)?)
            .map_err(|e| invalid(e.to_string()))?;

        Ok(builder.build())
    }

    /// Generate FEN string from current board state
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        // Piece placement
        for rank in (0..8u8).rev() {
            let mut empty_count = 0;
            for file in 0..8u8 {
                let at = square_at(file, rank);
                match self.piece(at).to_fen() {
                    None => empty_count += 1,
                    Some(c) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(c);
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        // Active color
        fen.push(' ');
        fen.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        // Castling rights
        fen.push(' ');
        if self.castling_bits() == 0 {
            fen.push('-');
        } else {
            for right in CastlingRight::ALL {
                if self.castling_right(right) {
                    fen.push(right.to_fen());
                }
            }
        }

        // En passant
        fen.push(' ');
        match self.en_passant_target() {
            Some(target) => fen.push_str(&target.to_algebraic()),
            None => fen.push('-'),
        }

        // Halfmove clock and fullmove number
        fen.push_str(&format!(" {} {}", self.halfmove_clock(), self.fullmove_number()));

        fen
    }
}

impl FromStr for Board {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

fn square_at(file: u8, rank: u8) -> Square {
    match Square::from_coordinates(file + 1, rank + 1) {
        Ok(sq) => sq,
        Err(_) => unreachable!("file {file} rank {rank} out of range"),
    }
}

fn parse_placement(placement: &str, builder: &mut BoardBuilder) -> ChessResult<()> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(invalid(format!("placement must have 8 ranks, found {}", rows.len())));
    }

    for (i, row) in rows.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0u8;

        for c in row.chars() {
            if let Some(piece) = Piece::from_fen(c) {
                if file >= 8 {
                    return Err(invalid(format!("rank {} has more than 8 files", rank + 1)));
                }
                builder.piece(piece, square_at(file, rank));
                file += 1;
            } else if let Some(run @ 1..=8) = c.to_digit(10) {
                file += run as u8;
                if file > 8 {
                    return Err(invalid(format!("rank {} has more than 8 files", rank + 1)));
                }
            } else {
                return Err(invalid(format!("unexpected character {c:?} in placement")));
            }
        }

        if file != 8 {
            return Err(invalid(format!("rank {} has {file} files, expected 8", rank + 1)));
        }
    }

    Ok(())
}

fn parse_side_to_move(side: &str) -> ChessResult<Color> {
    match side {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("side to move must be 'w' or 'b', found {side:?}"))),
    }
}

/// Castling field: `-` or one to four distinct letters from `KQkq`.
/// Unknown or repeated letters are rejected.
fn parse_castling(castling: &str, builder: &mut BoardBuilder) -> ChessResult<()> {
    builder.clear_castling_rights();
    if castling == "-" {
        return Ok(());
    }

    let mut seen = 0u32;
    for c in castling.chars() {
        let right = CastlingRight::from_fen(c)
            .ok_or_else(|| invalid(format!("unexpected character {c:?} in castling rights")))?;
        if seen & right.bit() != 0 {
            return Err(invalid(format!("castling right {c:?} repeated")));
        }
        seen |= right.bit();
        builder.castling_right(right, true);
    }

    Ok(())
}

fn parse_en_passant(en_passant: &str) -> ChessResult<Option<Square>> {
    if en_passant == "-" {
        return Ok(None);
    }
    Square::from_algebraic(en_passant)
        .map(Some)
        .map_err(|_| invalid(format!("bad en passant square {en_passant:?}")))
}

fn parse_counter(field: &str, name: &str, max: u32) -> ChessResult<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("{name} must be a decimal number, found {field:?}")));
    }
    match field.parse::<u32>() {
        Ok(n) if n <= max => Ok(n),
        _ => Err(invalid(format!("{name} {field} exceeds {max}"))),
    }
}
