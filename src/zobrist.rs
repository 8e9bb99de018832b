//! Zobrist position keys.
//!
//! Keys are drawn once from a fixed-seed `StdRng`, so the same position
//! hashes to the same value on every run of a given build. The clocks are
//! not part of the key; two positions that differ only in move counters
//! share a key, which is what repetition tracking wants.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::types::Color;

const SEED: u64 = 12345;

pub struct ZobristKeys {
    piece_keys: [[u64; 64]; 16],
    side_key: u64,
    castling_keys: [u64; 16],
    ep_keys: [u64; 17],
}

impl ZobristKeys {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(SEED);

        let mut piece_keys = [[0u64; 64]; 16];
        for keys in piece_keys.iter_mut() {
            for key in keys.iter_mut() {
                *key = rng.gen();
            }
        }

        let side_key = rng.gen();

        let mut castling_keys = [0u64; 16];
        for key in castling_keys.iter_mut() {
            *key = rng.gen();
        }

        let mut ep_keys = [0u64; 17];
        for key in ep_keys.iter_mut() {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            side_key,
            castling_keys,
            ep_keys,
        }
    }

    pub fn hash_position(&self, board: &Board) -> u64 {
        let mut h = 0u64;

        for (sq, piece) in board.pieces() {
            h ^= self.piece_keys[piece.code() as usize][sq.index()];
        }

        if board.side_to_move() == Color::Black {
            h ^= self.side_key;
        }

        h ^= self.castling_keys[board.castling_bits() as usize];
        h ^= self.ep_keys[board.en_passant_code() as usize];

        h
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        ZobristKeys::new()
    }
}

/// Shared key table, built on first use.
pub fn keys() -> &'static ZobristKeys {
    static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
    KEYS.get_or_init(ZobristKeys::new)
}

impl Board {
    /// Position key over pieces, side to move, castling rights and en
    /// passant target.
    pub fn zobrist_key(&self) -> u64 {
        keys().hash_position(self)
    }
}
