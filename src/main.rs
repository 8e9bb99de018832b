//! packed_chess - position inspector
//!
//! Reads one position per line from stdin and prints its board dump,
//! normalized FEN, evaluation and position key.
//!
//! Usage:
//!     packed_chess
//!
//! Input lines:
//!     startpos        the standard starting position
//!     empty           an empty board
//!     <FEN>           any six-field FEN string
//!     quit            exit

use std::io::{self, BufRead, Write};

use packed_chess::{Board, ChessResult};

fn select_board(input: &str) -> ChessResult<Board> {
    match input {
        "startpos" => Ok(Board::new(true)),
        "empty" => Ok(Board::new(false)),
        fen => Board::from_fen(fen),
    }
}

fn report(board: &Board) {
    print!("{}", board.dump());
    println!("FEN : {}", board.to_fen());
    println!("Value : {}", board.value());
    println!("Key : {:016x}", board.zobrist_key());
    println!();
    io::stdout().flush().ok();
}

fn main() {
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" {
            break;
        }

        match select_board(input) {
            Ok(board) => report(&board),
            Err(e) => eprintln!("{}", e),
        }
    }
}
