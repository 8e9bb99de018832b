use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use packed_chess::{Board, Evaluator, MaterialThreshold, Square};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    BenchCase {
        name: "sparse",
        fen: "8/6P1/pn1RPKR1/8/p1k2b2/5B1p/2N3bp/3q4 w - - 0 1",
    },
];

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).expect("benchmark square should parse")
}

fn bench_fen(c: &mut Criterion) {
    let mut group = c.benchmark_group("fen");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let board = Board::from_fen(case.fen).expect("benchmark FEN should parse");

        // Correctness guard before benchmarking.
        assert_eq!(board.to_fen(), case.fen);

        group.bench_with_input(BenchmarkId::new("parse", case.name), case.fen, |b, fen| {
            b.iter(|| Board::from_fen(black_box(fen)).expect("parse should succeed"));
        });
        group.bench_with_input(BenchmarkId::new("emit", case.name), &board, |b, board| {
            b.iter(|| black_box(board).to_fen());
        });
    }

    group.finish();
}

fn bench_move_piece(c: &mut Criterion) {
    let opening = [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "b5"), ("a7", "a6")];
    let moves: Vec<(Square, Square)> = opening.iter().map(|&(f, t)| (sq(f), sq(t))).collect();

    let mut group = c.benchmark_group("move_piece");
    group.throughput(Throughput::Elements(moves.len() as u64));
    group.bench_function("ruy_lopez", |b| {
        b.iter(|| {
            let mut board = Board::new(true);
            for &(from, to) in &moves {
                board = board
                    .move_piece(black_box(from), black_box(to))
                    .expect("opening move should apply");
            }
            black_box(board)
        });
    });
    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let endgame = Evaluator::with_policy(MaterialThreshold::default());

    let mut group = c.benchmark_group("evaluation");
    for case in CASES {
        let board = Board::from_fen(case.fen).expect("benchmark FEN should parse");

        group.bench_with_input(BenchmarkId::new("value", case.name), &board, |b, board| {
            b.iter(|| black_box(board).value());
        });
        group.bench_with_input(BenchmarkId::new("value_endgame", case.name), &board, |b, board| {
            b.iter(|| endgame.value(black_box(board)));
        });
        group.bench_with_input(BenchmarkId::new("zobrist", case.name), &board, |b, board| {
            b.iter(|| black_box(board).zobrist_key());
        });
    }
    group.finish();
}

criterion_group!(board_benches, bench_fen, bench_move_piece, bench_evaluation);
criterion_main!(board_benches);
