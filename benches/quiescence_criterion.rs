use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use quince_chess::game_state::game_state::GameState;
use quince_chess::move_generation::legal_move_apply::{
    make_move_in_place, unmake_move_in_place,
};
use quince_chess::search::board_scoring::{TaperedScorer, INF};
use quince_chess::search::history::HistoryTable;
use quince_chess::search::quiescence::{quiesce_checks, SearchContext};
use quince_chess::search::static_exchange::static_exchange_eval;
use quince_chess::search::transposition_table::TranspositionTable;
use quince_chess::utils::random_playout::random_playout;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Copy)]
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
        name: "italian_tension",
        fen: "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 6 5",
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    },
];

fn bench_quiescence(c: &mut Criterion) {
    let mut group = c.benchmark_group("quiescence");
    group.measurement_time(Duration::from_secs(5));

    for case in CASES {
        group.bench_function(BenchmarkId::from_parameter(case.name), |b| {
            let mut game = GameState::from_fen(case.fen).expect("bench FEN should parse");
            let mut tt = TranspositionTable::new_with_mb(16);
            let mut history = HistoryTable::new();
            let scorer = TaperedScorer;

            b.iter(|| {
                tt.new_generation();
                let mut ctx = SearchContext::new(&mut tt, &mut history, &scorer);
                let mut pv = Vec::new();
                let score = quiesce_checks(&mut game, &mut ctx, 0, -INF, INF, &mut pv)
                    .expect("search should run");
                black_box(score);
            });
        });
    }

    group.finish();
}

fn bench_make_unmake(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_unmake");

    // Pre-record a random playout, then measure replaying it in both
    // directions.
    let mut game = GameState::new_game();
    let mut rng = StdRng::seed_from_u64(7);
    let moves = random_playout(&mut game, &mut rng, 120).expect("playout should run");
    for _ in 0..moves.len() {
        unmake_move_in_place(&mut game).expect("unmake should succeed");
    }

    group.throughput(Throughput::Elements(moves.len() as u64 * 2));
    group.bench_function("replay_playout", |b| {
        b.iter(|| {
            for &mv in &moves {
                make_move_in_place(&mut game, mv).expect("make should succeed");
            }
            for _ in 0..moves.len() {
                unmake_move_in_place(&mut game).expect("unmake should succeed");
            }
            black_box(game.zobrist_key);
        });
    });

    group.finish();
}

fn bench_static_exchange(c: &mut Criterion) {
    let game = GameState::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .expect("bench FEN should parse");

    c.bench_function("static_exchange_kiwipete", |b| {
        b.iter(|| {
            // d5xe6 and f3xf6 style exchanges on busy squares.
            black_box(static_exchange_eval(&game, black_box(35), black_box(44)));
            black_box(static_exchange_eval(&game, black_box(21), black_box(45)));
        });
    });
}

criterion_group!(
    benches,
    bench_quiescence,
    bench_make_unmake,
    bench_static_exchange
);
criterion_main!(benches);
