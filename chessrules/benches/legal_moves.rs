use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chessrules::*;

fn legal_moves_benchmark(c: &mut Criterion) {
    let standard = Board::standard();
    c.bench_function("Standard legal_moves", |b| {
        b.iter(|| black_box(black_box(&standard).legal_moves(Team::White)))
    });

    let mut pinned = Board::new();
    pinned.place_king("e1", Team::White).unwrap();
    pinned.place_king("a8", Team::Black).unwrap();
    pinned.put("f2", PieceKind::Bishop, Team::White).unwrap();
    pinned.put("e4", PieceKind::Rook, Team::White).unwrap();
    pinned.put("h4", PieceKind::Queen, Team::Black).unwrap();
    pinned.put("e8", PieceKind::Rook, Team::Black).unwrap();
    c.bench_function("Pinned legal_moves", |b| {
        b.iter(|| black_box(black_box(&pinned).legal_moves(Team::White)))
    });
}

fn perft_benchmark(c: &mut Criterion) {
    let standard = Board::standard();
    c.bench_function("Standard Perft 3", |b| {
        b.iter(|| {
            let board = black_box(&standard);
            let depth = black_box(3);
            black_box(perft(board, Team::White, depth))
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50).measurement_time(Duration::from_secs(20));
    targets = legal_moves_benchmark, perft_benchmark
}
criterion_main!(benches);
