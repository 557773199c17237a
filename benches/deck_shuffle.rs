use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quantum_tiles::core::{GameConfig, GameRng};
use quantum_tiles::deck::generate_deck;
use quantum_tiles::game::MemoryGame;
use quantum_tiles::persistence::{encode, SaveFormat};

fn bench_generate_deck(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_deck");
    for pairs in [2usize, 18, 512] {
        let mut rng = GameRng::new(12345);
        group.bench_with_input(BenchmarkId::from_parameter(pairs), &pairs, |b, &pairs| {
            b.iter(|| generate_deck(black_box(pairs), &mut rng))
        });
    }
    group.finish();
}

fn bench_arrange(c: &mut Criterion) {
    let mut game = MemoryGame::new(GameConfig::default().with_seed(12345));

    c.bench_function("arrange_32x32", |b| {
        b.iter(|| game.arrange(black_box(32), black_box(32)))
    });
}

fn bench_tick_idle(c: &mut Criterion) {
    let mut game = MemoryGame::new(GameConfig::default().with_seed(12345));
    let _ = game.arrange(6, 6);

    c.bench_function("tick_16ms", |b| {
        b.iter(|| game.tick(black_box(Duration::from_millis(16))))
    });
}

fn bench_encode(c: &mut Criterion) {
    let mut game = MemoryGame::new(GameConfig::default().with_seed(12345));
    let _ = game.arrange(32, 32);
    let state = game.state();

    c.bench_function("encode_json_1024", |b| {
        b.iter(|| encode(black_box(&state), SaveFormat::Json))
    });
    c.bench_function("encode_binary_1024", |b| {
        b.iter(|| encode(black_box(&state), SaveFormat::Binary))
    });
}

criterion_group!(benches, bench_generate_deck, bench_arrange, bench_tick_idle, bench_encode);
criterion_main!(benches);
