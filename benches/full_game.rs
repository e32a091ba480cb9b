use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ular_tangga::core::{EngineConfig, GameStatus, PlayerSetup, Timings};
use ular_tangga::dice::RandomDice;
use ular_tangga::turn::TurnEngine;

const MAX_TURNS: usize = 10_000;

fn play_game(players: usize, seed: u64) -> usize {
    let config = EngineConfig::default().with_timings(Timings::instant());
    let mut engine = TurnEngine::builder(config)
        .dice(RandomDice::new(seed))
        .build();
    if engine.start_game(PlayerSetup::defaults(players)).is_err() {
        return 0;
    }

    let mut turns = 0;
    while engine.session().status() == GameStatus::InProgress && turns < MAX_TURNS {
        engine.play_turn();
        turns += 1;
    }
    turns
}

fn full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_game");
    for players in [2usize, 4, 10] {
        group.bench_function(BenchmarkId::new("virtual_clock", players), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(play_game(players, seed))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, full_game);
criterion_main!(benches);
