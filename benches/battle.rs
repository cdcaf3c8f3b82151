//! Benchmark for stepping a populated battle.

use arena_sim::{BattleSim, CardId, Team};
use criterion::{criterion_group, criterion_main, Criterion};

fn populated_battle() -> BattleSim {
    let mut sim = BattleSim::new(99);
    for i in 0..10 {
        let x = 40.0 + (i as f32) * 35.0;
        sim.spawn_unit(CardId::Knight, Team::Player, x, 420.0);
        sim.spawn_unit(CardId::Archers, Team::Enemy, x, 180.0);
    }
    sim
}

fn bench_ticks(c: &mut Criterion) {
    c.bench_function("battle_600_ticks", |b| {
        b.iter(|| {
            let mut sim = populated_battle();
            for _ in 0..600 {
                sim.step(1.0 / 60.0);
            }
            sim.snapshot().entities.len()
        })
    });

    c.bench_function("snapshot", |b| {
        let mut sim = populated_battle();
        for _ in 0..120 {
            sim.step(1.0 / 60.0);
        }
        b.iter(|| sim.snapshot().entities.len())
    });
}

criterion_group!(benches, bench_ticks);
criterion_main!(benches);
