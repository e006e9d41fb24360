//! Criterion benchmark: one `FixedUpdate` tick of the command executor.
//!
//! Each iteration queues a cursor move for a pending building and runs a
//! tick, which is the steady-state cost while the player drags a placement
//! around a busy town.
//!
//! Run with: cargo bench -p town --bench command_tick_bench --features bench

use criterion::{criterion_group, criterion_main, Criterion};

use town::rotation::Rotation;
use town::test_harness::TestTown;
use town::town_actions::TownCommand;

fn busy_town() -> TestTown {
    let mut town = TestTown::new();
    for i in 0..10 {
        for j in 0..10 {
            town = town.with_building("cottage", 100 + i * 3, 100 + j * 3, Rotation::Deg0);
        }
    }
    town
}

fn bench_cursor_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_tick");
    group.sample_size(50);

    let mut town = busy_town();
    let handle = town.begin("cottage");
    let mut x = 0.0_f32;
    group.bench_function("move_to_cursor", |b| {
        b.iter(|| {
            x = (x + 16.0) % 512.0;
            town.send(TownCommand::MovePendingToCursor {
                handle,
                screen: (384.0 + x, 360.0),
            });
            town.tick(1);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cursor_drag);
criterion_main!(benches);
