//! Benchmarks for the hot paths of the core: collision checks, sweeps and
//! full lock cycles.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use termtris::core::{Board, GameState};
use termtris::types::{GameAction, PieceKind, BOARD_WIDTH};

fn bench_collision(c: &mut Criterion) {
    let board = Board::new();
    let shape = PieceKind::T.shape();

    c.bench_function("collides_empty_board", |b| {
        b.iter(|| board.collides(black_box(&shape), black_box(4), black_box(10)))
    });
}

fn bench_sweep(c: &mut Criterion) {
    let mut template = Board::new();
    for y in 16..20 {
        for x in 0..BOARD_WIDTH as i8 {
            template.set(x, y, 1);
        }
    }
    template.set(0, 15, 2);

    c.bench_function("sweep_four_rows", |b| {
        b.iter_batched(
            || template.clone(),
            |mut board| black_box(board.sweep()),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_rotation(c: &mut Criterion) {
    let shape = PieceKind::L.shape();
    c.bench_function("rotate_cw", |b| b.iter(|| black_box(&shape).rotated_cw()));
}

fn bench_lock_cycle(c: &mut Criterion) {
    c.bench_function("hard_drop_lock_cycle", |b| {
        b.iter_batched(
            || {
                let mut state = GameState::new(1);
                state.start();
                state
            },
            |mut state| {
                state.apply_action(GameAction::HardDrop);
                black_box(state.score())
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(1);
    state.start();

    c.bench_function("tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            state.tick(black_box(16))
        })
    });
}

criterion_group!(
    benches,
    bench_collision,
    bench_sweep,
    bench_rotation,
    bench_lock_cycle,
    bench_tick
);
criterion_main!(benches);
