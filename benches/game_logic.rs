use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_bomber::core::{generate, resolve, GameState, Grid, LevelConfig, LevelLayout, SimpleRng};
use tui_bomber::types::{Coordinate, Direction};

fn bench_generate(c: &mut Criterion) {
    let config = LevelConfig::default();
    let mut rng = SimpleRng::new(12345);

    c.bench_function("generate_level", |b| {
        b.iter(|| generate(black_box(&config), 1, &mut rng).unwrap())
    });
}

fn bench_blast(c: &mut Criterion) {
    let grid = Grid::standard();

    c.bench_function("resolve_blast_range_4", |b| {
        b.iter(|| {
            resolve(black_box(Coordinate::new(7, 5)), black_box(4), |p| {
                grid.is_fixed_wall(p)
            })
        })
    });
}

fn bench_enemy_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start_level(1).unwrap();

    c.bench_function("move_enemies", |b| {
        b.iter(|| {
            state.move_enemies();
            state.drain_events().count()
        })
    });
}

fn bench_player_shuttle(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.load_layout(1, LevelLayout::bare(15, 9));
    let mut direction = Direction::Right;

    c.bench_function("move_player", |b| {
        b.iter(|| {
            if !state.move_player(black_box(direction)) {
                direction = direction.opposite();
            }
            state.drain_events().count()
        })
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_blast,
    bench_enemy_tick,
    bench_player_shuttle
);
criterion_main!(benches);
