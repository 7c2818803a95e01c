use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::IVec2;
use thicket::{find_path, Grid, GridConfig, Walker};

fn bench_generate_grid(c: &mut Criterion) {
    let config = GridConfig::default();

    c.bench_function("generate_grid", |b| {
        b.iter(|| Grid::generate(black_box(&config)))
    });
}

fn bench_find_path_corner_to_corner(c: &mut Criterion) {
    let grid = Grid::generate(&GridConfig::default()).unwrap();
    let start = IVec2::new(0, 10);
    let goal = IVec2::new(23, 0);

    c.bench_function("find_path_corner_to_corner", |b| {
        b.iter(|| find_path(black_box(&grid), black_box(start), black_box(goal)))
    });
}

fn bench_find_path_dense(c: &mut Criterion) {
    // Denser, larger field to stress the open set
    let config = GridConfig {
        width: 96,
        height: 64,
        obstacle_density: 0.3,
        seed: 7,
    };
    let grid = Grid::generate(&config).unwrap();

    c.bench_function("find_path_dense_96x64", |b| {
        b.iter(|| find_path(&grid, black_box(IVec2::new(0, 0)), black_box(IVec2::new(95, 63))))
    });
}

fn bench_walker_crossing(c: &mut Criterion) {
    let grid = Grid::generate(&GridConfig::default()).unwrap();
    let goal = IVec2::new(23, 0);

    c.bench_function("walker_crossing", |b| {
        b.iter(|| {
            let mut walker = Walker::new(IVec2::new(0, 10));
            for _ in 0..600 {
                walker.advance(&grid, goal, 4.0, 1.0 / 60.0);
            }
            black_box(walker.cell())
        })
    });
}

criterion_group!(
    benches,
    bench_generate_grid,
    bench_find_path_corner_to_corner,
    bench_find_path_dense,
    bench_walker_crossing
);
criterion_main!(benches);
