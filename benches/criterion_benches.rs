use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use warehouse_solver::config::{Algorithm, HeuristicKind, SolverConfig};
use warehouse_solver::{taboo_cells, LoadWarehouse, Solve};

fn bench_two_boxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("two-boxes");
    for &heuristic in &[
        HeuristicKind::Manhattan,
        HeuristicKind::LookupWeighted,
        HeuristicKind::DeadlockAware,
    ] {
        let config = SolverConfig::new().heuristic(heuristic);
        bench_level(&mut group, config, "levels/two-boxes.txt");
    }
    group.finish();
}

fn bench_best_first(c: &mut Criterion) {
    let mut group = c.benchmark_group("best-first");
    let config = SolverConfig::new()
        .algorithm(Algorithm::BestFirst)
        .heuristic(HeuristicKind::LookupWeighted);
    bench_level(&mut group, config, "levels/two-boxes.txt");
    group.finish();
}

fn bench_deadlock_pruning(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutual-deadlock");
    let config = SolverConfig::new()
        .heuristic(HeuristicKind::DeadlockAware)
        .deadlock_check_interval(1);
    bench_level(&mut group, config, "levels/mutual-deadlock.txt");
    group.finish();
}

fn bench_taboo(c: &mut Criterion) {
    let warehouse = "levels/two-boxes.txt".load_warehouse().unwrap();
    c.bench_function("taboo two-boxes", move |b| {
        b.iter(|| taboo_cells(criterion::black_box(&warehouse)))
    });
}

fn bench_level(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    config: SolverConfig,
    level_path: &str,
) {
    let warehouse = level_path.load_warehouse().unwrap();
    group.sample_size(20);
    group.bench_with_input(
        BenchmarkId::new(config.heuristic.to_string(), level_path),
        &config,
        |b, config| b.iter(|| criterion::black_box(warehouse.solve_elem(config))),
    );
}

criterion_group!(
    benches,
    bench_two_boxes,
    bench_best_first,
    bench_deadlock_pruning,
    bench_taboo,
);
criterion_main!(benches);
