//! Benchmarks for adjacency-map BQM operations
//!
//! Run with: cargo bench -p arvak-bqm

use arvak_bqm::{AdjArrayBqm, AdjMapBqm, BqmView};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Square lattice with nearest-neighbor couplings, the typical sparsity of
/// annealer topologies.
fn lattice(side: u32) -> AdjMapBqm {
    let mut bqm = AdjMapBqm::with_capacity((side * side) as usize);
    for _ in 0..side * side {
        bqm.add_variable();
    }
    for row in 0..side {
        for col in 0..side {
            let v = row * side + col;
            if col + 1 < side {
                bqm.set_quadratic(v, v + 1, -1.0);
            }
            if row + 1 < side {
                bqm.set_quadratic(v, v + side, 1.0);
            }
        }
    }
    bqm
}

/// Benchmark building a model
fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for side in &[8, 16, 32, 64] {
        group.bench_with_input(BenchmarkId::new("lattice", side), side, |b, &side| {
            b.iter(|| black_box(lattice(black_box(side))));
        });
    }

    group.finish();
}

/// Benchmark point operations on interactions
fn bench_point_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_ops");
    let side = 32;

    group.bench_function("get_quadratic", |b| {
        let bqm = lattice(side);
        b.iter(|| black_box(bqm.get_quadratic(black_box(100), black_box(101))));
    });

    group.bench_function("set_quadratic", |b| {
        let mut bqm = lattice(side);
        b.iter(|| bqm.set_quadratic(black_box(100), black_box(132), black_box(0.5)));
    });

    group.bench_function("remove_and_restore", |b| {
        let mut bqm = lattice(side);
        b.iter(|| {
            bqm.remove_interaction(black_box(100), black_box(101));
            bqm.set_quadratic(100, 101, -1.0);
        });
    });

    group.finish();
}

/// Benchmark neighborhood traversal and energy evaluation
fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for side in &[16, 64] {
        let bqm = lattice(*side);
        let array = AdjArrayBqm::from(&bqm);
        let sample = vec![1.0; bqm.num_variables()];

        group.bench_with_input(BenchmarkId::new("energy_map", side), &bqm, |b, bqm| {
            b.iter(|| black_box(bqm.energy(&sample)));
        });
        group.bench_with_input(
            BenchmarkId::new("energy_array", side),
            &array,
            |b, array| {
                b.iter(|| black_box(array.energy(&sample)));
            },
        );
    }

    group.finish();
}

/// Benchmark growing and shrinking from the end
fn bench_pop(c: &mut Criterion) {
    c.bench_function("pop_and_readd", |b| {
        let mut bqm = lattice(32);
        b.iter(|| {
            bqm.pop_variable();
            let v = bqm.add_variable();
            bqm.set_quadratic(v, v - 1, -1.0);
            bqm.set_quadratic(v, v - 32, 1.0);
        });
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_point_ops,
    bench_traversal,
    bench_pop,
);

criterion_main!(benches);
