// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_kd_tree::{Aabb2D, KdTree, Site};

use rstar::RTree;

fn gen_grid_sites(n: usize, cell: f64) -> Vec<Site<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Site::new(
                format!("g{x}_{y}"),
                x as f64 * cell,
                y as f64 * cell,
            ));
        }
    }
    out
}

fn to_rstar_points(v: &[Site<f64>]) -> Vec<[f64; 2]> {
    v.iter().map(|s| [s.x, s.y]).collect()
}

fn bench_nearest_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_compare_f64");
    for &n in &[64usize, 128] {
        let sites = gen_grid_sites(n, 10.0);
        let side = n as f64 * 10.0;
        let query = [side * 0.37, side * 0.61];
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                || sites.clone(),
                |sites| {
                    let mut tree = KdTree::new(Aabb2D::new(0.0, 0.0, side, side));
                    for s in sites {
                        tree.insert(s).expect("finite coordinates");
                    }
                    black_box(tree.nearest_neighbor(query[0], query[1]).map(|s| s.x));
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&sites),
                |points| {
                    let mut tree = RTree::new();
                    for p in points {
                        tree.insert(p);
                    }
                    black_box(tree.nearest_neighbor(&query).map(|p| p[0]));
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&sites),
                |points| {
                    let tree = RTree::bulk_load(points);
                    black_box(tree.nearest_neighbor(&query).map(|p| p[0]));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_compare_f64);
criterion_main!(benches);
