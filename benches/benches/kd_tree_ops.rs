// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_kd_tree::{Aabb2D, Config, KdTree, NearestSearch, Site};

const EXTENT: f64 = 1000.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_sites(count: usize, seed: u64) -> Vec<Site<f64>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|i| Site::new(format!("s{i}"), rng.next_f64() * EXTENT, rng.next_f64() * EXTENT))
        .collect()
}

// Monotone input that forces repeated scapegoat rebuilds.
fn gen_diagonal_sites(count: usize) -> Vec<Site<f64>> {
    (0..count)
        .map(|i| Site::new(format!("d{i}"), i as f64, i as f64 * 0.5))
        .collect()
}

fn gen_queries(count: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| (rng.next_f64() * EXTENT, rng.next_f64() * EXTENT))
        .collect()
}

fn extent() -> Aabb2D<f64> {
    Aabb2D::new(0.0, 0.0, EXTENT, EXTENT)
}

fn build(sites: &[Site<f64>], nearest: NearestSearch) -> KdTree<Site<f64>> {
    let mut tree = KdTree::with_config(Config::new(extent()).with_nearest(nearest));
    for s in sites {
        tree.insert(s.clone()).expect("finite coordinates");
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[1_000usize, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        let random = gen_random_sites(n, 0x9E37_79B9);
        group.bench_function(format!("random_n{}", n), |b| {
            b.iter_batched(
                || random.clone(),
                |sites| {
                    let mut tree = KdTree::new(extent());
                    for s in sites {
                        tree.insert(s).expect("finite coordinates");
                    }
                    black_box(tree.height());
                },
                BatchSize::SmallInput,
            );
        });
        let diagonal = gen_diagonal_sites(n);
        group.bench_function(format!("diagonal_n{}", n), |b| {
            b.iter_batched(
                || diagonal.clone(),
                |sites| {
                    let mut tree = KdTree::new(extent());
                    for s in sites {
                        tree.insert(s).expect("finite coordinates");
                    }
                    black_box(tree.height());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    for &n in &[1_000usize, 10_000] {
        let sites = gen_random_sites(n, 0xC0FF_EE11);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("drain_n{}", n), |b| {
            b.iter_batched(
                || build(&sites, NearestSearch::Pruned),
                |mut tree| {
                    for s in &sites {
                        tree.delete(s).expect("point was inserted");
                    }
                    black_box(tree.len());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    let queries = gen_queries(256, 0xDEAD_BEEF);
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &n in &[1_000usize, 10_000] {
        let sites = gen_random_sites(n, 0x1234_5678);
        for (label, mode) in [
            ("pruned", NearestSearch::Pruned),
            ("exhaustive", NearestSearch::Exhaustive),
        ] {
            let tree = build(&sites, mode);
            group.bench_function(format!("{}_n{}", label, n), |b| {
                b.iter(|| {
                    for &(x, y) in &queries {
                        black_box(tree.nearest_neighbor(x, y));
                    }
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_delete, bench_nearest);
criterion_main!(benches);
