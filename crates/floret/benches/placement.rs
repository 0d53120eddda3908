use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use floret::sim::{CollideSimulation, SimulationOptions};
use floret::{Canvas, Cluster, Ordering, bar, force};
use futures::executor::block_on;
use serde_json::json;
use std::hint::black_box;
use std::time::Duration;

fn synthetic_clusters(n: usize) -> Vec<Cluster> {
    (0..n)
        .map(|i| Cluster {
            id: i,
            name: json!(i),
            color: String::new(),
            radius: 4.0 + ((i * 7919) % 37) as f64,
            outer_radius: 6.0 + ((i * 7919) % 37) as f64,
            points: Vec::new(),
            length: 0,
            position: None,
        })
        .collect()
}

fn bench_bar_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("bar_pack");
    group.measurement_time(Duration::from_secs(5));

    for n in [8usize, 64, 512] {
        let clusters = synthetic_clusters(n);
        let canvas = Canvas::new(2400.0, 1800.0);
        group.bench_with_input(BenchmarkId::new("bar::pack", n), &clusters, |b, clusters| {
            b.iter(|| {
                let out = bar::pack(black_box(clusters), canvas, 1.2, &Ordering::Summit)
                    .expect("pack");
                black_box(out.len());
            })
        });
    }

    group.finish();
}

fn bench_force_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_resolve");
    group.measurement_time(Duration::from_secs(10));

    for n in [8usize, 64] {
        let clusters = synthetic_clusters(n);
        let canvas = Canvas::new(2400.0, 1800.0);
        group.bench_with_input(
            BenchmarkId::new("force::resolve", n),
            &clusters,
            |b, clusters| {
                b.iter(|| {
                    let engine = CollideSimulation::new(SimulationOptions::default());
                    let out = block_on(force::resolve(black_box(clusters), canvas, 1.2, engine))
                        .expect("resolve");
                    black_box(out.len());
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_bar_pack, bench_force_resolve);
criterion_main!(benches);
