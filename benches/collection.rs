//! Throughput of the three collection flavours on a warm, preallocated table.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use typed_collection::{
    AHashHasher, Collection, CollectionLayout, ComponentSet, MultiCollection, UnorderedCollection,
};

#[derive(Clone, Copy)]
struct Position([f32; 3]);

#[derive(Clone, Copy)]
struct Velocity([f32; 3]);

#[derive(ComponentSet)]
enum Body {
    Position(Position),
    Velocity(Velocity),
}

const KEY_COUNTS: [u64; 3] = [1_000, 10_000, 100_000];

fn layout(keys: u64) -> CollectionLayout<Body> {
    CollectionLayout::<Body>::new(keys as usize * 4)
        .with_all(keys as usize)
        .with_probe_limit(32)
}

fn bench_emplace_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("emplace_remove");

    for keys in KEY_COUNTS {
        let layout = layout(keys);
        let mut bodies: Collection<Body, u64, AHashHasher> = Collection::new(&layout);

        group.bench_with_input(BenchmarkId::from_parameter(keys), &keys, |b, &keys| {
            b.iter(|| {
                for key in 0..keys {
                    bodies.emplace(key, Position([key as f32; 3]));
                }
                for key in 0..keys {
                    black_box(bodies.remove(key));
                }
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for keys in KEY_COUNTS {
        let layout = layout(keys);
        let mut bodies: Collection<Body, u64, AHashHasher> = Collection::new(&layout);
        for key in 0..keys {
            bodies.emplace(key, Position([0.0; 3]));
        }

        group.bench_with_input(BenchmarkId::from_parameter(keys), &keys, |b, &keys| {
            b.iter(|| {
                let mut sum = 0.0;
                for key in 0..keys {
                    sum += bodies.get::<Position>(key).0[0];
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

fn bench_dense_iteration(c: &mut Criterion) {
    let keys = 100_000;
    let layout = layout(keys);
    let mut bodies: MultiCollection<Body, u64, AHashHasher> = MultiCollection::new(&layout);
    for key in 0..keys {
        bodies.emplace(key, Position([0.0; 3]));
        bodies.emplace(key, Velocity([0.1, 0.2, 0.3]));
    }

    c.bench_function("integrate_100k_by_key", |b| {
        b.iter(|| {
            for key in 0..keys {
                let velocity = *bodies.get::<Velocity>(key);
                let position = bodies.get_mut::<Position>(key);
                for axis in 0..3 {
                    position.0[axis] += velocity.0[axis];
                }
            }
        });
    });

    c.bench_function("scale_100k_dense", |b| {
        b.iter(|| {
            for velocity in bodies.components_mut::<Velocity>() {
                for axis in velocity.0.iter_mut() {
                    *axis *= 0.99;
                }
            }
        });
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let keys = 10_000;
    let layout = layout(keys);
    let mut bodies: UnorderedCollection<Body, u64, AHashHasher> =
        UnorderedCollection::new(&layout);
    for key in 0..keys {
        if key % 2 == 0 {
            bodies.emplace(key, Position([1.0; 3]));
        } else {
            bodies.emplace(key, Velocity([1.0; 3]));
        }
    }

    c.bench_function("call_10k_mixed", |b| {
        b.iter(|| {
            for key in 0..keys {
                bodies.call(key, |body| match body {
                    BodyMut::Position(p) => p.0[0] += 1.0,
                    BodyMut::Velocity(v) => v.0[0] -= 1.0,
                });
            }
        });
    });
}

criterion_group!(
    benches,
    bench_emplace_remove,
    bench_lookup,
    bench_dense_iteration,
    bench_dispatch
);
criterion_main!(benches);
