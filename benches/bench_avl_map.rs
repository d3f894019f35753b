#[macro_use]
extern crate criterion;

use balanced_collections::avl_tree::AvlMap;
use criterion::{black_box, Criterion};
use rand::{Rng, SeedableRng, XorShiftRng};

const NUM_OF_OPERATIONS: usize = 1000;

fn bench_insert(c: &mut Criterion) {
    c.bench_function("avl_map_insert", |b| {
        b.iter(|| {
            let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = AvlMap::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let value = rng.next_u32();
                let _ = map.insert(key, value);
            }
        })
    });
}

fn bench_get(c: &mut Criterion) {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = AvlMap::new();
    let mut keys = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        let value = rng.next_u32();
        let _ = map.insert(key, value);
        keys.push(key);
    }

    c.bench_function("avl_map_get", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_remove(c: &mut Criterion) {
    c.bench_function("avl_map_insert_remove", |b| {
        b.iter(|| {
            let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = AvlMap::new();
            let mut keys = Vec::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let value = rng.next_u32();
                let _ = map.insert(key, value);
                keys.push(key);
            }
            for key in &keys {
                black_box(map.remove(key));
            }
        })
    });
}

criterion_group!(benches, bench_insert, bench_get, bench_remove);
criterion_main!(benches);
