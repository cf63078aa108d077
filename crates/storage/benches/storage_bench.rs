use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;
use tempfile::tempdir;

use ttlkv_storage::{Collection, ExpiringCollection, FileCollection, Ttl};

fn bench_set_get_sequential(c: &mut Criterion) {
    c.bench_function("set_get_sequential_10k", |b| {
        b.iter(|| {
            let mut coll = ExpiringCollection::new();
            for i in 0..10_000 {
                let key = format!("key:{i}");
                coll.set(key.clone(), json!(format!("value:{i}")));
                black_box(coll.get(&key, None));
            }
        })
    });
}

fn bench_is_expired(c: &mut Criterion) {
    let mut coll = ExpiringCollection::new();
    for i in 0..1_000 {
        coll.set_with_ttl(format!("key:{i}"), json!(i), Ttl::from_secs(60));
    }

    c.bench_function("is_expired_1k", |b| {
        b.iter(|| {
            for i in 0..1_000 {
                black_box(coll.is_expired(&format!("key:{i}")));
            }
        })
    });
}

fn bench_to_json(c: &mut Criterion) {
    let mut coll = ExpiringCollection::new();
    for i in 0..1_000 {
        coll.set(format!("key:{i}"), json!({ "id": i, "tags": ["a", "b"] }));
    }

    c.bench_function("to_json_1k", |b| {
        b.iter(|| black_box(coll.to_json().unwrap()))
    });
}

fn bench_persist(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut coll = FileCollection::open(dir.path().join("bench.json")).unwrap();
    for i in 0..100 {
        coll.set(format!("key:{i}"), json!(i));
    }

    c.bench_function("persist_100_keys", |b| {
        b.iter(|| black_box(coll.persist().unwrap()))
    });
}

criterion_group!(
    benches,
    bench_set_get_sequential,
    bench_is_expired,
    bench_to_json,
    bench_persist,
);
criterion_main!(benches);
