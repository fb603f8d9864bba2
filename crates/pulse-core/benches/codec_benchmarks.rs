//! Event codec benchmarks
//!
//! Run with: cargo bench -p pulse-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pulse_core::{AttributeKey, Event};

fn sample_event() -> Event {
    let tool: AttributeKey<String> = AttributeKey::new("tool");
    Event::new("operation.paint")
        .with_count(12)
        .with_duration(340)
        .with_timestamp()
        .with_attribute(&tool, "height-brush".to_string())
}

fn bench_postcard(c: &mut Criterion) {
    let mut group = c.benchmark_group("postcard");
    let event = sample_event();
    let bytes = event.to_bytes().unwrap();

    group.bench_function("encode", |b| b.iter(|| black_box(&event).to_bytes().unwrap()));
    group.bench_function("decode", |b| {
        b.iter(|| Event::from_bytes(black_box(&bytes)).unwrap())
    });

    group.finish();
}

fn bench_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("json");
    let event = sample_event();
    let json = event.to_json().unwrap();

    group.bench_function("encode", |b| b.iter(|| black_box(&event).to_json().unwrap()));
    group.bench_function("decode", |b| {
        b.iter(|| Event::from_json(black_box(&json)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_postcard, bench_json);
criterion_main!(benches);
