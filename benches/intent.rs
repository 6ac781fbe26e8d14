//! Intent classification benchmarks
//!
//! Measures the keyword scan that runs on every chat message before any
//! network call is made.
//!
//! Run with: `cargo bench`

use criterion::{Criterion, criterion_group, criterion_main};
use searchrelay::router::KeywordRouter;
use std::hint::black_box;

fn bench_classify(c: &mut Criterion) {
    let router = KeywordRouter::new(["keress", "google"]);
    let long_chat = "Mesélj egy kicsit a Balaton történetéről és a környék borvidékeiről. ".repeat(20);

    let mut group = c.benchmark_group("classify");
    group.bench_function("short_search", |b| {
        b.iter(|| router.classify(black_box("Keress rá: időjárás Budapest")))
    });
    group.bench_function("short_chat", |b| {
        b.iter(|| router.classify(black_box("Hány óra van?")))
    });
    group.bench_function("long_chat", |b| {
        b.iter(|| router.classify(black_box(long_chat.as_str())))
    });
    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
