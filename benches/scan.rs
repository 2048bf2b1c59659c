//! Benchmarks for the search scanner.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use etch::search::{SearchSpec, scan};

fn synthetic_text() -> String {
    "the quick brown fox jumps over the lazy dog\n".repeat(10_000)
}

fn bench_literal_scan(c: &mut Criterion) {
    let text = synthetic_text();
    let spec = SearchSpec {
        pattern: "lazy".to_string(),
        use_regex: false,
    };
    c.bench_function("literal_scan", |b| {
        b.iter(|| scan(black_box(&text), black_box(&spec)).unwrap())
    });
}

fn bench_regex_scan(c: &mut Criterion) {
    let text = synthetic_text();
    let spec = SearchSpec {
        pattern: r"l\w+y".to_string(),
        use_regex: true,
    };
    c.bench_function("regex_scan", |b| {
        b.iter(|| scan(black_box(&text), black_box(&spec)).unwrap())
    });
}

criterion_group!(benches, bench_literal_scan, bench_regex_scan);
criterion_main!(benches);
