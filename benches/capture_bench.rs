// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use remora::capture::{headers, size, url};

fn sample_headers() -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in [
        ("content-type", "application/json"),
        ("content-length", "4096"),
        ("cache-control", "no-cache"),
        ("x-request-id", "a1b2c3d4"),
        ("authorization", "Bearer secret"),
        ("accept-encoding", "gzip, br"),
    ] {
        map.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    map
}

fn header_sanitize_benchmark(c: &mut Criterion) {
    let map = sample_headers();
    let allow = vec!["content-type".to_string(), "x-request-id".to_string()];

    c.bench_function("sanitize_headers", |b| {
        b.iter(|| black_box(headers::sanitize(Some(&map), &allow)))
    });
}

fn header_size_benchmark(c: &mut Criterion) {
    let map = sample_headers();

    c.bench_function("header_size", |b| {
        b.iter(|| black_box(size::header_size(&map)))
    });
}

fn url_normalize_benchmark(c: &mut Criterion) {
    let allow = vec![
        "https://api.example.com/*".to_string(),
        "internal.example.com".to_string(),
    ];

    c.bench_function("normalize_url", |b| {
        b.iter(|| {
            black_box(url::normalize(
                "https://api.example.com/v2/users?page=3",
                &allow,
            ))
        })
    });
}

criterion_group!(
    benches,
    header_sanitize_benchmark,
    header_size_benchmark,
    url_normalize_benchmark
);
criterion_main!(benches);
