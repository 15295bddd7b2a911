use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsontree::parse;
use serde_json::Value;

// A medium-sized document exercising every token family.
const SAMPLE: &str = r#"
{
    "service": "ingest-gw",
    "version": "2.11.0",
    "enabled": true,
    "threshold": 0.75,
    "retries": 3,
    "endpoints": ["primary", "fallback", "canary"],
    "routes": [
        { "path": "/v1/items", "weight": 1e2, "sticky": false },
        { "path": "/v1/search", "weight": 42.5, "sticky": true }
    ],
    "labels": { "region": "eu-west-1", "note": "café ☃", "owner": null }
}
"#;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("jsontree", |b| {
        b.iter(|| parse(black_box(SAMPLE)).unwrap())
    });

    group.bench_function("serde_json", |b| {
        b.iter(|| serde_json::from_str::<Value>(black_box(SAMPLE)).unwrap())
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let root = parse(SAMPLE).unwrap();
    c.bench_function("member lookup", |b| {
        b.iter(|| {
            let routes = black_box(&root).get("routes").unwrap();
            routes.as_array().unwrap().len()
        })
    });
}

criterion_group!(benches, bench_parse, bench_lookup);
criterion_main!(benches);
