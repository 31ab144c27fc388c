//! Benchmarks for the hot paths of a scan: schedule matching and
//! Dockerfile base image extraction.
//!
//! Run with: cargo bench --bench scan_benchmark

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use eolscan::dockerfile::extract_base_images;
use eolscan::model::{parse_loose, scan_component, Detected, Schedule};
use semver::Version;
use std::hint::black_box;

/// Build a schedule table resembling a long-lived product's full history.
fn generate_schedules(count: u64) -> Vec<Schedule> {
    (0..count)
        .map(|i| Schedule {
            name: "python".to_string(),
            codename: None,
            version: Version::new(3, i, 0),
            expiration: NaiveDate::from_ymd_opt(2020 + (i % 10) as i32, 1, 1),
        })
        .collect()
}

fn generate_dockerfile(stages: usize) -> String {
    let mut text = String::new();
    for i in 0..stages {
        text.push_str(&format!(
            "FROM golang:1.{i} AS build{i}\nRUN make stage{i}\n"
        ));
    }
    text.push_str("FROM alpine:3.18\nCOPY --from=build0 /out /usr/local/bin/\n");
    text
}

fn benchmark_scan_component(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_component");
    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let observed = Detected::Version(parse_loose("3.49.2").unwrap());

    for size in [10u64, 50, 200] {
        let schedules = generate_schedules(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &schedules, |b, s| {
            b.iter(|| black_box(scan_component("python", &observed, s, today)));
        });
    }
    group.finish();
}

fn benchmark_parse_loose(c: &mut Criterion) {
    c.bench_function("parse_loose_kernel_release", |b| {
        b.iter(|| black_box(parse_loose("6.8.0-45-generic")));
    });
}

fn benchmark_extract_base_images(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_base_images");
    for stages in [1usize, 8, 32] {
        let text = generate_dockerfile(stages);
        group.bench_with_input(BenchmarkId::from_parameter(stages), &text, |b, t| {
            b.iter(|| black_box(extract_base_images(t)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_scan_component,
    benchmark_parse_loose,
    benchmark_extract_base_images
);
criterion_main!(benches);
