// SPDX-License-Identifier: MIT OR Apache-2.0
// Benchmarks: missing_docs - criterion_group! macro generates undocumentable code
#![allow(missing_docs)]
// Benchmarks: clippy lints relaxed for benchmark code (not production)
#![allow(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Benchmarks comparing the tag-driven reference decoder against the
//! arena-backed columnar decoder, plus the stats reduction itself.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use luas_codec::{ColumnStore, wire};
use luas_core::{Record, stats};
use std::hint::black_box;

// =============================================================================
// Test Data
// =============================================================================

fn synthetic_messages(n: usize) -> Vec<Vec<u8>> {
    let records: Vec<Record> = (0..n)
        .map(|i| Record::new(i as u32, 1.0 + (i % 97) as f64))
        .collect();
    wire::encode_batch(&records)
}

// =============================================================================
// Decode Benchmarks
// =============================================================================

fn bench_decode_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_strategies");

    for &n in &[1_000usize, 10_000, 100_000] {
        let messages = synthetic_messages(n);
        group.throughput(Throughput::Bytes((n * wire::RECORD_SIZE) as u64));

        group.bench_with_input(BenchmarkId::new("tagged", n), &messages, |b, messages| {
            b.iter(|| wire::decode_batch(black_box(messages)).unwrap());
        });

        let mut store = ColumnStore::new(n * wire::RECORD_SIZE);
        group.bench_with_input(BenchmarkId::new("columnar", n), &messages, |b, messages| {
            b.iter(|| {
                let batch = store.decode_from_list(black_box(messages)).unwrap();
                black_box(batch.count)
            });
        });
    }

    group.finish();
}

fn bench_single_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_record");

    let record = Record::new(42, 13.5);
    group.bench_function("encode", |b| {
        b.iter(|| wire::encode_record(black_box(&record)));
    });

    let encoded = wire::encode_record(&record);
    group.bench_function("decode", |b| {
        b.iter(|| wire::decode_record(black_box(&encoded)).unwrap());
    });

    group.finish();
}

// =============================================================================
// Stats Reduction Benchmarks
// =============================================================================

fn bench_stats_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats_reduction");

    for &n in &[10usize, 1_000, 100_000] {
        let samples: Vec<f64> = (0..n).map(|i| (i % 31) as f64 * 0.125).collect();
        group.bench_with_input(BenchmarkId::new("compute", n), &samples, |b, samples| {
            b.iter(|| stats::compute(black_box(samples)));
        });
    }

    group.finish();
}

// Register all benchmarks
criterion_group!(
    benches,
    bench_decode_strategies,
    bench_single_record,
    bench_stats_reduction,
);

criterion_main!(benches);
