//! Benchmarks for profiling operations.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::explicit_iter_loop,
    missing_docs
)]

use std::sync::Arc;

use arrow::{
    array::{Float64Array, Int32Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eda_cli::{
    compute_quality_flags, correlation_matrix, missing_table, summarize_dataset, top_categories,
    ArrowDataset,
};

fn create_dataset(rows: usize) -> ArrowDataset {
    let schema = Arc::new(Schema::new(vec![
        Field::new("user_id", DataType::Int32, false),
        Field::new("city", DataType::Utf8, true),
        Field::new("score", DataType::Float64, true),
        Field::new("weight", DataType::Float64, true),
    ]));

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let ids: Vec<i32> = (0..rows as i32).collect();
    let cities: Vec<Option<String>> = ids
        .iter()
        .map(|i| (i % 17 != 0).then(|| format!("city_{}", i % 40)))
        .collect();
    #[allow(clippy::cast_lossless)]
    let scores: Vec<Option<f64>> = ids
        .iter()
        .map(|i| (i % 11 != 0).then(|| *i as f64 * 1.5))
        .collect();
    #[allow(clippy::cast_lossless)]
    let weights: Vec<Option<f64>> = ids.iter().map(|i| Some(((*i % 97) as f64).sqrt())).collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int32Array::from(ids)),
            Arc::new(StringArray::from(cities)),
            Arc::new(Float64Array::from(scores)),
            Arc::new(Float64Array::from(weights)),
        ],
    )
    .expect("Failed to create batch");

    ArrowDataset::from_batch(batch).expect("Failed to create dataset")
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_dataset");

    for size in [1_000, 10_000, 100_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, dataset| {
            b.iter(|| summarize_dataset(black_box(dataset)).unwrap());
        });
    }

    group.finish();
}

fn bench_missing(c: &mut Criterion) {
    let mut group = c.benchmark_group("missing_table");

    for size in [1_000, 10_000, 100_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, dataset| {
            b.iter(|| missing_table(black_box(dataset)).unwrap());
        });
    }

    group.finish();
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_matrix");

    for size in [1_000, 10_000, 100_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, dataset| {
            b.iter(|| correlation_matrix(black_box(dataset)).unwrap());
        });
    }

    group.finish();
}

fn bench_top_categories(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_categories");

    for size in [1_000, 10_000, 100_000].iter() {
        let dataset = create_dataset(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, dataset| {
            b.iter(|| top_categories(black_box(dataset), 5, 5).unwrap());
        });
    }

    group.finish();
}

fn bench_quality_flags(c: &mut Criterion) {
    let dataset = create_dataset(10_000);
    let summary = summarize_dataset(&dataset).unwrap();
    let missing = missing_table(&dataset).unwrap();

    c.bench_function("compute_quality_flags", |b| {
        b.iter(|| compute_quality_flags(black_box(&summary), black_box(&missing)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_summarize,
    bench_missing,
    bench_correlation,
    bench_top_categories,
    bench_quality_flags
);
criterion_main!(benches);
