// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 MuVeraAI Corporation

//! Criterion benchmark suite for the cloudprice query engine.
//!
//! Benchmarks cover the hot paths behind every dashboard interaction:
//!
//! - Catalog filtering with combined criteria
//! - Stable sorting by each field
//! - Summary aggregation (min / max / average / median / counts)
//! - Cost estimate totals and CSV export
//! - Budget alert evaluation
//!
//! Run with: `cargo bench --bench query_benchmark`

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cloudprice_core::{
    alerts::AlertBook,
    calculator::CostEstimate,
    catalog::Catalog,
    query,
    types::{
        CatalogSource, Category, Currency, FilterCriteria, Provider, RawPricing, RawServiceEntry,
        SortDirection, SortField, SortSpec,
    },
};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A synthetic catalog of `size` records spread evenly over every provider
/// and category.
fn synthetic_catalog(size: usize) -> Catalog {
    let services = (0..size)
        .map(|index| {
            let provider = Provider::ALL[index % Provider::ALL.len()];
            let category = Category::ALL[index % Category::ALL.len()];
            RawServiceEntry {
                id: format!("svc-{index:05}"),
                name: format!("{} {} instance {index}", provider.display_name(), category.label()),
                category: category.id().into(),
                provider: provider.id().into(),
                pricing: RawPricing {
                    usd: 0.001 + (index % 97) as f64 * 0.0173,
                    unit: "hour".into(),
                    billing_type: "hourly".into(),
                },
                description: String::new(),
                specifications: BTreeMap::new(),
                region: "us-east-1".into(),
            }
        })
        .collect();

    Catalog::load(CatalogSource { exchange_rate: 83.15, services })
        .expect("synthetic catalog is valid")
}

// ---------------------------------------------------------------------------
// Filter benchmark
// ---------------------------------------------------------------------------

fn filter_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("filter");

    let criteria = FilterCriteria {
        category: Some(Category::Compute),
        providers: Some(vec![Provider::Aws, Provider::Gcp]),
        max_price: Some(50.0),
        search: Some("INSTANCE 1".into()),
        region: None,
    };

    for size in [100usize, 1_000, 10_000] {
        let catalog = synthetic_catalog(size);
        group.bench_with_input(BenchmarkId::new("combined_criteria", size), &catalog, |bencher, catalog| {
            bencher.iter(|| black_box(query::filter(catalog.records(), black_box(&criteria))));
        });
    }

    let catalog = synthetic_catalog(1_000);
    group.bench_function("empty_criteria_1000", |bencher| {
        let criteria = FilterCriteria::default();
        bencher.iter(|| black_box(query::filter(catalog.records(), black_box(&criteria))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Sort benchmark
// ---------------------------------------------------------------------------

fn sort_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sort");

    let catalog = synthetic_catalog(1_000);
    let view = catalog.all();

    for field in [SortField::Name, SortField::Price, SortField::Provider] {
        let spec = SortSpec::new(field, SortDirection::Descending);
        group.bench_with_input(BenchmarkId::new("descending_1000", format!("{field:?}")), &spec, |bencher, spec| {
            bencher.iter(|| black_box(query::sort(&view, *spec)));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Aggregate benchmark
// ---------------------------------------------------------------------------

fn aggregate_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("aggregate");

    for size in [12usize, 1_000, 10_000] {
        let catalog = synthetic_catalog(size);
        let view = catalog.all();
        group.bench_with_input(BenchmarkId::new("summary", size), &view, |bencher, view| {
            bencher.iter(|| black_box(query::aggregate(black_box(view))));
        });
    }

    let builtin = Catalog::builtin().expect("bundled catalog is valid");
    let view = builtin.all();
    group.bench_function("average_by_provider_builtin", |bencher| {
        bencher.iter(|| black_box(query::average_by_provider(black_box(&view))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Estimate benchmark
// ---------------------------------------------------------------------------

fn estimate_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("estimate");

    let catalog = synthetic_catalog(100);
    let mut estimate = CostEstimate::new();
    for (index, record) in catalog.records().iter().enumerate() {
        estimate
            .add(record, 1 + index as u32 % 4, 720)
            .expect("positive quantity and duration");
    }

    group.bench_function("total_100_items", |bencher| {
        bencher.iter(|| black_box(estimate.total()));
    });

    group.bench_function("to_csv_100_items", |bencher| {
        bencher.iter(|| black_box(estimate.to_csv()));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Alert benchmark
// ---------------------------------------------------------------------------

fn alert_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("alerts");

    let mut book = AlertBook::new();
    for index in 0..500u32 {
        let id = book
            .create(&format!("alert-{index}"), 1_000.0, Currency::Inr)
            .expect("valid alert")
            .id;
        book.set_usage(id, f64::from(index % 130) * 10.0).expect("known alert");
    }

    group.bench_function("summary_500_alerts", |bencher| {
        bencher.iter(|| black_box(book.summary()));
    });

    group.bench_function("critical_500_alerts", |bencher| {
        bencher.iter(|| black_box(book.critical()));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    filter_benchmark,
    sort_benchmark,
    aggregate_benchmark,
    estimate_benchmark,
    alert_benchmark,
);

criterion_main!(benches);
