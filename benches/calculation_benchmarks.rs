//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure period report at increasing timesheet sizes, the
//! withholding estimator on its own, and the `/calculate` endpoint end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;

use chrono::{Duration, NaiveDateTime};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, CalculationRequest, create_router};
use payroll_engine::calculation::{TaxEstimator, TaxSettings, calculate_current_period_pay};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{PayProfile, WorkInterval};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    AppState::new(config)
}

fn period_date() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2026-01-20 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

/// One 9-hour interval per day starting 2026-01-11, wrapping every 31 days.
fn create_entries(count: usize) -> Vec<WorkInterval> {
    let first = NaiveDateTime::parse_from_str("2026-01-11 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    (0..count)
        .map(|i| {
            let start = first + Duration::days((i % 31) as i64) + Duration::minutes((i / 31) as i64);
            WorkInterval::new(start, Some(start + Duration::hours(9)), 30)
        })
        .collect()
}

fn create_profile() -> PayProfile {
    PayProfile {
        state: Some("KS".to_string()),
        ..PayProfile::with_hourly_rate(Decimal::new(2250, 2))
    }
}

/// Benchmark: period report over a month of entries.
fn bench_period_report(c: &mut Criterion) {
    let estimator = TaxEstimator::default();
    let profile = create_profile();
    let mut group = c.benchmark_group("period_report");

    for count in [1usize, 14, 31, 310] {
        let entries = create_entries(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| {
                calculate_current_period_pay(
                    black_box(&estimator),
                    black_box(&profile),
                    period_date(),
                    black_box(entries),
                )
            })
        });
    }

    group.finish();
}

/// Benchmark: withholding for a single paycheck.
fn bench_net_pay(c: &mut Criterion) {
    let estimator = TaxEstimator::default();
    let profile = create_profile();
    let settings = TaxSettings::from_profile(&profile);
    let gross = Decimal::new(185_000, 2);
    let annual = gross * Decimal::from(24);

    c.bench_function("net_pay", |b| {
        b.iter(|| estimator.calculate_net_pay(black_box(gross), black_box(annual), &settings))
    });
}

/// Benchmark: `/calculate` through the router.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let request = CalculationRequest {
        profile: create_profile(),
        date: period_date(),
        entries: create_entries(22),
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("calculate_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_period_report,
    bench_net_pay,
    bench_calculate_endpoint,
);
criterion_main!(benches);
