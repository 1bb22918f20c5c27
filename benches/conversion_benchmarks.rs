//! Performance benchmarks for the Salary Engine.
//!
//! This benchmark suite covers:
//! - Forward conversion from gross salary
//! - Bisection from net salary and from employer cost
//! - A single `/convert` request through the router
//! - A batch of 1000 mixed requests
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use salary_engine::api::{AppState, create_router};
use salary_engine::assessment::DisabledAssessor;
use salary_engine::calculation::convert;
use salary_engine::config::{ConfigLoader, TaxRateTable};
use salary_engine::models::{ConversionRequest, KnownQuantity, PensionRate};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/ee").expect("Failed to load config");
    AppState::new(config, Arc::new(DisabledAssessor))
}

fn create_request(amount: &str, quantity: KnownQuantity) -> ConversionRequest {
    ConversionRequest::parse(amount, quantity, PensionRate::Two, true)
        .expect("Failed to create request")
}

/// Benchmark: direct conversion for each known quantity.
fn bench_convert(c: &mut Criterion) {
    let table = TaxRateTable::estonian();
    let mut group = c.benchmark_group("convert");

    for (name, request) in [
        ("gross", create_request("1000", KnownQuantity::Gross)),
        ("net", create_request("751.92", KnownQuantity::Net)),
        ("employer", create_request("1338", KnownQuantity::EmployerCost)),
    ] {
        group.bench_with_input(BenchmarkId::new("quantity", name), &request, |b, request| {
            b.iter(|| black_box(convert(black_box(request), &table)))
        });
    }

    group.finish();
}

/// Benchmark: bisection cost across salary magnitudes.
fn bench_net_scaling(c: &mut Criterion) {
    let table = TaxRateTable::estonian();
    let mut group = c.benchmark_group("net_scaling");

    for amount in ["1", "100", "10000", "1000000", "100000000"] {
        let request = create_request(amount, KnownQuantity::Net);
        group.bench_with_input(BenchmarkId::new("net", amount), &request, |b, request| {
            b.iter(|| black_box(convert(black_box(request), &table)))
        });
    }

    group.finish();
}

/// Benchmark: a single conversion request through the HTTP router.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({ "amount": "751.92", "quantity": "net", "pension": "2" })
        .to_string();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/convert")
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

/// Benchmark: batch of 1000 mixed requests.
fn bench_batch_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let requests: Vec<String> = (0..1000)
        .map(|i| {
            let quantity = match i % 3 {
                0 => "gross",
                1 => "net",
                _ => "employer",
            };
            let pension = ["0", "2", "4", "6"][i % 4];
            serde_json::json!({
                "amount": format!("{}.{:02}", 500 + i * 7, i % 100),
                "quantity": quantity,
                "pension": pension,
                "include_unemployment": i % 5 != 0
            })
            .to_string()
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(1000);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/convert")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_convert,
    bench_net_scaling,
    bench_single_request,
    bench_batch_1000,
);
criterion_main!(benches);
