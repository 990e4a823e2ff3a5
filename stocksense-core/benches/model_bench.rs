//! Criterion benchmarks for StockSense hot paths.
//!
//! Benchmarks:
//! 1. Feature construction over five years of daily bars
//! 2. Forest fit on one fold's worth of rows
//! 3. Full walk-forward train + predict

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stocksense_core::domain::Bar;
use stocksense_core::features::FeatureBuilder;
use stocksense_core::labels::LabelBuilder;
use stocksense_core::model::{ForestParams, RandomForest, SignalModel};

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0 + i as f64 * 0.02;
            let open = close - 0.3;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: close + 1.5,
                low: open - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect()
}

fn bench_features(c: &mut Criterion) {
    let bars = make_bars(1250);
    let builder = FeatureBuilder::new();
    c.bench_function("features_1250_bars", |b| {
        b.iter(|| builder.build(black_box(&bars)))
    });
}

fn bench_forest_fit(c: &mut Criterion) {
    let rows = LabelBuilder::default().build(&FeatureBuilder::new().build(&make_bars(1250)));
    let samples: Vec<[f64; 6]> = rows.iter().map(|r| r.features.to_vector()).collect();
    let labels: Vec<usize> = rows
        .iter()
        .map(|r| (r.signal.as_i8() + 1) as usize)
        .collect();

    let mut group = c.benchmark_group("forest_fit");
    group.sample_size(10);
    for n_trees in [10usize, 100] {
        let params = ForestParams {
            n_trees,
            ..ForestParams::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(n_trees), &params, |b, p| {
            b.iter(|| RandomForest::fit(black_box(&samples), black_box(&labels), p))
        });
    }
    group.finish();
}

fn bench_train_predict(c: &mut Criterion) {
    let rows = LabelBuilder::default().build(&FeatureBuilder::new().build(&make_bars(1250)));
    let model = SignalModel::default();

    let mut group = c.benchmark_group("signal_model");
    group.sample_size(10);
    group.bench_function("train_and_predict", |b| {
        b.iter(|| {
            let trained = model.train(black_box(&rows)).unwrap();
            model.predict(&rows, &trained).unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_features, bench_forest_fit, bench_train_predict);
criterion_main!(benches);
