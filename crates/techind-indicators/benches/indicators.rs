//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use techind_core::numeric::{to_cells, Cell};
use techind_core::traits::{Indicator, MultiOutputIndicator};
use techind_indicators::{Macd, Rci, Stochastic};

fn generate_test_data(size: usize) -> Vec<Cell> {
    let data: Vec<f64> = (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect();
    to_cells(&data)
}

fn benchmark_rci(c: &mut Criterion) {
    let mut group = c.benchmark_group("RCI");

    for size in [1000, 10000].iter() {
        let data = generate_test_data(*size);

        for period in [9, 26, 52] {
            let rci = Rci::new(period).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("period_{}", period), size),
                &data,
                |b, data| b.iter(|| rci.calculate(black_box(data))),
            );
        }
    }

    group.finish();
}

fn benchmark_macd(c: &mut Criterion) {
    let mut group = c.benchmark_group("MACD");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("12_26_9", size), &data, |b, data| {
            let macd = Macd::default();
            b.iter(|| macd.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_stochastic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stochastic");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("14", size), &data, |b, data| {
            let stoch = Stochastic::new(14).unwrap();
            b.iter(|| stoch.calculate(black_box(data)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_rci, benchmark_macd, benchmark_stochastic);
criterion_main!(benches);
