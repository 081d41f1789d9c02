//! Cost of the recording wrapper itself
//!
//! Compares a bare call against the same call through `Timed::call`, and
//! measures report building over a store of realistic size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scaling_bench::dataset::random_values;
use scaling_bench::workloads::cumsum::fast_cumulative_sum;
use scaling_bench::{Notice, Recorder, ReportBuilder, Sample, SampleStore};

fn bench_wrapped_vs_bare(c: &mut Criterion) {
    let mut group = c.benchmark_group("recorder_wrap");
    let values = random_values(1_000, 1);

    group.bench_function("bare", |b| {
        b.iter(|| fast_cumulative_sum(black_box(&values)))
    });

    let store = SampleStore::new();
    let timed = Recorder::new(store.clone())
        .with_notice(Notice::Quiet)
        .wrap(fast_cumulative_sum);
    group.bench_function("wrapped", |b| {
        b.iter(|| {
            // Keep the store from growing across millions of iterations.
            if store.len() > 10_000 {
                store.clear();
            }
            timed.call(black_box(values.as_slice()))
        })
    });

    group.finish();
}

fn bench_report_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_build");

    for functions in [2usize, 8, 32] {
        let store = SampleStore::new();
        for f in 0..functions {
            for exp in 1..=7u32 {
                let n = 10usize.pow(exp);
                store.append(Sample::from_millis(format!("workload_{f}"), n, n as f64 / 1e4));
            }
        }
        let builder = ReportBuilder::default();

        group.bench_with_input(BenchmarkId::from_parameter(functions), &store, |b, store| {
            b.iter(|| builder.build(black_box(store)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_wrapped_vs_bare, bench_report_build);
criterion_main!(benches);
