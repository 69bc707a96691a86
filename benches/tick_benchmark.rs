//! Benchmarks for the tick hot path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use temblor::{
    triggers, ClassificationBins, Controller, PipelineSettings, SlidingWindow, SyntheticSource,
    Threshold,
};

fn window_push_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_push");

    for capacity in [200usize, 1000, 10_000] {
        let mut window = SlidingWindow::new(capacity);

        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, _| {
                let mut i = 0u64;
                b.iter(|| {
                    window.push(black_box(i as f64 * 0.001));
                    i += 1;
                });
            },
        );
    }

    group.finish();
}

fn detect_classify_benchmark(c: &mut Criterion) {
    let threshold = Threshold::default();
    let bins = ClassificationBins::default();

    c.bench_function("detect_triggers", |b| {
        b.iter(|| triggers(black_box(0.6), black_box(threshold)));
    });

    c.bench_function("classify_amplitude", |b| {
        b.iter(|| bins.classify(black_box(0.95)));
    });
}

fn full_tick_benchmark(c: &mut Criterion) {
    c.bench_function("controller_tick_synthetic", |b| {
        let mut controller = Controller::new(
            Box::new(SyntheticSource::new(42)),
            PipelineSettings::default(),
        )
        .expect("default settings are valid");
        controller.start();

        b.iter(|| {
            controller.tick().expect("synthetic source never fails");
        });
    });
}

criterion_group!(
    benches,
    window_push_benchmark,
    detect_classify_benchmark,
    full_tick_benchmark
);
criterion_main!(benches);
