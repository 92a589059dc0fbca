use criterion::{black_box, criterion_group, Criterion};

use refsph2d::sph::*;

fn bench_kernels(c: &mut Criterion) {
    let smoothing_radius = black_box(1.0);
    let r = black_box(0.5);

    {
        let kernel = black_box(SpikyQuadratic);
        c.bench_function("SpikyQuadratic.evaluate", |b| b.iter(|| kernel.evaluate(r, smoothing_radius)));
        c.bench_function("SpikyQuadratic.gradient", |b| b.iter(|| kernel.gradient(r, smoothing_radius)));
    }
    {
        let kernel = black_box(FnKernel::new(
            |r: f64, h: f64| if r < h { h - r } else { 0.0 },
            |r: f64, h: f64| if r < h { 1.0 } else { 0.0 },
        ));
        c.bench_function("FnKernel.evaluate", |b| b.iter(|| kernel.evaluate(r, smoothing_radius)));
    }
}

fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(core::time::Duration::new(0, 100))
        .sample_size(1000)
        .significance_level(0.1)
}

criterion_group!(
    name = smoothing_kernel;
    config = config();
    targets = bench_kernels
);
