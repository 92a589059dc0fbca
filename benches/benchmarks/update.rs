use criterion::{criterion_group, Criterion};

use refsph2d::sph::scene::{self, Rect};
use refsph2d::sph::*;

fn bench_update(c: &mut Criterion) {
    const NUM_PARTICLES: usize = 400;

    for &strategy in &[ExecutionStrategy::Serial, ExecutionStrategy::Parallel] {
        let particles = scene::grid_particles_in_rect(NUM_PARTICLES, &Rect::new(7.0, 3.0, 3.0, 3.0));
        let mut engine = SphEngine::new(particles, SphConfig::default(), SpikyQuadratic).unwrap();
        engine.set_strategy_override(Some(strategy));

        c.bench_function(
            &format!("SphEngine.update - {} particles, {:?} on {} workers", engine.len(), strategy, worker_count()),
            |b| b.iter(|| engine.update().unwrap()),
        );
    }
}

fn config() -> Criterion {
    Criterion::default().sample_size(20)
}

criterion_group!(
    name = update;
    config = config();
    targets = bench_update
);
