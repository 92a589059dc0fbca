use std::collections::VecDeque;
use std::time::{Duration, Instant};

use refsph2d::sph::scene::{self, Rect};
use refsph2d::sph::*;
use refsph2d::units::*;

const NUM_PARTICLES: usize = 400;
const NUM_SIMULATION_STEPS: u32 = 600;
const LOG_INTERVAL: u32 = 60;
const SIMULATION_STEP_HISTORY_LENGTH: usize = 80;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = SphConfig::default();
    let particles = scene::grid_particles_in_rect(NUM_PARTICLES, &Rect::new(7.0, 3.0, 3.0, 3.0));
    let mut engine = SphEngine::new(particles, config, SpikyQuadratic)?;
    tracing::info!(
        num_particles = engine.len(),
        workers = worker_count(),
        strategy = ?engine.strategy(),
        "starting simulation"
    );

    let mut simulation_step_duration_history: VecDeque<Duration> = VecDeque::with_capacity(SIMULATION_STEP_HISTORY_LENGTH);
    let mut total_simulation_processing_time = Duration::default();

    for step in 1..=NUM_SIMULATION_STEPS {
        let time_step_start = Instant::now();
        engine.update()?;
        let step_processing_time = time_step_start.elapsed();
        total_simulation_processing_time += step_processing_time;

        if simulation_step_duration_history.len() == SIMULATION_STEP_HISTORY_LENGTH {
            simulation_step_duration_history.pop_front();
        }
        simulation_step_duration_history.push_back(step_processing_time);

        if step % LOG_INTERVAL == 0 {
            let average_simulation_step_duration =
                simulation_step_duration_history.iter().sum::<Duration>() / simulation_step_duration_history.len() as u32;
            let densities = engine.densities();
            let mean_density = densities.iter().sum::<Real>() / densities.len().max(1) as Real;

            tracing::info!(
                step,
                sim_time = engine.simulated_time(),
                avg_step_ms = average_simulation_step_duration.as_secs_f64() * 1000.0,
                kinetic_energy = engine.kinetic_energy(),
                mean_density,
                "progress"
            );
        }
    }

    tracing::info!(
        total_processing_ms = total_simulation_processing_time.as_secs_f64() * 1000.0,
        sim_time = engine.simulated_time(),
        "done"
    );
    Ok(())
}
