use super::config::{self, SphConfig};
use super::dispatch::{self, ExecutionStrategy};
use super::error::{Result, SphError};
use super::particle::Particle;
use super::smoothing_kernel::Kernel;
use super::spatial_grid::SpatialGrid;
use crate::units::*;
use cgmath::prelude::*;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// Weakly compressible SPH solver over a set of 2D particles in an axis aligned box.
///
/// Each `update` runs four passes in order:
/// 1. predicted positions (position + Δt·velocity)
/// 2. spatial grid over the predicted positions
/// 3. density & pressure, summing over the 3x3 grid block around each predicted position
/// 4. pressure force over all other particles at their current positions, then integration & boundary handling
///
/// Passes 3 and 4 are either run serially or mapped over a worker pool, see `ExecutionStrategy`.
/// Both produce identical results since every particle only reads the state of the previous pass.
pub struct SphEngine<K: Kernel> {
    particles: Vec<Particle>,
    config: SphConfig,
    kernel: K,

    // Derived state, rebuilt each tick, indexed by particle.
    predicted_positions: Vec<Point>,
    densities: Vec<Real>,
    pressures: Vec<Real>,
    pressure_forces: Vec<Vector>,
    grid: SpatialGrid,

    // Master source for per tick seeds of the coincident particle direction.
    rng: SmallRng,
    strategy_override: Option<ExecutionStrategy>,
    worker_pool: rayon::ThreadPool,

    tick_count: u64,
    simulated_time: Real,
}

impl<K: Kernel + Sync> SphEngine<K> {
    pub fn new(particles: Vec<Particle>, config: SphConfig, kernel: K) -> Result<SphEngine<K>> {
        Self::with_worker_count(particles, config, kernel, dispatch::worker_count())
    }

    pub fn with_worker_count(particles: Vec<Particle>, config: SphConfig, kernel: K, num_workers: usize) -> Result<SphEngine<K>> {
        config.validate()?;
        let num_particles = particles.len();
        tracing::debug!(num_particles, ?config, "creating SPH engine");

        Ok(SphEngine {
            particles,
            config,
            kernel,

            predicted_positions: Vec::with_capacity(num_particles),
            densities: Vec::with_capacity(num_particles),
            pressures: Vec::with_capacity(num_particles),
            pressure_forces: Vec::with_capacity(num_particles),
            grid: SpatialGrid::new(),

            rng: SmallRng::seed_from_u64(config.seed),
            strategy_override: None,
            worker_pool: dispatch::build_worker_pool(num_workers)?,

            tick_count: 0,
            simulated_time: 0.0,
        })
    }

    /// Strategy the next `update` will use.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy_override
            .unwrap_or_else(|| dispatch::choose_strategy(self.particles.len()))
    }

    /// Forces a strategy regardless of the particle count. `None` goes back to choosing by count.
    pub fn set_strategy_override(&mut self, strategy: Option<ExecutionStrategy>) {
        self.strategy_override = strategy;
    }

    /// Advances the simulation by one time step.
    ///
    /// Fails with `SphError::ZeroDensity` if any particle ends up without density. Particles,
    /// densities, pressures and pressure forces keep the values of the last completed tick in that case.
    pub fn update(&mut self) -> Result<()> {
        let num_particles = self.particles.len();
        let strategy = self.strategy();
        let _span = tracing::debug_span!("SphEngine::update", tick = self.tick_count, num_particles, ?strategy).entered();

        let tick_seed: u64 = self.rng.gen();
        let time_step = self.config.time_step;

        self.predicted_positions.clear();
        self.predicted_positions
            .extend(self.particles.iter().map(|p| p.predicted_position(time_step)));
        self.grid.rebuild(&self.predicted_positions, self.config.smoothing_radius);

        let densities = self.compute_densities(strategy);
        if let Some(index) = densities.iter().position(|&density| density == 0.0) {
            tracing::warn!(index, "zero density, aborting tick");
            return Err(SphError::ZeroDensity { index });
        }
        self.store_densities(densities);

        self.update_particles(strategy, tick_seed);

        self.tick_count += 1;
        self.simulated_time += time_step;
        Ok(())
    }

    fn compute_densities(&self, strategy: ExecutionStrategy) -> Vec<Real> {
        let _span = tracing::trace_span!("SphEngine::compute_densities").entered();

        let pass = DensityPass {
            predicted_positions: &self.predicted_positions,
            grid: &self.grid,
            kernel: &self.kernel,
            mass: self.config.mass,
            smoothing_radius: self.config.smoothing_radius,
        };
        let num_particles = self.particles.len();

        // Collecting is the barrier, the engine writes back only after the caller checked the result.
        match strategy {
            ExecutionStrategy::Serial => (0..num_particles).map(|i| pass.density(i)).collect(),
            ExecutionStrategy::Parallel => {
                let min_len = chunk_len(num_particles, self.worker_pool.current_num_threads());
                self.worker_pool
                    .install(|| (0..num_particles).into_par_iter().with_min_len(min_len).map(|i| pass.density(i)).collect())
            }
        }
    }

    fn store_densities(&mut self, densities: Vec<Real>) {
        let pressure_coeff = self.config.pressure_coeff;
        let target_density = self.config.target_density;
        self.pressures.clear();
        self.pressures
            .extend(densities.iter().map(|&density| pressure_coeff * (density - target_density)));
        self.densities = densities;
    }

    fn update_particles(&mut self, strategy: ExecutionStrategy, tick_seed: u64) {
        let _span = tracing::trace_span!("SphEngine::update_particles").entered();

        let pass = ForcePass {
            particles: &self.particles,
            densities: &self.densities,
            pressures: &self.pressures,
            kernel: &self.kernel,
            config: &self.config,
            tick_seed,
        };
        let num_particles = self.particles.len();

        let results: Vec<(Vector, Particle)> = match strategy {
            ExecutionStrategy::Serial => (0..num_particles).map(|i| pass.step(i)).collect(),
            ExecutionStrategy::Parallel => {
                let min_len = chunk_len(num_particles, self.worker_pool.current_num_threads());
                self.worker_pool
                    .install(|| (0..num_particles).into_par_iter().with_min_len(min_len).map(|i| pass.step(i)).collect())
            }
        };

        self.pressure_forces.clear();
        for (particle, (force, updated)) in self.particles.iter_mut().zip(results) {
            self.pressure_forces.push(force);
            *particle = updated;
        }
    }

    pub fn config(&self) -> &SphConfig {
        &self.config
    }

    /// Replaces all parameters at once. The direction source is reseeded if the seed changed.
    pub fn set_config(&mut self, new_config: SphConfig) -> Result<()> {
        new_config.validate()?;
        if new_config.seed != self.config.seed {
            self.rng = SmallRng::seed_from_u64(new_config.seed);
        }
        self.config = new_config;
        Ok(())
    }

    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
    }

    pub fn mass(&self) -> Real {
        self.config.mass
    }

    pub fn set_mass(&mut self, mass: Real) -> Result<()> {
        config::validate_mass(mass)?;
        self.config.mass = mass;
        Ok(())
    }

    pub fn time_step(&self) -> Real {
        self.config.time_step
    }

    pub fn set_time_step(&mut self, time_step: Real) {
        self.config.time_step = time_step;
    }

    pub fn smoothing_radius(&self) -> Real {
        self.config.smoothing_radius
    }

    pub fn set_smoothing_radius(&mut self, smoothing_radius: Real) -> Result<()> {
        config::validate_smoothing_radius(smoothing_radius)?;
        self.config.smoothing_radius = smoothing_radius;
        Ok(())
    }

    pub fn target_density(&self) -> Real {
        self.config.target_density
    }

    pub fn set_target_density(&mut self, target_density: Real) {
        self.config.target_density = target_density;
    }

    pub fn pressure_coeff(&self) -> Real {
        self.config.pressure_coeff
    }

    pub fn set_pressure_coeff(&mut self, pressure_coeff: Real) {
        self.config.pressure_coeff = pressure_coeff;
    }

    pub fn gravity(&self) -> Real {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Real) {
        self.config.gravity = gravity;
    }

    pub fn collision_damping(&self) -> Real {
        self.config.collision_damping
    }

    pub fn set_collision_damping(&mut self, collision_damping: Real) {
        self.config.collision_damping = collision_damping;
    }

    pub fn bounds(&self) -> Vector {
        self.config.bounds
    }

    pub fn set_bounds(&mut self, bounds: Vector) -> Result<()> {
        config::validate_bounds(bounds)?;
        self.config.bounds = bounds;
        Ok(())
    }

    /// Copy of all particles. Changing it has no effect on the engine.
    pub fn get_particles(&self) -> Vec<Particle> {
        self.particles.clone()
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Removes the first particle equal to `particle`.
    pub fn remove_particle(&mut self, particle: &Particle) -> Result<Particle> {
        let index = self
            .particles
            .iter()
            .position(|p| p == particle)
            .ok_or(SphError::ParticleNotFound)?;
        Ok(self.particles.remove(index))
    }

    pub fn remove_particle_at(&mut self, index: usize) -> Result<Particle> {
        if index >= self.particles.len() {
            return Err(SphError::ParticleIndexOutOfRange {
                index,
                len: self.particles.len(),
            });
        }
        Ok(self.particles.remove(index))
    }

    /// Swaps in a whole new particle set, e.g. to restart a scene.
    pub fn replace_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    // Derived state of the last completed pass. Stale after adding or removing particles until the next update.

    pub fn predicted_positions(&self) -> &[Point] {
        &self.predicted_positions
    }

    pub fn densities(&self) -> &[Real] {
        &self.densities
    }

    pub fn pressures(&self) -> &[Real] {
        &self.pressures
    }

    pub fn pressure_forces(&self) -> &[Vector] {
        &self.pressure_forces
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // how much physical time has passed in the simulation
    pub fn simulated_time(&self) -> Real {
        self.simulated_time
    }

    pub fn kinetic_energy(&self) -> Real {
        self.particles.iter().map(|p| p.kinetic_energy(self.config.mass)).sum()
    }
}

// Same chunking as splitting the index range evenly over all workers.
fn chunk_len(num_particles: usize, num_workers: usize) -> usize {
    std::cmp::max(1, num_particles / std::cmp::max(1, num_workers))
}

/// Read-only inputs of the density pass.
struct DensityPass<'a, K> {
    predicted_positions: &'a [Point],
    grid: &'a SpatialGrid,
    kernel: &'a K,
    mass: Real,
    smoothing_radius: Real,
}

impl<'a, K: Kernel> DensityPass<'a, K> {
    // Includes the particle itself, contributing mass * W(0).
    #[inline]
    fn density(&self, i: usize) -> Real {
        let ri = self.predicted_positions[i];
        let mut density = 0.0;
        self.grid.foreach_potential_neighbor(ri, |j| {
            let r = self.predicted_positions[j].distance(ri);
            density += self.mass * self.kernel.evaluate(r, self.smoothing_radius);
        });
        density
    }
}

/// Read-only inputs of the force & integration pass.
struct ForcePass<'a, K> {
    particles: &'a [Particle],
    densities: &'a [Real],
    pressures: &'a [Real],
    kernel: &'a K,
    config: &'a SphConfig,
    tick_seed: u64,
}

impl<'a, K: Kernel> ForcePass<'a, K> {
    fn step(&self, i: usize) -> (Vector, Particle) {
        let force = self.pressure_force(i);
        (force, self.integrate(i, force))
    }

    // Sums over all other particles, not just grid neighbors.
    fn pressure_force(&self, i: usize) -> Vector {
        let mass = self.config.mass;
        let h = self.config.smoothing_radius;
        let ri = self.particles[i].position;
        let pi = self.pressures[i];

        // Only seeded if there is a coincident particle.
        let mut rng: Option<SmallRng> = None;

        let mut force = Vector::zero();
        for (j, pj) in self.particles.iter().enumerate() {
            if i == j {
                continue;
            }
            let ri_to_rj = pj.position - ri;
            let r = ri_to_rj.magnitude();
            let direction = if r > 0.0 {
                ri_to_rj / r
            } else {
                random_direction(rng.get_or_insert_with(|| particle_rng(self.tick_seed, i)))
            };

            let magnitude = -mass * (pi + self.pressures[j]) / (2.0 * self.densities[j]) * self.kernel.gradient(r, h);
            force += direction * magnitude;
        }
        force
    }

    // Semi-implicit Euler, then per axis reflection and a final clamp into the domain.
    fn integrate(&self, i: usize, pressure_force: Vector) -> Particle {
        let dt = self.config.time_step;
        let bounds = self.config.bounds;
        let damping = self.config.collision_damping;
        let mut particle = self.particles[i];

        let acceleration = (pressure_force + self.config.gravity_vector()) / self.densities[i];
        particle.velocity += acceleration * dt;

        // Both axes are tested against the same unreflected prediction.
        let next_position = particle.position + particle.velocity * dt;
        if next_position.x < 0.0 || next_position.x > bounds.x {
            particle.velocity.x = -particle.velocity.x * damping;
        }
        if next_position.y < 0.0 || next_position.y > bounds.y {
            particle.velocity.y = -particle.velocity.y * damping;
        }

        particle.position += particle.velocity * dt;

        let position = particle.position;
        if position.x < 0.0 || position.x > bounds.x || position.y < 0.0 || position.y > bounds.y {
            particle.position = Point::new(position.x.clamp(0.0, bounds.x), position.y.clamp(0.0, bounds.y));
            particle.velocity = Vector::zero();
        }
        particle
    }
}

// Independent of execution order, so serial and parallel passes pick the same directions.
fn particle_rng(tick_seed: u64, i: usize) -> SmallRng {
    SmallRng::seed_from_u64(tick_seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn random_direction(rng: &mut impl Rng) -> Vector {
    let angle: Real = rng.gen_range(0.0..std::f64::consts::TAU);
    Vector::new(angle.cos(), angle.sin())
}
