//! Initial particle layouts for harnesses and the demo driver.

use super::particle::Particle;
use crate::units::*;
use cgmath::prelude::*;
use rand::Rng;

/// Axis aligned rectangle, `min` is its lower left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub size: Vector,
}

impl Rect {
    pub fn new(x: Real, y: Real, w: Real, h: Real) -> Rect {
        Rect {
            min: Point::new(x, y),
            size: Vector::new(w, h),
        }
    }
}

/// Pairs up positions and velocities. Surplus entries of the longer list are ignored.
pub fn particles_from(positions: &[Point], velocities: &[Vector]) -> Vec<Particle> {
    positions
        .iter()
        .zip(velocities.iter())
        .map(|(&position, &velocity)| Particle::new(position, velocity))
        .collect()
}

/// `num_particles` particles at rest, uniformly distributed over the domain.
pub fn random_particles(num_particles: usize, bounds: Vector, rng: &mut impl Rng) -> Vec<Particle> {
    std::iter::repeat_with(|| Particle::at(rng.gen::<Real>() * bounds.x, rng.gen::<Real>() * bounds.y))
        .take(num_particles)
        .collect()
}

/// Lattice of `rows` x `cols` particles with the given spacing, wrapped around at the domain bounds.
pub fn grid_particles(rows: usize, cols: usize, spacing: Real, bounds: Vector) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            particles.push(Particle::at(
                (i as Real * spacing).rem_euclid(bounds.x),
                (j as Real * spacing).rem_euclid(bounds.y),
            ));
        }
    }
    particles
}

/// Fills `rect` with a lattice of roughly `num_particles` particles.
///
/// Rows are chosen to match the rectangle's aspect ratio, so the actual count is `rows * (num_particles / rows)`.
pub fn grid_particles_in_rect(num_particles: usize, rect: &Rect) -> Vec<Particle> {
    if num_particles == 0 || rect.size.x <= 0.0 {
        return Vec::new();
    }
    let rows = std::cmp::max(1, (num_particles as Real * rect.size.y / rect.size.x).sqrt() as usize);
    let cols = num_particles / rows;
    if cols == 0 {
        return Vec::new();
    }
    let spacing = Vector::new(rect.size.x / cols as Real, rect.size.y / rows as Real);

    let mut particles = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            let offset = Vector::new(j as Real * spacing.x, i as Real * spacing.y);
            particles.push(Particle::new(rect.min + offset, Vector::zero()));
        }
    }
    particles
}
