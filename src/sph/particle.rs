use crate::units::*;
use cgmath::prelude::*;

/// A single fluid particle.
///
/// The engine owns its particles, callers only ever get copies (see `SphEngine::get_particles`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vector,
}

impl Particle {
    pub fn new(position: Point, velocity: Vector) -> Particle {
        Particle { position, velocity }
    }

    /// Particle at rest.
    pub fn at(x: Real, y: Real) -> Particle {
        Particle {
            position: Point::new(x, y),
            velocity: Vector::zero(),
        }
    }

    /// Position extrapolated one step ahead under the current velocity.
    #[inline]
    pub fn predicted_position(&self, time_step: Real) -> Point {
        self.position + self.velocity * time_step
    }

    pub fn kinetic_energy(&self, mass: Real) -> Real {
        0.5 * mass * self.velocity.magnitude2()
    }
}
