use super::error::{Result, SphError};
use crate::units::*;

/// Scalar parameters of a simulation.
///
/// All values may be changed between ticks, see the setters on `SphEngine`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphConfig {
    pub mass: Real,             // uniform particle mass
    pub time_step: Real,        // Δt in seconds
    pub smoothing_radius: Real, // typically expressed as 'h'
    pub target_density: Real,   // rest density ρ0
    pub pressure_coeff: Real,   // stiffness k of the linear equation of state p = k (ρ - ρ0)
    pub gravity: Real,          // y component of the gravity acceleration, x is always zero
    pub bounds: Vector,         // width & height of the domain box anchored at the origin
    pub collision_damping: Real,

    // Seed for the random direction used to separate coincident particles.
    pub seed: u64,
}

impl Default for SphConfig {
    /// Interactive demo setting, a fluid block settling in a 16:9 box.
    fn default() -> Self {
        SphConfig {
            mass: 1.0,
            time_step: 1.0 / 60.0,
            smoothing_radius: 1.2,
            target_density: 2.75,
            pressure_coeff: 0.5,
            gravity: 0.0,
            bounds: Vector::new(16.0, 9.0),
            collision_damping: 0.95,
            seed: 0x5eed,
        }
    }
}

impl SphConfig {
    /// Setting used to co-simulate the hardware pipeline.
    pub fn hardware_validation() -> Self {
        SphConfig {
            mass: 1.0,
            time_step: 1.0 / 30.0,
            smoothing_radius: 0.25,
            target_density: 2.0,
            pressure_coeff: 8.0,
            gravity: -12.0,
            bounds: Vector::new(2.0, 2.0),
            collision_damping: 0.55,
            seed: 0x5eed,
        }
    }

    pub fn gravity_vector(&self) -> Vector {
        Vector::new(0.0, self.gravity)
    }

    /// Checks the values the neighbor grid and boundary clamp can't cope with.
    ///
    /// Time step, densities, pressure coefficient, gravity and damping are taken as is.
    pub fn validate(&self) -> Result<()> {
        validate_smoothing_radius(self.smoothing_radius)?;
        validate_mass(self.mass)?;
        validate_bounds(self.bounds)
    }
}

pub(super) fn validate_smoothing_radius(h: Real) -> Result<()> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(SphError::InvalidSmoothingRadius(h))
    }
}

pub(super) fn validate_mass(mass: Real) -> Result<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(SphError::InvalidMass(mass))
    }
}

pub(super) fn validate_bounds(bounds: Vector) -> Result<()> {
    let valid = |v: Real| v.is_finite() && v >= 0.0;
    if valid(bounds.x) && valid(bounds.y) {
        Ok(())
    } else {
        Err(SphError::InvalidBounds {
            width: bounds.x,
            height: bounds.y,
        })
    }
}
