//! Typed errors for engine configuration and stepping.

use crate::units::Real;
use std::fmt;

/// Errors raised by the engine, either eagerly when configuring it or during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SphError {
    /// Smoothing radius was zero, negative or not finite.
    InvalidSmoothingRadius(Real),

    /// Particle mass was zero, negative or not finite.
    InvalidMass(Real),

    /// Domain bounds were negative or not finite.
    InvalidBounds { width: Real, height: Real },

    /// A particle ended up with a density of exactly zero. The tick that found it was aborted.
    ZeroDensity { index: usize },

    /// `remove_particle` was given a particle that is not in the collection.
    ParticleNotFound,

    /// Index based removal past the end of the collection.
    ParticleIndexOutOfRange { index: usize, len: usize },

    /// The worker pool for the parallel strategy could not be built.
    ThreadPool(String),
}

impl fmt::Display for SphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSmoothingRadius(h) => write!(f, "smoothing radius must be positive and finite, got {h}"),
            Self::InvalidMass(m) => write!(f, "particle mass must be positive and finite, got {m}"),
            Self::InvalidBounds { width, height } => {
                write!(f, "domain bounds must be non-negative and finite, got ({width}, {height})")
            }
            Self::ZeroDensity { index } => write!(
                f,
                "particle {index} has zero density (does the kernel vanish at distance 0?), tick aborted"
            ),
            Self::ParticleNotFound => write!(f, "particle not found in the engine's collection"),
            Self::ParticleIndexOutOfRange { index, len } => {
                write!(f, "particle index {index} out of range for {len} particles")
            }
            Self::ThreadPool(e) => write!(f, "failed to build worker pool: {e}"),
        }
    }
}

impl std::error::Error for SphError {}

pub type Result<T> = std::result::Result<T, SphError>;
