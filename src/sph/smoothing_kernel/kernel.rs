use crate::units::Real;

/// SPH smoothing kernel
///
/// Only radially symmetric kernels are supported, both functions take the distance `r` between two
/// particles and the smoothing radius `h`.
/// Implementations must have compact support: for r >= h both functions return exactly 0.
/// The engine treats kernels as opaque pure functions and never checks this itself.
pub trait Kernel {
    /// Density weight of a neighbor at distance `r`.
    fn evaluate(&self, r: Real, h: Real) -> Real;

    /// Force weight of a neighbor at distance `r`.
    ///
    /// Scalar slope magnitude. The engine multiplies it with `-(pi + pj)` and the unit vector from i
    /// to j, so a kernel that falls off with distance should return a positive value here.
    fn gradient(&self, r: Real, h: Real) -> Real;
}
