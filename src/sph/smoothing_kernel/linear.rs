use super::kernel::Kernel;
use crate::units::Real;

/// Tent kernel, W(r) = h - r.
///
/// Unnormalized, and its gradient is the plain derivative -1 rather than a positive slope, so
/// pressure above the target density pulls particles together. Handy for quick experiments and
/// for checking the sign handling of the force pass.
#[derive(Copy, Clone, Debug, Default)]
pub struct Linear;

impl Kernel for Linear {
    #[inline]
    fn evaluate(&self, r: Real, h: Real) -> Real {
        (h - r).max(0.0)
    }

    #[inline]
    fn gradient(&self, r: Real, h: Real) -> Real {
        if r < h {
            -1.0
        } else {
            0.0
        }
    }
}

generate_kernel_tests!(Linear);
