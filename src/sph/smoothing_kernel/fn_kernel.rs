use super::kernel::Kernel;
use crate::units::Real;

/// Kernel built from two caller supplied pure functions of (distance, smoothing radius).
///
/// The gradient function returns the negated slope: for W = (h - r)² pass 2 (h - r), not -2 (h - r),
/// otherwise positive pressure attracts instead of repels.
///
/// ```
/// use refsph2d::sph::FnKernel;
/// let kernel = FnKernel::new(|r, h| if r < h { h - r } else { 0.0 }, |r, h| if r < h { 1.0 } else { 0.0 });
/// ```
#[derive(Copy, Clone)]
pub struct FnKernel<W, G> {
    evaluate: W,
    gradient: G,
}

impl<W, G> FnKernel<W, G>
where
    W: Fn(Real, Real) -> Real,
    G: Fn(Real, Real) -> Real,
{
    pub fn new(evaluate: W, gradient: G) -> Self {
        FnKernel { evaluate, gradient }
    }
}

impl<W, G> Kernel for FnKernel<W, G>
where
    W: Fn(Real, Real) -> Real,
    G: Fn(Real, Real) -> Real,
{
    #[inline]
    fn evaluate(&self, r: Real, h: Real) -> Real {
        (self.evaluate)(r, h)
    }

    #[inline]
    fn gradient(&self, r: Real, h: Real) -> Real {
        (self.gradient)(r, h)
    }
}
