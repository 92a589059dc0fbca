use super::kernel::Kernel;
use crate::units::Real;

/// Quadratic spiky kernel, W(r) = 6 / (π h⁴) · (h - r)².
///
/// Normalized over the 2D disc of radius h. This is the kernel the hardware pipeline implements,
/// which is parametrized by the two normalization coefficients instead of h directly.
#[derive(Copy, Clone, Debug, Default)]
pub struct SpikyQuadratic;

impl SpikyQuadratic {
    /// Factor applied to (h - r)² in `evaluate`.
    pub fn density_coefficient(h: Real) -> Real {
        6.0 / (std::f64::consts::PI * h.powi(4))
    }

    /// Factor applied to (h - r) in `gradient`.
    pub fn gradient_coefficient(h: Real) -> Real {
        12.0 / (std::f64::consts::PI * h.powi(4))
    }
}

impl Kernel for SpikyQuadratic {
    #[inline]
    fn evaluate(&self, r: Real, h: Real) -> Real {
        if r >= h {
            return 0.0;
        }
        let h_minus_r = h - r;
        Self::density_coefficient(h) * h_minus_r * h_minus_r
    }

    // Negated derivative of `evaluate`.
    #[inline]
    fn gradient(&self, r: Real, h: Real) -> Real {
        if r >= h {
            return 0.0;
        }
        Self::gradient_coefficient(h) * (h - r)
    }
}

generate_kernel_tests!(SpikyQuadratic);

#[cfg(test)]
mod normalization_tests {
    use super::*;

    #[test]
    fn integrates_to_one_over_disc() {
        const STEPS: usize = 20000;
        let h = 1.7;
        let dr = h / STEPS as Real;
        let integral: Real = (0..STEPS)
            .map(|i| {
                let r = (i as Real + 0.5) * dr;
                SpikyQuadratic.evaluate(r, h) * 2.0 * std::f64::consts::PI * r * dr
            })
            .sum();
        assert!((integral - 1.0).abs() < 1.0e-6, "integral was {}", integral);
    }

    #[test]
    fn gradient_is_negated_derivative() {
        let h = 0.25;
        let eps = 1.0e-7;
        for &r in &[0.01, 0.1, 0.2, 0.24] {
            let numeric = -(SpikyQuadratic.evaluate(r + eps, h) - SpikyQuadratic.evaluate(r - eps, h)) / (2.0 * eps);
            let analytic = SpikyQuadratic.gradient(r, h);
            assert!((numeric - analytic).abs() < 1.0e-4 * analytic.abs(), "r={} numeric={} analytic={}", r, numeric, analytic);
        }
    }

    #[test]
    fn coefficients_match_hardware_parameters() {
        let h: Real = 0.25;
        let expected = 1.0 / (std::f64::consts::PI * h.powi(4) / 6.0);
        assert!((SpikyQuadratic::density_coefficient(h) - expected).abs() < 1.0e-12 * expected);
        assert!((SpikyQuadratic::gradient_coefficient(h) - 2.0 * expected).abs() < 1.0e-12 * expected);
        assert_eq!(SpikyQuadratic.evaluate(0.0, h), SpikyQuadratic::density_coefficient(h) * h * h);
    }
}
