/// Smoothing Kernels.
pub use self::fn_kernel::FnKernel;
pub use self::kernel::Kernel;
pub use self::linear::Linear;
pub use self::spiky_quadratic::SpikyQuadratic;

// Property tests every built-in kernel has to pass.
macro_rules! generate_kernel_tests {
    ($kernel:expr) => {
        #[cfg(test)]
        mod kernel_tests {
            use super::*;
            use more_asserts::*;

            #[test]
            fn zero_outside_support() {
                let kernel = $kernel;
                for &h in &[0.25, 1.0, 2.0] {
                    for &factor in &[1.0, 1.0001, 1.5, 10.0] {
                        assert_eq!(kernel.evaluate(h * factor, h), 0.0);
                        assert_eq!(kernel.gradient(h * factor, h), 0.0);
                    }
                }
            }

            #[test]
            fn positive_inside_support() {
                let kernel = $kernel;
                let h = 1.2;
                for i in 0..10 {
                    let r = h * i as crate::units::Real / 10.0;
                    assert_gt!(kernel.evaluate(r, h), 0.0);
                }
            }

            #[test]
            fn monotonically_decreasing() {
                let kernel = $kernel;
                let h = 2.0;
                let mut previous = kernel.evaluate(0.0, h);
                for i in 1..=100 {
                    let current = kernel.evaluate(h * i as crate::units::Real / 100.0, h);
                    assert_le!(current, previous);
                    previous = current;
                }
            }
        }
    };
}

mod fn_kernel;
mod kernel;
mod linear;
mod spiky_quadratic;
