//! Vertex position arithmetic.
//!
//! Smoothing only needs three operations on a position: an additive
//! identity to seed a sum, componentwise addition, and division by a
//! positive count. [`Position`] captures exactly that, and is implemented for
//! the nalgebra point and vector types in both precisions.

use nalgebra::{Point3, Vector3};

/// A 3D point or displacement that can be averaged.
///
/// All operations return new values; nothing is mutated.
pub trait Position: Copy {
    /// The additive identity.
    fn zero() -> Self;

    /// Componentwise sum.
    fn plus(&self, other: &Self) -> Self;

    /// Componentwise division by `divisor`.
    ///
    /// `divisor` must be strictly positive. Callers guarantee this; debug
    /// builds assert it.
    fn over(&self, divisor: f64) -> Self;
}

macro_rules! impl_position {
    ($scalar:ty) => {
        impl Position for Point3<$scalar> {
            #[inline]
            fn zero() -> Self {
                Point3::origin()
            }

            #[inline]
            fn plus(&self, other: &Self) -> Self {
                Point3::from(self.coords + other.coords)
            }

            #[inline]
            fn over(&self, divisor: f64) -> Self {
                debug_assert!(divisor > 0.0, "division by non-positive {}", divisor);
                Point3::from(self.coords / divisor as $scalar)
            }
        }

        impl Position for Vector3<$scalar> {
            #[inline]
            fn zero() -> Self {
                Vector3::zeros()
            }

            #[inline]
            fn plus(&self, other: &Self) -> Self {
                self + other
            }

            #[inline]
            fn over(&self, divisor: f64) -> Self {
                debug_assert!(divisor > 0.0, "division by non-positive {}", divisor);
                self / divisor as $scalar
            }
        }
    };
}

impl_position!(f64);
impl_position!(f32);
