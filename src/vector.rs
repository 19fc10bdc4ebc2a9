use std::{
    fmt::Debug,
    ops::{Add, Sub},
};

/// Scalar types composing the coordinates of a [`Vector`].
pub trait Scalar:
    Debug + Send + Sync + Copy + Default + PartialEq + PartialOrd + Add<Output = Self> + Sub<Output = Self>
{
    /// Infinity (∞).
    const INFINITY: Self;

    /// Negative infinity (-∞).
    const NEG_INFINITY: Self;

    /// Minimum between two scalars.
    fn min(self, rhs: Self) -> Self;

    /// Maximum between two scalars.
    fn max(self, rhs: Self) -> Self;

    /// Midpoint between two scalars.
    fn midpoint(self, rhs: Self) -> Self;
}

macro_rules! impl_scalar {
    ($s: ty) => {
        impl Scalar for $s {
            const INFINITY: Self = <$s>::INFINITY;

            const NEG_INFINITY: Self = <$s>::NEG_INFINITY;

            #[inline]
            fn min(self, rhs: Self) -> $s {
                self.min(rhs)
            }

            #[inline]
            fn max(self, rhs: Self) -> $s {
                self.max(rhs)
            }

            #[inline]
            fn midpoint(self, rhs: Self) -> $s {
                (self + rhs) / 2.0
            }
        }
    };
}

impl_scalar!(f32);
impl_scalar!(f64);

/// Three-dimensional vectors that can be converted from and into an array of their [`Scalar`].
///
/// Implemented for the 3D vectors of `glam` and `ultraviolet` as well as plain arrays.
pub trait Vector: Copy {
    /// Type of the coordinates of the vector.
    type Scalar: Scalar;

    /// Converts the vector into an array of its coordinates, `x` first.
    fn to_array(self) -> [Self::Scalar; 3];
}

macro_rules! impl_vector {
    ($s: ty, $($v: ty),*) => {
    $(
        impl Vector for $v {
            type Scalar = $s;

            #[inline]
            fn to_array(self) -> [$s; 3] {
                self.into()
            }
        }
    )*
    };
}

impl_vector!(f32, [f32; 3], glam::Vec3, glam::Vec3A, ultraviolet::Vec3);
impl_vector!(f64, [f64; 3], glam::DVec3, ultraviolet::DVec3);
