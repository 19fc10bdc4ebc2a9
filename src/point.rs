use crate::vector::Vector;

/// Scalar type of the coordinates of a [`Point`].
pub type ScalarOf<P> = <<P as Point>::Vector as Vector>::Scalar;

/// Trait to describe anything that has a position in 3D space and can be stored in a [`KdTree`](crate::KdTree).
///
/// The tree only ever asks for the [position](Point::position) of a point and for one of its
/// coordinates by [axis](Point::axis_value), so the rest of the type is free to carry any payload.
///
/// #### Deriving:
///
/// Used when the type has a field named `position`:
///
/// ```
/// # use kdrange::prelude::*;
/// # use glam::Vec3;
/// #
/// #[derive(Point, Clone)]
/// struct Instance {
///     position: Vec3,
///     prototype: u32,
/// //  ...
/// }
/// ```
/// #### Manual implementation:
///
/// Used when the position has to be computed or stored in another form.
///
/// ```
/// # use kdrange::prelude::*;
/// # use glam::Vec3;
/// #
/// struct Instance {
///     normalized: Vec3,
///     size: Vec3,
/// //  ...
/// }
///
/// impl Point for Instance {
///     type Vector = Vec3;
///
///     fn position(&self) -> Vec3 {
///         self.normalized * self.size
///     }
/// }
/// ```
///
/// Vectors are points themselves, and a tuple of a vector and any payload is a point located at the vector.
///
/// ```
/// # use kdrange::prelude::*;
/// # use glam::Vec3;
/// let tagged = (Vec3::ONE, "tree");
///
/// assert_eq!(tagged.position(), Vec3::ONE);
/// assert_eq!(tagged.axis_value(2), 1.0);
/// ```
pub trait Point {
    /// Type of the [position](Point::position).
    type Vector: Vector;

    /// The position of the point in space.
    fn position(&self) -> Self::Vector;

    /// The coordinate of the position along the given axis, `0`, `1` or `2` for `x`, `y` or `z`.
    ///
    /// Panics if the axis is greater than `2`.
    #[inline]
    fn axis_value(&self, axis: usize) -> ScalarOf<Self> {
        self.position().to_array()[axis]
    }
}

macro_rules! impl_point_for_vector {
    ($($v: ty),*) => {
    $(
        impl Point for $v {
            type Vector = $v;

            #[inline]
            fn position(&self) -> $v {
                *self
            }
        }
    )*
    };
}

impl_point_for_vector!(
    [f32; 3],
    [f64; 3],
    glam::Vec3,
    glam::Vec3A,
    glam::DVec3,
    ultraviolet::Vec3,
    ultraviolet::DVec3
);

impl<V, T> Point for (V, T)
where
    V: Vector,
{
    type Vector = V;

    #[inline]
    fn position(&self) -> V {
        self.0
    }
}

impl<P> Point for &P
where
    P: Point,
{
    type Vector = P::Vector;

    #[inline]
    fn position(&self) -> Self::Vector {
        (**self).position()
    }

    #[inline]
    fn axis_value(&self, axis: usize) -> ScalarOf<Self> {
        (**self).axis_value(axis)
    }
}
