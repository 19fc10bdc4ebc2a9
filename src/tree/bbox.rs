use crate::{
    point::Point,
    vector::{Scalar, Vector},
};

/// An axis-aligned bounding box using arrays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<S> {
    /// Minimum corner of the box.
    pub min: [S; 3],
    /// Maximum corner of the box.
    pub max: [S; 3],
}

#[allow(clippy::needless_range_loop)]
impl<S> BoundingBox<S>
where
    S: Scalar,
{
    /// Creates a new [`BoundingBox`] with the given min and max values.
    #[inline]
    pub fn new(min: [S; 3], max: [S; 3]) -> Self {
        Self { min, max }
    }

    /// The empty [`BoundingBox`], with `min` at +∞ and `max` at -∞ on every axis.
    ///
    /// Nothing is inside it and it intersects nothing.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: [S::INFINITY; 3],
            max: [S::NEG_INFINITY; 3],
        }
    }

    /// Creates the tightest [`BoundingBox`] that contains the given points.
    ///
    /// Returns [`BoundingBox::empty`] if there are no points.
    #[inline]
    pub fn containing<'a, P>(points: impl IntoIterator<Item = &'a P>) -> Self
    where
        P: Point + 'a,
        P::Vector: Vector<Scalar = S>,
    {
        let mut result = Self::empty();
        for point in points {
            result.extend(point.position().to_array());
        }
        result
    }

    /// Extends the [`BoundingBox`] so that it contains the given position.
    #[inline]
    pub fn extend(&mut self, position: [S; 3]) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(position[i]);
            self.max[i] = self.max[i].max(position[i]);
        }
    }

    /// Returns true if the box has `min <= max` on every axis.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..3).all(|i| self.min[i] <= self.max[i])
    }

    /// Size of the [`BoundingBox`].
    #[inline]
    pub fn size(&self) -> [S; 3] {
        let mut r = [S::default(); 3];
        for i in 0..3 {
            r[i] = self.max[i] - self.min[i]
        }
        r
    }

    /// Axis along which the box is the largest.
    ///
    /// Ties go to the lowest axis index.
    #[inline]
    pub fn largest_axis(&self) -> usize {
        let size = self.size();
        let mut axis = 0;
        for i in 1..3 {
            if size[axis] < size[i] {
                axis = i;
            }
        }
        axis
    }

    /// Returns true if the position lies inside the box, bounds included.
    #[inline]
    pub fn contains(&self, position: [S; 3]) -> bool {
        (0..3).all(|i| position[i] >= self.min[i] && position[i] <= self.max[i])
    }

    /// Returns true if the other box lies entirely inside this one, bounds included.
    #[inline]
    pub fn contains_box(&self, other: &Self) -> bool {
        (0..3).all(|i| other.min[i] >= self.min[i] && other.max[i] <= self.max[i])
    }

    /// Returns true if both boxes overlap, sharing a face or an edge included.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        (0..3).all(|i| self.max[i] >= other.min[i] && self.min[i] <= other.max[i])
    }
}

impl<S> Default for BoundingBox<S>
where
    S: Scalar,
{
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}
