use super::{BoundingBox, KdTree, NodeId, ROOT};
use crate::{point::Point, vector::Vector};

/// Reusable state for box queries on a [`KdTree`].
///
/// Keeps the traversal stack between queries so that running many of them does not allocate.
///
/// ```
/// # use kdrange::prelude::*;
/// # use glam::Vec3;
/// let tree: KdTree<Vec3> = (0..100).map(|i| Vec3::splat(i as f32)).collect();
///
/// let mut query = RangeQuery::new();
/// let mut results = Vec::new();
/// for i in 0..10 {
///     let corner = Vec3::splat(10.0 * i as f32);
///     query.interval(&tree, corner, corner + Vec3::splat(4.5), &mut results);
/// }
///
/// assert_eq!(results.len(), 50);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RangeQuery {
    stack: Vec<NodeId>,
}

impl RangeQuery {
    /// Creates a new [`RangeQuery`].
    #[inline]
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Appends to `results` the index of every point of the tree lying inside the box from `min` to
    /// `max`, bounds included.
    ///
    /// `results` is not cleared, so repeated calls accumulate. A box with `min` above `max` on any
    /// axis is empty and yields nothing.
    #[inline]
    pub fn interval<P>(
        &mut self,
        tree: &KdTree<P>,
        min: P::Vector,
        max: P::Vector,
        results: &mut Vec<usize>,
    ) where
        P: Point,
    {
        self.for_each(tree, min, max, |index| results.push(index));
    }

    /// Calls `f` with the index of every point of the tree lying inside the box from `min` to `max`, bounds included.
    ///
    /// Only indices below [`count`](KdTree::count) are reported.
    pub fn for_each<P, F>(&mut self, tree: &KdTree<P>, min: P::Vector, max: P::Vector, mut f: F)
    where
        P: Point,
        F: FnMut(usize),
    {
        let query = BoundingBox::new(min.to_array(), max.to_array());
        if tree.is_empty() || !query.is_valid() || !tree.root().bounds.intersects(&query) {
            return;
        }

        let count = tree.count();
        self.stack.clear();
        self.stack.push(ROOT);

        while let Some(id) = self.stack.pop() {
            let node = tree.node(id);

            if let Some(split) = node.split {
                for child in [split.positive, split.negative] {
                    let child_node = tree.node(child);
                    if child_node.count() != 0 && child_node.bounds.intersects(&query) {
                        self.stack.push(child);
                    }
                }
                continue;
            }

            // Indices past the count are left over from a shrink since the last rebuild.
            let indices = tree.permutation[node.start..node.end]
                .iter()
                .copied()
                .filter(|&index| index < count);
            if query.contains_box(&node.bounds) {
                indices.for_each(&mut f);
            } else {
                for index in indices {
                    if query.contains(tree.stored_position(index)) {
                        f(index);
                    }
                }
            }
        }
    }
}
