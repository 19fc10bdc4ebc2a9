use super::{BoundingBox, KdTree, NodeId, Split, ROOT};
use crate::{
    point::{Point, ScalarOf},
    vector::Scalar,
};

impl<P> KdTree<P>
where
    P: Point,
{
    /// Resets the permutation and the node pool, then divides the root until every node is small enough.
    pub(super) fn build_nodes(&mut self) {
        let count = self.count;

        if self.permutation.len() < count {
            self.permutation.resize(count, 0);
        }
        for (i, index) in self.permutation[..count].iter_mut().enumerate() {
            *index = i;
        }

        self.pool.reset();
        let root = self.pool.acquire();
        debug_assert_eq!(root, ROOT);

        let bounds = BoundingBox::containing(&self.points[..count]);
        let node = &mut self.pool[root];
        node.bounds = bounds;
        node.start = 0;
        node.end = count;

        // Children are pushed positive first so that the negative side is divided first.
        let mut pending = Vec::new();
        if self.continue_split(root) {
            pending.push(root);
        }

        while let Some(id) = pending.pop() {
            let (negative, positive) = self.split_node(id);
            let one_sided = self.pool[negative].count() == 0 || self.pool[positive].count() == 0;

            if self.config.duplicate_guard && one_sided {
                continue;
            }

            if self.continue_split(positive) {
                pending.push(positive);
            }
            if self.continue_split(negative) {
                pending.push(negative);
            }
        }

        if log::log_enabled!(log::Level::Debug) {
            let stats = self.stats();
            log::debug!(
                "built tree over {} points: {} nodes, {} leaves, depth {}, largest leaf {}",
                count,
                stats.nodes,
                stats.leaves,
                stats.max_depth,
                stats.largest_leaf,
            );
        }
    }

    #[inline]
    fn continue_split(&self, id: NodeId) -> bool {
        self.pool[id].count() > self.config.max_points_per_leaf
    }

    /// Divides the node along its largest axis and returns its `(negative, positive)` children.
    fn split_node(&mut self, id: NodeId) -> (NodeId, NodeId) {
        let parent = self.pool[id];
        let axis = parent.bounds.largest_axis();

        let range = &mut self.permutation[parent.start..parent.end];
        let pivot = sliding_midpoint(
            &self.points,
            range,
            axis,
            parent.bounds.min[axis],
            parent.bounds.max[axis],
        );
        let middle = parent.start + partition(&self.points, range, axis, pivot);

        let mut negative_bounds = parent.bounds;
        negative_bounds.max[axis] = pivot;
        let negative = self.pool.acquire();
        let node = &mut self.pool[negative];
        node.bounds = negative_bounds;
        node.start = parent.start;
        node.end = middle;

        let mut positive_bounds = parent.bounds;
        positive_bounds.min[axis] = pivot;
        let positive = self.pool.acquire();
        let node = &mut self.pool[positive];
        node.bounds = positive_bounds;
        node.start = middle;
        node.end = parent.end;

        self.pool[id].split = Some(Split {
            axis,
            coordinate: pivot,
            negative,
            positive,
        });

        (negative, positive)
    }
}

/// Picks the coordinate dividing the points of `indices` along `axis` with the sliding midpoint rule.
///
/// The midpoint of `min..max` is used if points lie on both sides of it. Otherwise it slides to the
/// closest point: the largest coordinate if every point is below, the smallest if every point is on or above.
fn sliding_midpoint<P>(
    points: &[P],
    indices: &[usize],
    axis: usize,
    min: ScalarOf<P>,
    max: ScalarOf<P>,
) -> ScalarOf<P>
where
    P: Point,
{
    let midpoint = min.midpoint(max);
    let (mut negative, mut positive) = (false, false);

    for &i in indices {
        if points[i].axis_value(axis) < midpoint {
            negative = true;
        } else {
            positive = true;
        }

        if negative && positive {
            return midpoint;
        }
    }

    let values = indices.iter().map(|&i| points[i].axis_value(axis));
    if negative {
        values.fold(<ScalarOf<P> as Scalar>::NEG_INFINITY, Scalar::max)
    } else {
        values.fold(<ScalarOf<P> as Scalar>::INFINITY, Scalar::min)
    }
}

/// Reorders `indices` so that points with a coordinate below `pivot` along `axis` come first.
///
/// Returns the number of those points, which is where the second half starts.
fn partition<P>(points: &[P], indices: &mut [usize], axis: usize, pivot: ScalarOf<P>) -> usize
where
    P: Point,
{
    let value = |i: usize| points[i].axis_value(axis);

    // indices[..left] are below the pivot, indices[right..] are not.
    let (mut left, mut right) = (0, indices.len());
    loop {
        while left < right && value(indices[left]) < pivot {
            left += 1;
        }
        while left < right && value(indices[right - 1]) >= pivot {
            right -= 1;
        }

        if left + 1 < right {
            indices.swap(left, right - 1);
            left += 1;
            right -= 1;
        } else {
            return left;
        }
    }
}
