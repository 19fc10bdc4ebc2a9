/// Axis-aligned bounding box.
pub mod bbox;

/// Sliding midpoint construction of the tree.
mod build;

/// Node arena reused between builds.
mod pool;

/// Box queries over a built tree.
pub mod query;

/// Structural self-check of a built tree.
pub mod validate;

pub use bbox::*;
pub use pool::{Node, NodeId, Split};
pub use query::RangeQuery;
pub use validate::ValidationError;

use crate::{
    point::{Point, ScalarOf},
    vector::Vector,
};
use pool::NodePool;

/// Identifier of the root node of every built [`KdTree`].
pub const ROOT: NodeId = 0;

/// Parameters controlling how a [`KdTree`] divides its points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Largest number of points a leaf is allowed to hold before it is split.
    ///
    /// Smaller leaves give deeper trees and shorter scans at the bottom of a query. Values below `1` are treated as `1`.
    pub max_points_per_leaf: usize,

    /// Stops dividing a node when its split leaves one of the two children empty.
    ///
    /// This is what makes the build terminate when more than [`max_points_per_leaf`](TreeConfig::max_points_per_leaf)
    /// points share the same position. Turning it off makes leaves respect the size limit, but the build then divides
    /// forever as soon as all the points of a node share their coordinate along its largest axis, which includes
    /// any such set of duplicates.
    pub duplicate_guard: bool,
}

impl TreeConfig {
    /// Default number of points per leaf.
    pub const DEFAULT_MAX_POINTS_PER_LEAF: usize = 32;

    /// Returns the configuration with the given leaf size.
    #[inline]
    pub fn with_max_points_per_leaf(mut self, max_points_per_leaf: usize) -> Self {
        self.max_points_per_leaf = max_points_per_leaf;
        self
    }

    /// Returns the configuration with the duplicate guard turned on or off.
    #[inline]
    pub fn with_duplicate_guard(mut self, duplicate_guard: bool) -> Self {
        self.duplicate_guard = duplicate_guard;
        self
    }

    #[inline]
    fn clamped(mut self) -> Self {
        self.max_points_per_leaf = self.max_points_per_leaf.max(1);
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_points_per_leaf: Self::DEFAULT_MAX_POINTS_PER_LEAF,
            duplicate_guard: true,
        }
    }
}

/// Statistics about the shape of a built [`KdTree`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of nodes, leaves included.
    pub nodes: usize,
    /// Number of leaves.
    pub leaves: usize,
    /// Depth of the deepest node, the root being at depth `0`.
    pub max_depth: usize,
    /// Number of points in the most populated leaf.
    pub largest_leaf: usize,
}

/// Static k-d tree over points of type `P`, answering axis-aligned box queries.
///
/// The tree keeps its own copy of the points and never reorders it. Instead, it partitions a
/// [permutation](KdTree::permutation) of their indices so that every [`Node`] owns a contiguous range of it.
///
/// Points can be mutated in place with [`points_mut`](KdTree::points_mut), after which the tree must be
/// [rebuilt](KdTree::rebuild) before it is queried again.
///
/// The tree is not meant to be modified while it is queried: building takes `&mut self` and queries take `&self`.
///
/// ```
/// # use kdrange::prelude::*;
/// # use glam::Vec3;
/// let points = vec![Vec3::ZERO, Vec3::ONE, Vec3::splat(5.0)];
/// let tree = KdTree::from_points(&points, TreeConfig::default());
///
/// let mut inside = Vec::new();
/// tree.query(Vec3::splat(-1.0), Vec3::splat(2.0), &mut inside);
/// inside.sort();
///
/// assert_eq!(inside, [0, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct KdTree<P>
where
    P: Point,
{
    points: Vec<P>,
    permutation: Vec<usize>,
    count: usize,
    pool: NodePool<ScalarOf<P>>,
    config: TreeConfig,
}

impl<P> KdTree<P>
where
    P: Point,
{
    /// Creates a new empty [`KdTree`] with the default [`TreeConfig`].
    #[inline]
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates a new empty [`KdTree`] with the given [`TreeConfig`].
    pub fn with_config(config: TreeConfig) -> Self {
        let mut tree = Self {
            points: Vec::new(),
            permutation: Vec::new(),
            count: 0,
            pool: NodePool::default(),
            config: config.clamped(),
        };
        tree.build_nodes();
        tree
    }

    /// Creates a [`KdTree`] holding a copy of the given points and builds it.
    pub fn from_points(points: &[P], config: TreeConfig) -> Self
    where
        P: Clone,
    {
        let mut tree = Self::with_config(config);
        tree.build(points, None);
        tree
    }

    /// Replaces the stored points with a copy of the given ones and rebuilds the tree.
    ///
    /// If given, `max_points_per_leaf` replaces the configured value for this build and the following ones.
    pub fn build(&mut self, points: &[P], max_points_per_leaf: Option<usize>)
    where
        P: Clone,
    {
        self.points.clear();
        self.points.extend_from_slice(points);
        self.count = points.len();
        self.rebuild(max_points_per_leaf);
    }

    /// Replaces the stored points with the iterated ones and rebuilds the tree.
    ///
    /// See [`build`](KdTree::build).
    pub fn build_iter<I>(&mut self, points: I, max_points_per_leaf: Option<usize>)
    where
        I: IntoIterator<Item = P>,
    {
        self.points.clear();
        self.points.extend(points);
        self.count = self.points.len();
        self.rebuild(max_points_per_leaf);
    }

    /// Rebuilds the tree over the points currently stored.
    ///
    /// Used after mutating points with [`points_mut`](KdTree::points_mut) or changing the count with
    /// [`set_count`](KdTree::set_count). Rebuilding unchanged points gives the exact same tree.
    pub fn rebuild(&mut self, max_points_per_leaf: Option<usize>) {
        if let Some(max_points_per_leaf) = max_points_per_leaf {
            self.config = self.config.with_max_points_per_leaf(max_points_per_leaf).clamped();
        }

        self.build_nodes();
    }

    /// Sets the number of stored points, growing the backing storage with default points if it is too small.
    ///
    /// Storage is never shrunk, a smaller count only hides the trailing points. The tree is not rebuilt,
    /// but queries never report a hidden point.
    pub fn set_count(&mut self, count: usize)
    where
        P: Default,
    {
        if self.points.len() < count {
            self.points.resize_with(count, P::default);
        }

        if self.permutation.len() < count {
            self.permutation.resize(count, 0);
        }

        self.count = count;
    }

    /// Number of points in the tree.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns true if the tree holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The stored points, in the order they were given.
    #[inline]
    pub fn points(&self) -> &[P] {
        &self.points[..self.count]
    }

    /// Mutable access to the stored points.
    ///
    /// The tree is not updated: call [`rebuild`](KdTree::rebuild) once the positions are changed.
    #[inline]
    pub fn points_mut(&mut self) -> &mut [P] {
        &mut self.points[..self.count]
    }

    /// Indices of the stored points, partitioned so that every [`Node`] owns the range `start..end` of it.
    #[inline]
    pub fn permutation(&self) -> &[usize] {
        &self.permutation[..self.count]
    }

    /// The current [`TreeConfig`].
    #[inline]
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Largest number of points a leaf holds, unless a one-sided division stopped the split above it.
    #[inline]
    pub fn max_points_per_leaf(&self) -> usize {
        self.config.max_points_per_leaf
    }

    /// The root [`Node`], covering every point.
    #[inline]
    pub fn root(&self) -> &Node<ScalarOf<P>> {
        &self.pool[ROOT]
    }

    /// The [`Node`] with the given identifier.
    ///
    /// Panics if the identifier does not belong to the current build.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<ScalarOf<P>> {
        &self.pool[id]
    }

    /// Every [`Node`] of the current build, indexed by [`NodeId`].
    #[inline]
    pub fn nodes(&self) -> &[Node<ScalarOf<P>>] {
        self.pool.as_slice()
    }

    /// Stored point at the given original index, hidden points included.
    #[inline]
    pub(crate) fn stored_position(&self, index: usize) -> [ScalarOf<P>; 3] {
        self.points[index].position().to_array()
    }

    /// Appends to `results` the index of every point lying inside the box from `min` to `max`, bounds included.
    ///
    /// `results` is not cleared, so repeated calls accumulate. A box with `min` above `max` on any
    /// axis is empty and yields nothing.
    ///
    /// Use a [`RangeQuery`] to avoid allocating a traversal stack on every call.
    #[inline]
    pub fn query(&self, min: P::Vector, max: P::Vector, results: &mut Vec<usize>) {
        RangeQuery::new().interval(self, min, max, results);
    }

    /// Calls `f` with the index of every point lying inside the box from `min` to `max`, bounds included.
    #[inline]
    pub fn for_each_in_box<F>(&self, min: P::Vector, max: P::Vector, f: F)
    where
        F: FnMut(usize),
    {
        RangeQuery::new().for_each(self, min, max, f);
    }

    /// Computes [`TreeStats`] for the current build.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            nodes: self.pool.len(),
            ..Default::default()
        };

        let mut pending = vec![(ROOT, 0)];
        while let Some((id, depth)) = pending.pop() {
            let node = &self.pool[id];
            stats.max_depth = stats.max_depth.max(depth);

            match node.split {
                Some(split) => {
                    pending.push((split.positive, depth + 1));
                    pending.push((split.negative, depth + 1));
                }
                None => {
                    stats.leaves += 1;
                    stats.largest_leaf = stats.largest_leaf.max(node.count());
                }
            }
        }

        stats
    }
}

impl<P> Default for KdTree<P>
where
    P: Point,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FromIterator<P> for KdTree<P>
where
    P: Point,
{
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.build_iter(iter, None);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn new_tree_is_empty() {
        let tree = KdTree::<Vec3>::new();

        assert_eq!(tree.count(), 0);
        assert!(tree.points().is_empty());
        assert!(tree.permutation().is_empty());
        assert_eq!(tree.root().count(), 0);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.max_points_per_leaf(), 32);
    }

    #[test]
    fn leaf_size_is_clamped() {
        let mut tree = KdTree::<Vec3>::with_config(TreeConfig::default().with_max_points_per_leaf(0));
        assert_eq!(tree.max_points_per_leaf(), 1);

        tree.build(&[Vec3::ZERO, Vec3::ONE, Vec3::X], Some(0));
        assert_eq!(tree.max_points_per_leaf(), 1);
        assert!(tree.nodes().iter().filter(|n| n.is_leaf()).all(|n| n.count() <= 1));
    }

    #[test]
    fn leaf_size_override_is_kept() {
        let mut tree = KdTree::<Vec3>::new();
        tree.build(&[Vec3::ZERO; 3], Some(4));
        tree.rebuild(None);

        assert_eq!(tree.max_points_per_leaf(), 4);
    }

    #[test]
    fn set_count_only_grows_storage() {
        let mut tree = KdTree::<Vec3>::new();
        tree.set_count(10);
        assert_eq!(tree.count(), 10);
        assert_eq!(tree.points().len(), 10);

        tree.points_mut()[3] = Vec3::ONE;
        tree.set_count(4);
        assert_eq!(tree.points().len(), 4);
        assert_eq!(tree.points.len(), 10);

        tree.set_count(10);
        assert_eq!(tree.points()[3], Vec3::ONE);
    }

    #[test]
    fn shrunk_count_hides_points_from_queries() {
        let points: Vec<_> = (0..64).map(|i| Vec3::splat(i as f32)).collect();
        let mut tree = KdTree::from_points(&points, TreeConfig::default().with_max_points_per_leaf(4));
        tree.set_count(10);

        let mut results = Vec::new();
        tree.query(Vec3::ZERO, Vec3::splat(63.0), &mut results);
        results.sort();
        assert_eq!(results, (0..10).collect::<Vec<_>>());

        results.clear();
        tree.query(Vec3::splat(2.5), Vec3::splat(40.0), &mut results);
        results.sort();
        assert_eq!(results, (3..10).collect::<Vec<_>>());
        assert!(results.iter().all(|&i| tree.points()[i].x >= 2.5));
    }

    #[test]
    fn set_count_then_rebuild() {
        let mut tree = KdTree::<Vec3>::new();
        tree.set_count(3);
        tree
            .points_mut()
            .copy_from_slice(&[Vec3::ZERO, Vec3::splat(2.0), Vec3::splat(4.0)]);
        tree.rebuild(None);

        let mut results = Vec::new();
        tree.query(Vec3::splat(1.0), Vec3::splat(5.0), &mut results);
        results.sort();

        assert_eq!(tree.root().count(), 3);
        assert_eq!(results, [1, 2]);
    }

    #[test]
    fn collects_from_iterator() {
        let tree: KdTree<(Vec3, &str)> = [(Vec3::ZERO, "a"), (Vec3::ONE, "b")].into_iter().collect();

        assert_eq!(tree.count(), 2);
        assert_eq!(tree.points()[1].1, "b");
    }

    #[test]
    fn stats_of_split_tree() {
        let points: Vec<_> = (0..8).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let tree = KdTree::from_points(&points, TreeConfig::default().with_max_points_per_leaf(2));
        let stats = tree.stats();

        assert_eq!(stats.nodes, 7);
        assert_eq!(stats.leaves, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.largest_leaf, 2);
    }
}
