use rayon::prelude::*;

use crate::{point::Point, tree::KdTree, tree::RangeQuery};

impl<P> KdTree<P>
where
    P: Point + Sync,
    P::Vector: Send + Sync,
{
    /// Runs one box query per `(min, max)` pair on the rayon thread pool.
    ///
    /// The `i`-th returned vector holds the indices [`query`](KdTree::query) appends for the `i`-th box.
    ///
    /// ```
    /// # use kdrange::prelude::*;
    /// # use glam::Vec3;
    /// let tree: KdTree<Vec3> = (0..10).map(|i| Vec3::splat(i as f32)).collect();
    ///
    /// let results = tree.par_query_many(&[
    ///     (Vec3::splat(-1.0), Vec3::splat(1.0)),
    ///     (Vec3::splat(2.5), Vec3::splat(4.0)),
    /// ]);
    ///
    /// assert_eq!(results, [vec![0, 1], vec![3, 4]]);
    /// ```
    pub fn par_query_many(&self, boxes: &[(P::Vector, P::Vector)]) -> Vec<Vec<usize>> {
        boxes
            .par_iter()
            .map_init(RangeQuery::new, |query, &(min, max)| {
                let mut results = Vec::new();
                query.interval(self, min, max, &mut results);
                results
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use glam::DVec3;

    #[test]
    fn matches_sequential_queries() {
        let points: Vec<_> = (0..1000)
            .map(|i| DVec3::new((i % 10) as f64, (i / 10 % 10) as f64, (i / 100) as f64))
            .collect();
        let tree = KdTree::from_points(&points, TreeConfig::default().with_max_points_per_leaf(8));

        let boxes: Vec<_> = (0..20)
            .map(|i| {
                let min = DVec3::splat(i as f64 * 0.5 - 1.0);
                (min, min + DVec3::new(2.0, 3.0, 1.5))
            })
            .collect();

        let parallel = tree.par_query_many(&boxes);

        for (&(min, max), mut computed) in boxes.iter().zip(parallel) {
            let mut expected = Vec::new();
            tree.query(min, max, &mut expected);

            expected.sort_unstable();
            computed.sort_unstable();
            assert_eq!(computed, expected);
        }
    }
}
