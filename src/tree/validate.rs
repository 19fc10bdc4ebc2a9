use super::{KdTree, NodeId, ROOT};
use crate::{point::Point, vector::Vector};
use thiserror::Error;

/// Structural defect found by [`KdTree::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The root does not cover the whole permutation.
    #[error("root covers {start}..{end} instead of 0..{count}")]
    RootRange {
        /// Start of the root's range.
        start: usize,
        /// End of the root's range.
        end: usize,
        /// Number of points in the tree.
        count: usize,
    },

    /// A node's range is reversed or runs past the permutation.
    #[error("node {node} has range {start}..{end} outside of 0..{count}")]
    Range {
        /// The faulty node.
        node: NodeId,
        /// Start of its range.
        start: usize,
        /// End of its range.
        end: usize,
        /// Number of points in the tree.
        count: usize,
    },

    /// A node's children do not exactly tile its range.
    #[error("children of node {node} do not tile its range")]
    ChildRanges {
        /// The faulty node.
        node: NodeId,
    },

    /// A child refers to a node that was not allocated by the current build.
    #[error("node {node} refers to missing child {child}")]
    MissingChild {
        /// The faulty node.
        node: NodeId,
        /// The missing child.
        child: NodeId,
    },

    /// The permutation is not a bijection of `0..count`.
    #[error("permutation entry {index} is out of range or repeated")]
    Permutation {
        /// The faulty entry of the permutation.
        index: usize,
    },

    /// A point lies outside the bounds of a node owning it.
    #[error("point {point} lies outside the bounds of node {node}")]
    OutOfBounds {
        /// The faulty node.
        node: NodeId,
        /// Original index of the point.
        point: usize,
    },

    /// The leaves do not hold every point exactly once.
    #[error("leaves hold {found} points instead of {count}")]
    LeafCount {
        /// Sum of the point counts of every leaf.
        found: usize,
        /// Number of points in the tree.
        count: usize,
    },
}

impl<P> KdTree<P>
where
    P: Point,
{
    /// Checks the structure of the tree against its stored points.
    ///
    /// Verifies that the permutation is a bijection, that every node's range lies inside its parent's and is
    /// tiled by its children, that the leaves hold every point exactly once and that every point lies inside the
    /// bounds of every node owning it. Points mutated since the last build are likely to fail the last check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let count = self.count;

        let root = self.root();
        if root.start != 0 || root.end != count {
            return Err(ValidationError::RootRange {
                start: root.start,
                end: root.end,
                count,
            });
        }

        let mut seen = vec![false; count];
        for (index, &point) in self.permutation().iter().enumerate() {
            match seen.get_mut(point) {
                Some(seen) if !*seen => *seen = true,
                _ => return Err(ValidationError::Permutation { index }),
            }
        }

        let nodes = self.nodes();
        let mut leaf_points = 0;
        let mut pending = vec![ROOT];

        while let Some(id) = pending.pop() {
            let node = &nodes[id as usize];
            if node.start > node.end || node.end > count {
                return Err(ValidationError::Range {
                    node: id,
                    start: node.start,
                    end: node.end,
                    count,
                });
            }

            for &point in &self.permutation[node.start..node.end] {
                if !node.bounds.contains(self.points[point].position().to_array()) {
                    return Err(ValidationError::OutOfBounds { node: id, point });
                }
            }

            let Some(split) = node.split else {
                leaf_points += node.count();
                continue;
            };

            for child in [split.negative, split.positive] {
                if child as usize >= nodes.len() || child == id {
                    return Err(ValidationError::MissingChild { node: id, child });
                }
            }

            let (negative, positive) = (&nodes[split.negative as usize], &nodes[split.positive as usize]);
            if negative.start != node.start || negative.end != positive.start || positive.end != node.end {
                return Err(ValidationError::ChildRanges { node: id });
            }

            pending.push(split.positive);
            pending.push(split.negative);
        }

        if leaf_points != count {
            return Err(ValidationError::LeafCount {
                found: leaf_points,
                count,
            });
        }

        Ok(())
    }
}
