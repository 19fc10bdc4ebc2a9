use super::bbox::BoundingBox;
use crate::vector::Scalar;

/// Index of a [`Node`] in a [`KdTree`](crate::KdTree).
pub type NodeId = u32;

/// Division of a [`Node`] in two halves along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split<S> {
    /// Axis the node is divided along, `0`, `1` or `2`.
    pub axis: usize,
    /// Coordinate of the dividing plane on that axis.
    ///
    /// Points strictly below it went to the negative child, the others to the positive child.
    pub coordinate: S,
    /// Child holding the points below the plane.
    pub negative: NodeId,
    /// Child holding the points on or above the plane.
    pub positive: NodeId,
}

/// Node of a [`KdTree`](crate::KdTree).
///
/// A node owns the range `start..end` of the tree's [permutation](crate::KdTree::permutation).
/// It is a leaf if it has no [`Split`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node<S> {
    /// Bounds of the region of space covered by the node.
    pub bounds: BoundingBox<S>,
    /// First index of the node's range in the permutation.
    pub start: usize,
    /// One past the last index of the node's range in the permutation.
    pub end: usize,
    /// How the node is divided between its children, `None` for a leaf.
    pub split: Option<Split<S>>,
}

impl<S> Node<S>
where
    S: Scalar,
{
    #[inline]
    fn unsplit() -> Self {
        Self {
            bounds: BoundingBox::empty(),
            start: 0,
            end: 0,
            split: None,
        }
    }

    /// Number of points in the node's range.
    #[inline]
    pub fn count(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }
}

const INITIAL_CAPACITY: usize = 16;

/// Arena of [`Nodes`](Node) reused from one build to the next.
///
/// [`reset`](NodePool::reset) only forgets the nodes, the backing storage is kept and grows by doubling.
#[derive(Clone, Debug)]
pub(crate) struct NodePool<S> {
    nodes: Vec<Node<S>>,
    len: usize,
}

impl<S> Default for NodePool<S> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            len: 0,
        }
    }
}

impl<S> NodePool<S>
where
    S: Scalar,
{
    /// Returns the next free node, cleared to an unsplit node with an empty range.
    pub fn acquire(&mut self) -> NodeId {
        let id = self.len;

        if id < self.nodes.len() {
            self.nodes[id] = Node::unsplit();
        } else {
            if self.nodes.len() == self.nodes.capacity() {
                let additional = self.nodes.capacity().max(INITIAL_CAPACITY);
                self.nodes.reserve_exact(additional);
                log::trace!("node pool grown to {} nodes", self.nodes.capacity());
            }
            self.nodes.push(Node::unsplit());
        }

        self.len += 1;
        id as NodeId
    }

    /// Makes every acquired node available again.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Nodes acquired since the last [`reset`](NodePool::reset).
    #[inline]
    pub fn as_slice(&self) -> &[Node<S>] {
        &self.nodes[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }
}

impl<S> std::ops::Index<NodeId> for NodePool<S> {
    type Output = Node<S>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<S> {
        &self.nodes[..self.len][id as usize]
    }
}

impl<S> std::ops::IndexMut<NodeId> for NodePool<S> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[..self.len][id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquired_nodes_are_unsplit() {
        let mut pool = NodePool::<f32>::default();
        let id = pool.acquire();
        pool[id].split = Some(Split {
            axis: 1,
            coordinate: 0.5,
            negative: 1,
            positive: 2,
        });
        pool[id].end = 4;

        pool.reset();
        let reused = pool.acquire();

        assert_eq!(reused, id);
        assert!(pool[reused].is_leaf());
        assert_eq!(pool[reused].count(), 0);
    }

    #[test]
    fn reset_keeps_storage() {
        let mut pool = NodePool::<f64>::default();
        for _ in 0..100 {
            pool.acquire();
        }
        let capacity = pool.capacity();

        pool.reset();
        assert_eq!(pool.len(), 0);
        assert!(pool.as_slice().is_empty());

        for _ in 0..100 {
            pool.acquire();
        }
        assert_eq!(pool.capacity(), capacity);
    }

    #[test]
    fn storage_grows_by_doubling() {
        let mut pool = NodePool::<f32>::default();
        for _ in 0..=INITIAL_CAPACITY {
            pool.acquire();
        }

        assert!(pool.capacity() >= 2 * INITIAL_CAPACITY);
    }
}
