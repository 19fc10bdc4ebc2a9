//! # kdrange
//!
//! kdrange is a crate providing a static [k-d tree](https://en.wikipedia.org/wiki/K-d_tree) over 3D points
//! to quickly find which of them fall inside an axis-aligned box.
//!
//! ## Goals
//!
//! The main goal of this crate is to answer "which of these points are inside this region" fast enough
//! that a caller can bulk-edit only the points that intersect it, e.g. removing the instances scattered
//! on a terrain that fall inside a masking volume.
//! Thus it does not include nearest-neighbour searches or incremental insertion and instead only
//! focuses on building the tree from a set of points and running box queries on it.
//!
//! The tree is built with the sliding midpoint rule: every node is divided in two along its largest
//! axis, at its middle, unless all of its points are on one side of it, in which case the plane slides
//! to the closest point. Nodes stop being divided once they hold few enough points, or when a division
//! leaves one side empty, as happens with duplicate positions.
//!
//! Enable the "parallel" feature to run batches of queries on the [rayon](https://github.com/rayon-rs/rayon) thread pool.
//!
//! # Using kdrange
//!
//! ## Implementing the [`Point`](point::Point) trait
//!
//! #### Deriving:
//!
//! Used in most cases, when the type has a field named `position`:
//!
//! ```
//! # use kdrange::prelude::*;
//! # use glam::Vec3;
//! #
//! #[derive(Point, Clone)]
//! struct Instance {
//!     position: Vec3,
//!     prototype: u32,
//! //  ...
//! }
//! ```
//! #### Manual implementation:
//!
//! Used when the type cannot directly provide a [position](Point::position).
//!
//! ```
//! # use kdrange::prelude::*;
//! # use glam::DVec3;
//! #
//! #[derive(Clone)]
//! struct Instance {
//!     normalized: DVec3,
//!     terrain_size: DVec3,
//! //  ...
//! }
//!
//! impl Point for Instance {
//!     type Vector = DVec3;
//!
//!     fn position(&self) -> DVec3 {
//!         self.normalized * self.terrain_size
//!     }
//! }
//! ```
//!
//! Vectors of [`glam`](https://github.com/bitshifter/glam-rs) and [`ultraviolet`](https://github.com/fu5ha/ultraviolet),
//! arrays of three floats and tuples of a vector and any other value implement [`Point`](point::Point) as well.
//!
//! ## Building the tree
//!
//! Create a [`KdTree`](tree::KdTree) from a slice of points. The tree keeps its own copy of them.
//!
//! ```
//! # use kdrange::prelude::*;
//! # use glam::Vec3;
//! # #[derive(Point, Clone)]
//! # struct Instance {
//! #     position: Vec3,
//! #     prototype: u32,
//! # }
//! let instances: Vec<_> = (0..1000)
//!     .map(|i| Instance {
//!         position: Vec3::new((i % 10) as f32, (i / 10 % 10) as f32, (i / 100) as f32),
//!         prototype: i % 3,
//!     })
//!     .collect();
//!
//! let tree = KdTree::from_points(&instances, TreeConfig::default());
//! ```
//!
//! ## Querying a box
//!
//! Finally, use the [`query`](tree::KdTree::query) method of [`KdTree`](tree::KdTree).
//! It appends the index of every point inside the box, bounds included, to the given vector.
//!
//! ```
//! # use kdrange::prelude::*;
//! # use glam::Vec3;
//! # let points: Vec<_> = (0..1000)
//! #     .map(|i| Vec3::new((i % 10) as f32, (i / 10 % 10) as f32, (i / 100) as f32))
//! #     .collect();
//! # let tree = KdTree::from_points(&points, TreeConfig::default());
//! let mut inside = Vec::new();
//! tree.query(Vec3::ZERO, Vec3::splat(1.0), &mut inside);
//!
//! assert_eq!(inside.len(), 8);
//! for index in inside {
//!     assert!(tree.points()[index].cmple(Vec3::ONE).all());
//! }
//! ```

#![warn(missing_docs)]

extern crate self as kdrange;

/// Trait to implement on types stored in a tree.
pub mod point;

/// The k-d tree, its nodes and its queries.
pub mod tree;

/// Scalars and vectors positions are made of.
pub mod vector;

/// Batched queries using multiple CPU threads.
#[cfg(feature = "parallel")]
mod parallel;

/// Derive macro for types with a position.
pub mod kdrange_derive {
    pub use kdrange_derive::Point;
}

pub use point::Point;
pub use tree::{KdTree, RangeQuery, TreeConfig};

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::kdrange_derive::*;
    pub use crate::point::Point;
    pub use crate::tree::{KdTree, RangeQuery, TreeConfig};
}
