//! A fixed-bounds quadtree for nearest and k-nearest point queries.
//!
//! The tree covers bounds declared up front and splits a cell into four quadrants
//! once it holds more than `cell_capacity` items. Queries walk the tree with
//! branch-and-bound pruning on squared distances, so the closest items are found
//! exactly without scanning every point.
//!
//! ```
//! use nalgebra::point;
//! use nn_quadtree::{Entry, QuadTree};
//!
//! let mut qt = QuadTree::<_, i32>::from_extents(0, 100, 0, 100, 4).unwrap();
//! qt.insert(Entry::new(point![10, 10], "a"));
//! qt.insert(Entry::new(point![50, 50], "b"));
//!
//! // i32 trees measure squared distances in i64
//! let found = qt.closest_point(&point![51, 51], 10_000).unwrap();
//! assert_eq!(*found.item.value(), "b");
//! assert_eq!(found.distance_sq, 2);
//! ```

use nalgebra::{Point2, Scalar};

mod config;
mod coordinate;
mod error;
mod neighbors;
mod quadtree;
mod rect;
mod util;

pub use config::QuadTreeConfig;
pub use coordinate::Coordinate;
pub use error::{Axis, Error, Result};
pub use neighbors::Neighbor;
pub use quadtree::{Iter, QuadTree, TreeStats};
pub use rect::Rect;

/// Trait for getting a 2d point position of data stored in the [`QuadTree`]
pub trait Point<T: Scalar> {
    /// Get 2d point position
    fn point(&self) -> Point2<T>;
}

impl<T: Scalar + Copy> Point<T> for Point2<T> {
    fn point(&self) -> Point2<T> {
        *self
    }
}

/// A position paired with a caller supplied payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<T: Scalar, V> {
    position: Point2<T>,
    value: V,
}

impl<T: Scalar, V> Entry<T, V> {
    /// Pair `value` with the position it is stored at
    pub fn new(position: Point2<T>, value: V) -> Self {
        Self { position, value }
    }

    /// Get the payload
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consume the entry, returning its payload
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<T: Scalar + Copy, V> Point<T> for Entry<T, V> {
    fn point(&self) -> Point2<T> {
        self.position
    }
}
