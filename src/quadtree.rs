use std::mem;

use nalgebra::{point, Point2, Vector2};
use tracing::{debug, trace};

use crate::{
    neighbors::{Collector, KNearest, Nearest, Neighbor},
    util::{determine_quadrant, squared_distance},
    Coordinate, Point, QuadTreeConfig, Rect, Result,
};

/// A fixed-bounds QuadTree for nearest-neighbor queries over 2d points.
///
/// Items are anything implementing [`Point`]: plain [`Point2`] positions, or
/// [`Entry`](crate::Entry) values carrying a payload.
///
/// Items outside the declared bounds are accepted silently and land in whichever
/// boundary quadrant matches their side of each splitting line. Queries still
/// find them, but those boundary leaves never had room to split for them, so
/// clustering data outside the bounds degrades towards a linear scan. The
/// subdivision floor and depth limit are likewise measured against the declared
/// bounds, not the data.
#[derive(Clone, Debug)]
pub struct QuadTree<I, T: Coordinate> {
    root: Node<I, T>,
    boundary: Rect<T>,
    config: QuadTreeConfig<T>,
    len: usize,
}

impl<I: Point<T>, T: Coordinate> QuadTree<I, T> {
    /// Create a new empty quadtree
    ///
    /// ## Arguments
    /// - `boundary`: The boundary of the quadtree
    /// - `cell_capacity`: The maximum number of items a node can hold before subdividing
    pub fn new(boundary: Rect<T>, cell_capacity: usize) -> Result<Self> {
        Self::with_config(boundary, QuadTreeConfig::new(cell_capacity))
    }

    /// Create a new empty quadtree from its extents along each axis
    pub fn from_extents(
        min_x: T,
        max_x: T,
        min_y: T,
        max_y: T,
        cell_capacity: usize,
    ) -> Result<Self> {
        Self::new(
            Rect::from_extents(min_x, max_x, min_y, max_y)?,
            cell_capacity,
        )
    }

    /// Create a new empty quadtree with explicit tuning parameters
    pub fn with_config(boundary: Rect<T>, config: QuadTreeConfig<T>) -> Result<Self> {
        boundary.validate()?;
        config.validate()?;
        debug!(?boundary, ?config, "creating quadtree");

        Ok(Self {
            root: Node::leaf(boundary.center(), boundary.half_extent(), 0),
            boundary,
            config,
            len: 0,
        })
    }

    /// Insert an item into the quadtree, subdividing cells as required
    pub fn insert(&mut self, item: I) {
        let point = item.point();
        if !self.boundary.contains(&point) {
            debug!(?point, "inserting point outside quadtree bounds");
        }
        self.root.insert(item, &self.config);
        self.len += 1;
    }

    /// Find the item closest to `query`
    ///
    /// Only items strictly closer than `max_distance_sq` are considered, so the
    /// bound doubles as a search radius. It is given in [`Coordinate::Distance`],
    /// which is wider than `T` for integer trees (`i64` for `i32`).
    /// **Returns** `None` if no such item exists.
    /// Among items at the same distance the first one reached by the traversal wins.
    pub fn closest_point(
        &self,
        query: &Point2<T>,
        max_distance_sq: T::Distance,
    ) -> Option<Neighbor<'_, I, T>> {
        let mut nearest = Nearest::new(max_distance_sq);
        self.root.search(query, &mut nearest);
        nearest.into_neighbor()
    }

    /// Find the item closest to `query` without limiting the search radius
    pub fn nearest(&self, query: &Point2<T>) -> Option<Neighbor<'_, I, T>> {
        self.closest_point(query, T::UNBOUNDED)
    }

    /// Find up to `k` items closest to `query`, sorted ascending by distance
    ///
    /// Only items strictly closer than `max_distance_sq` are considered. Items at
    /// equal distance keep the order the traversal reached them in.
    pub fn k_closest(
        &self,
        query: &Point2<T>,
        k: usize,
        max_distance_sq: T::Distance,
    ) -> Vec<Neighbor<'_, I, T>> {
        if k == 0 {
            return Vec::new();
        }
        let mut knn = KNearest::new(k, max_distance_sq, self.len);
        self.root.search(query, &mut knn);
        knn.into_vec()
    }

    /// Find up to `k` items closest to `query` without limiting the search radius
    pub fn k_nearest(&self, query: &Point2<T>, k: usize) -> Vec<Neighbor<'_, I, T>> {
        self.k_closest(query, k, T::UNBOUNDED)
    }
}

impl<I, T: Coordinate> QuadTree<I, T> {
    /// Number of items inserted into the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no items
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the boundary rect of the quadtree
    pub fn boundary(&self) -> &Rect<T> {
        &self.boundary
    }

    /// Return the point at the center of the boundary
    pub fn center(&self) -> Point2<T> {
        self.root.center
    }

    /// Configuration the tree was built with
    pub fn config(&self) -> &QuadTreeConfig<T> {
        &self.config
    }

    /// Iterate over every stored item, depth first in quadrant order
    pub fn iter(&self) -> Iter<'_, I, T> {
        Iter {
            stack: vec![&self.root],
            current: Default::default(),
        }
    }

    /// Summarize the current shape of the tree
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.root.collect_stats(&mut stats);
        stats
    }
}

impl<I: Point<T>, T: Coordinate> Extend<I> for QuadTree<I, T> {
    fn extend<It: IntoIterator<Item = I>>(&mut self, iter: It) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, I, T: Coordinate> IntoIterator for &'a QuadTree<I, T> {
    type Item = &'a I;
    type IntoIter = Iter<'a, I, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Shape of a quadtree, as reported by [`QuadTree::stats`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Depth of the deepest node, the root being 0
    pub depth: u32,
    pub leaves: usize,
    pub internal_nodes: usize,
    /// Item count of the fullest leaf
    pub largest_leaf: usize,
}

/// Iterator over the items of a [`QuadTree`]
pub struct Iter<'a, I, T: Coordinate> {
    stack: Vec<&'a Node<I, T>>,
    current: std::slice::Iter<'a, I>,
}

impl<'a, I, T: Coordinate> Iterator for Iter<'a, I, T> {
    type Item = &'a I;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            match &self.stack.pop()?.kind {
                NodeKind::Leaf(items) => self.current = items.iter(),
                NodeKind::Internal(children) => self.stack.extend(children.iter().rev()),
            }
        }
    }
}

/// A single quadrant covering `[center - half_extent, center + half_extent]`
#[derive(Clone, Debug)]
struct Node<I, T: Coordinate> {
    center: Point2<T>,
    half_extent: Vector2<T>,
    depth: u32,
    kind: NodeKind<I, T>,
}

/// Children are indexed 0 = (x<cx, y<cy), 1 = (x>=cx, y<cy), 2 = (x<cx, y>=cy),
/// 3 = (x>=cx, y>=cy)
#[derive(Clone, Debug)]
enum NodeKind<I, T: Coordinate> {
    Leaf(Vec<I>),
    Internal(Box<[Node<I, T>; 4]>),
}

impl<I, T: Coordinate> Node<I, T> {
    fn leaf(center: Point2<T>, half_extent: Vector2<T>, depth: u32) -> Self {
        Self {
            center,
            half_extent,
            depth,
            kind: NodeKind::Leaf(Vec::new()),
        }
    }

    fn collect_stats(&self, stats: &mut TreeStats) {
        stats.depth = stats.depth.max(self.depth);
        match &self.kind {
            NodeKind::Leaf(items) => {
                stats.leaves += 1;
                stats.largest_leaf = stats.largest_leaf.max(items.len());
            }
            NodeKind::Internal(children) => {
                stats.internal_nodes += 1;
                for child in children.iter() {
                    child.collect_stats(stats);
                }
            }
        }
    }
}

impl<I: Point<T>, T: Coordinate> Node<I, T> {
    fn insert(&mut self, item: I, config: &QuadTreeConfig<T>) {
        let can_subdivide = self.can_subdivide(config);

        match &mut self.kind {
            NodeKind::Internal(children) => {
                let q = determine_quadrant(&self.center, &item.point());
                children[q].insert(item, config);
            }
            NodeKind::Leaf(items) => {
                items.push(item);
                if items.len() <= config.cell_capacity {
                    return;
                }
                if !can_subdivide {
                    if items.len() == config.cell_capacity + 1 {
                        trace!(
                            depth = self.depth,
                            center = ?self.center,
                            "leaf over capacity at subdivision floor"
                        );
                    }
                    return;
                }

                let items = mem::take(items);
                self.kind = NodeKind::Internal(Box::new(self.quarter()));
                trace!(
                    depth = self.depth,
                    center = ?self.center,
                    items = items.len(),
                    "subdivided node"
                );
                for item in items {
                    self.insert(item, config);
                }
            }
        }
    }

    /// A leaf may split while its children stay above the floor on both axes and
    /// the depth limit has not been reached
    fn can_subdivide(&self, config: &QuadTreeConfig<T>) -> bool {
        self.depth < config.max_depth
            && self.half_extent.x.halve() > config.min_half_extent
            && self.half_extent.y.halve() > config.min_half_extent
    }

    fn quarter(&self) -> [Self; 4] {
        let half = Vector2::new(self.half_extent.x.halve(), self.half_extent.y.halve());
        let (cx, cy) = (self.center.x, self.center.y);
        let depth = self.depth + 1;

        [
            point![cx - half.x, cy - half.y],
            point![cx + half.x, cy - half.y],
            point![cx - half.x, cy + half.y],
            point![cx + half.x, cy + half.y],
        ]
        .map(|center| Self::leaf(center, half, depth))
    }

    /// Branch-and-bound descent. The query's own quadrant is searched first, then
    /// each sibling only while the distance to the splitting line(s) between them
    /// is still below the collector's bound.
    fn search<'a, C: Collector<'a, I, T>>(&'a self, query: &Point2<T>, collector: &mut C) {
        match &self.kind {
            NodeKind::Leaf(items) => {
                for item in items {
                    let distance_sq = squared_distance(&item.point(), query);
                    if distance_sq < collector.bound() {
                        collector.offer(item, distance_sq);
                    }
                }
            }
            NodeKind::Internal(children) => {
                let home = determine_quadrant(&self.center, query);
                let dx = T::axis_distance_sq(self.center.x, query.x);
                let dy = T::axis_distance_sq(self.center.y, query.y);

                children[home].search(query, collector);

                // Flipping bit 0 crosses the x split, bit 1 the y split
                if dx < collector.bound() {
                    children[home ^ 1].search(query, collector);
                }
                if dy < collector.bound() {
                    children[home ^ 2].search(query, collector);
                }
                if T::sum_distance(dx, dy) < collector.bound() {
                    children[home ^ 3].search(query, collector);
                }
            }
        }
    }
}
