use std::fmt;

use crate::Coordinate;

/// An item found by a nearest-neighbor query, with its squared distance to the
/// query point.
pub struct Neighbor<'a, I, T: Coordinate> {
    pub item: &'a I,
    pub distance_sq: T::Distance,
}

impl<I, T: Coordinate> Clone for Neighbor<'_, I, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, T: Coordinate> Copy for Neighbor<'_, I, T> {}

impl<I: fmt::Debug, T: Coordinate> fmt::Debug for Neighbor<'_, I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neighbor")
            .field("item", self.item)
            .field("distance_sq", &self.distance_sq)
            .finish()
    }
}

impl<I: PartialEq, T: Coordinate> PartialEq for Neighbor<'_, I, T> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item && self.distance_sq == other.distance_sq
    }
}

/// Receives candidates during a branch-and-bound traversal.
///
/// The traversal only offers items strictly closer than [`bound`](Collector::bound),
/// and a collector may only ever shrink its bound.
pub(crate) trait Collector<'a, I, T: Coordinate> {
    fn bound(&self) -> T::Distance;
    fn offer(&mut self, item: &'a I, distance_sq: T::Distance);
}

/// Keeps the single closest item seen so far
pub(crate) struct Nearest<'a, I, T: Coordinate> {
    best: Option<Neighbor<'a, I, T>>,
    bound: T::Distance,
}

impl<'a, I, T: Coordinate> Nearest<'a, I, T> {
    pub(crate) fn new(max_distance_sq: T::Distance) -> Self {
        Self {
            best: None,
            bound: max_distance_sq,
        }
    }

    pub(crate) fn into_neighbor(self) -> Option<Neighbor<'a, I, T>> {
        self.best
    }
}

impl<'a, I, T: Coordinate> Collector<'a, I, T> for Nearest<'a, I, T> {
    fn bound(&self) -> T::Distance {
        self.bound
    }

    fn offer(&mut self, item: &'a I, distance_sq: T::Distance) {
        self.best = Some(Neighbor { item, distance_sq });
        self.bound = distance_sq;
    }
}

/// Keeps up to `k` items sorted ascending by distance
///
/// Equal distances keep the order they were offered in. Once `k` items are held,
/// the bound tracks the distance of the worst one.
pub(crate) struct KNearest<'a, I, T: Coordinate> {
    k: usize,
    results: Vec<Neighbor<'a, I, T>>,
    bound: T::Distance,
}

impl<'a, I, T: Coordinate> KNearest<'a, I, T> {
    /// `capacity_hint` caps the preallocation, so a huge `k` does not allocate up front
    pub(crate) fn new(k: usize, max_distance_sq: T::Distance, capacity_hint: usize) -> Self {
        Self {
            k,
            results: Vec::with_capacity(k.min(capacity_hint).saturating_add(1)),
            bound: max_distance_sq,
        }
    }

    pub(crate) fn into_vec(self) -> Vec<Neighbor<'a, I, T>> {
        self.results
    }
}

impl<'a, I, T: Coordinate> Collector<'a, I, T> for KNearest<'a, I, T> {
    fn bound(&self) -> T::Distance {
        self.bound
    }

    fn offer(&mut self, item: &'a I, distance_sq: T::Distance) {
        let mut i = self.results.len();
        while i > 0 && distance_sq < self.results[i - 1].distance_sq {
            i -= 1;
        }
        self.results.insert(i, Neighbor { item, distance_sq });

        if self.results.len() > self.k {
            self.results.pop();
        }
        if self.results.len() == self.k {
            if let Some(worst) = self.results.last() {
                self.bound = worst.distance_sq;
            }
        }
    }
}
