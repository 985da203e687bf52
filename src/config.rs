use crate::{Coordinate, Error, Result};

/// Tuning parameters for a [`QuadTree`](crate::QuadTree)
///
/// ## Fields
/// - `cell_capacity`: maximum number of items a leaf holds before it subdivides
/// - `min_half_extent`: a leaf only subdivides while its children's half-extent on
///   both axes stays above this floor
/// - `max_depth`: depth at which leaves stop subdividing regardless of extent
///
/// Leaves blocked by the floor or the depth limit keep accepting items past
/// `cell_capacity`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadTreeConfig<T> {
    pub cell_capacity: usize,
    pub min_half_extent: T,
    pub max_depth: u32,
}

impl<T: Coordinate> QuadTreeConfig<T> {
    pub const DEFAULT_CELL_CAPACITY: usize = 20;
    pub const DEFAULT_MAX_DEPTH: u32 = 64;

    /// Default configuration with the given cell capacity
    pub fn new(cell_capacity: usize) -> Self {
        Self {
            cell_capacity,
            ..Self::default()
        }
    }

    /// Set the number of items a leaf holds before it subdivides
    pub fn with_cell_capacity(mut self, cell_capacity: usize) -> Self {
        self.cell_capacity = cell_capacity;
        self
    }

    /// Set the half-extent floor below which leaves stop subdividing
    pub fn with_min_half_extent(mut self, min_half_extent: T) -> Self {
        self.min_half_extent = min_half_extent;
        self
    }

    /// Set the depth at which leaves stop subdividing
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.cell_capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(())
    }
}

impl<T: Coordinate> Default for QuadTreeConfig<T> {
    fn default() -> Self {
        Self {
            cell_capacity: Self::DEFAULT_CELL_CAPACITY,
            min_half_extent: T::DEFAULT_MIN_HALF_EXTENT,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_coordinate_type() {
        let int = QuadTreeConfig::<i32>::default();
        assert_eq!(int.cell_capacity, 20);
        assert_eq!(int.min_half_extent, 1);
        assert_eq!(int.max_depth, 64);

        let float = QuadTreeConfig::<f32>::new(4);
        assert_eq!(float.cell_capacity, 4);
        assert_eq!(float.min_half_extent, 0.0);
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let config = QuadTreeConfig::<f64>::default().with_cell_capacity(0);
        assert_eq!(config.validate(), Err(Error::ZeroCapacity));
        assert!(config.with_cell_capacity(1).validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serde() {
        let config = QuadTreeConfig::<f64>::new(8)
            .with_min_half_extent(0.5)
            .with_max_depth(12);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"cell_capacity":8,"min_half_extent":0.5,"max_depth":12}"#
        );
        let back: QuadTreeConfig<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
