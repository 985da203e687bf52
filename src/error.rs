use std::fmt;

/// One of the two coordinate axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Errors raised when constructing a [`QuadTree`](crate::QuadTree)
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("bounds on the {axis} axis are empty or inverted")]
    InvalidBounds { axis: Axis },
    #[error("extent on the {axis} axis is not representable by the coordinate type")]
    ExtentOverflow { axis: Axis },
    #[error("cell capacity must be at least 1")]
    ZeroCapacity,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
