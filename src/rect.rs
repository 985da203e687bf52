use nalgebra::{point, Point2, Scalar, Vector2};

use crate::{Axis, Coordinate, Error, Result};

/// Represents an axis-aligned rectangle defined by two points: the start and the end.
/// It is used to declare the fixed bounds of a [`QuadTree`](crate::QuadTree).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<T: Scalar> {
    start: Point2<T>,
    end: Point2<T>,
}

impl<T: Coordinate> Rect<T> {
    /// Create a new rect with a start and end point
    ///
    /// Fails if `start` is not strictly below `end` on both axes, or if the span
    /// along an axis cannot be represented by `T`.
    pub fn new(start: Point2<T>, end: Point2<T>) -> Result<Self> {
        let rect = Self { start, end };
        rect.validate()?;
        Ok(rect)
    }

    /// Create a new rect from its extents along each axis
    pub fn from_extents(min_x: T, max_x: T, min_y: T, max_y: T) -> Result<Self> {
        Self::new(point![min_x, min_y], point![max_x, max_y])
    }

    /// Check that the rect is non-degenerate and its half-extents are representable
    // Negated `<` so NaN extents are rejected too
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<()> {
        for (axis, min, max) in [
            (Axis::X, self.start.x, self.end.x),
            (Axis::Y, self.start.y, self.end.y),
        ] {
            if !(min < max) {
                return Err(Error::InvalidBounds { axis });
            }
            if T::half_span(min, max).is_none() {
                return Err(Error::ExtentOverflow { axis });
            }
        }
        Ok(())
    }

    /// Get the start point of the rect
    pub fn start(&self) -> Point2<T> {
        self.start
    }

    /// Get the end point of the rect
    pub fn end(&self) -> Point2<T> {
        self.end
    }

    /// Half the span along each axis, truncated for integer coordinates
    pub fn half_extent(&self) -> Vector2<T> {
        Vector2::new(
            (self.end.x - self.start.x).halve(),
            (self.end.y - self.start.y).halve(),
        )
    }

    /// Get the center point of the rect
    ///
    /// For integer coordinates this is `start + half_extent`, so it rounds towards
    /// `start` when a span is odd.
    pub fn center(&self) -> Point2<T> {
        let half = self.half_extent();
        point![self.start.x + half.x, self.start.y + half.y]
    }

    /// Check if a point exists within the rect, edges included
    pub fn contains(&self, point: &Point2<T>) -> bool {
        point.x >= self.start.x
            && point.x <= self.end.x
            && point.y >= self.start.y
            && point.y <= self.end.y
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::vector;

    use crate::util::tests::make_rect;

    use super::*;

    #[test]
    fn rect_properties() {
        let rect = make_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            rect.start(),
            point![0.0, 0.0],
            "Start should be at (0.0, 0.0)"
        );
        assert_eq!(
            rect.end(),
            point![10.0, 10.0],
            "End should be at (10.0, 10.0)"
        );
        assert_eq!(
            rect.center(),
            point![5.0, 5.0],
            "Center should be at (5.0, 5.0)"
        );
        assert_eq!(rect.half_extent(), vector![5.0, 5.0]);
    }

    #[test]
    fn integer_rect_center_truncates() {
        let rect = Rect::from_extents(0, 101, -10, 10).unwrap();
        assert_eq!(rect.half_extent(), vector![50, 10]);
        assert_eq!(rect.center(), point![50, 0]);
    }

    #[test]
    fn rect_contains_point() {
        let rect = make_rect(0.0, 0.0, 10.0, 10.0);
        assert!(
            rect.contains(&point![5.0, 5.0]),
            "Rect should contain point (5.0, 5.0)"
        );
        assert!(
            !rect.contains(&point![-1.0, 5.0]),
            "Rect should not contain point (-1.0, 5.0)"
        );
        assert!(
            rect.contains(&point![0.0, 0.0]),
            "Rect should contain its start point (0.0, 0.0)"
        );
        assert!(
            rect.contains(&point![10.0, 10.0]),
            "Rect should contain its end point (10.0, 10.0)"
        );
    }

    #[test]
    fn degenerate_rects_are_rejected() {
        assert_eq!(
            Rect::from_extents(5, 5, 0, 10),
            Err(Error::InvalidBounds { axis: Axis::X })
        );
        assert_eq!(
            Rect::from_extents(0.0, 10.0, 3.0, -3.0),
            Err(Error::InvalidBounds { axis: Axis::Y })
        );
        assert_eq!(
            Rect::from_extents(f64::NAN, 1.0, 0.0, 1.0),
            Err(Error::InvalidBounds { axis: Axis::X }),
            "NaN never compares below max"
        );
    }

    #[test]
    fn unrepresentable_spans_are_rejected() {
        assert_eq!(
            Rect::from_extents(0, 10, i32::MIN, i32::MAX),
            Err(Error::ExtentOverflow { axis: Axis::Y })
        );
        assert_eq!(
            Rect::from_extents(0.0, f32::INFINITY, 0.0, 1.0),
            Err(Error::ExtentOverflow { axis: Axis::X })
        );
    }
}
