use std::fmt::Debug;

use nalgebra::Scalar;
use num_traits::Num;

/// Numeric type a [`QuadTree`](crate::QuadTree) can be built over.
///
/// Squared distances are measured in the associated [`Distance`](Coordinate::Distance)
/// type. For integers it is wider than the coordinate itself and arithmetic on it
/// saturates, so queries far outside the tree bounds cannot overflow.
pub trait Coordinate: Scalar + Copy + PartialOrd + Num {
    /// Type squared distances are expressed in
    type Distance: Copy + PartialOrd + Debug + Num;

    /// Subdivision floor used when none is configured. A node stops splitting once
    /// the half-extent of its children would be at or below this value.
    const DEFAULT_MIN_HALF_EXTENT: Self;

    /// Squared distance no stored item can reach, used for unbounded queries
    const UNBOUNDED: Self::Distance;

    /// Half of `max - min`, or `None` when the span is not representable
    fn half_span(min: Self, max: Self) -> Option<Self>;

    /// Squared difference between two values on one axis
    fn axis_distance_sq(a: Self, b: Self) -> Self::Distance;

    /// Add two squared distances
    fn sum_distance(a: Self::Distance, b: Self::Distance) -> Self::Distance;

    /// Divide by two, truncating for integers
    fn halve(self) -> Self {
        self / (Self::one() + Self::one())
    }
}

macro_rules! impl_int_coordinate {
    ($($t:ty => $d:ty),* $(,)?) => {$(
        impl Coordinate for $t {
            type Distance = $d;

            const DEFAULT_MIN_HALF_EXTENT: Self = 1;
            const UNBOUNDED: $d = <$d>::MAX;

            fn half_span(min: Self, max: Self) -> Option<Self> {
                max.checked_sub(min).map(|span| span / 2)
            }

            fn axis_distance_sq(a: Self, b: Self) -> $d {
                let diff = <$d>::from(a) - <$d>::from(b);
                diff.saturating_mul(diff)
            }

            fn sum_distance(a: $d, b: $d) -> $d {
                a.saturating_add(b)
            }
        }
    )*};
}

macro_rules! impl_float_coordinate {
    ($($t:ty),* $(,)?) => {$(
        impl Coordinate for $t {
            type Distance = $t;

            const DEFAULT_MIN_HALF_EXTENT: Self = 0.0;
            const UNBOUNDED: $t = <$t>::INFINITY;

            fn half_span(min: Self, max: Self) -> Option<Self> {
                let span = max - min;
                (min.is_finite() && max.is_finite() && span.is_finite()).then(|| span / 2.0)
            }

            fn axis_distance_sq(a: Self, b: Self) -> $t {
                let diff = a - b;
                diff * diff
            }

            fn sum_distance(a: $t, b: $t) -> $t {
                a + b
            }
        }
    )*};
}

impl_int_coordinate! {
    i16 => i64,
    u16 => i64,
    i32 => i64,
    u32 => i64,
    i64 => i128,
}

impl_float_coordinate!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_half_span_truncates() {
        assert_eq!(i32::half_span(0, 101), Some(50));
        assert_eq!(u16::half_span(10, 20), Some(5));
        assert_eq!(
            i32::half_span(i32::MIN, i32::MAX),
            None,
            "Span overflows i32"
        );
    }

    #[test]
    fn float_half_span_rejects_non_finite() {
        assert_eq!(f64::half_span(-1.0, 1.0), Some(1.0));
        assert_eq!(f64::half_span(0.0, f64::INFINITY), None);
        assert_eq!(
            f32::half_span(f32::MIN, f32::MAX),
            None,
            "Span overflows f32"
        );
    }

    #[test]
    fn unsigned_distance_is_symmetric() {
        assert_eq!(u32::axis_distance_sq(3, 10), 49);
        assert_eq!(u32::axis_distance_sq(10, 3), 49);
    }

    #[test]
    fn integer_distance_saturates() {
        let d = i64::axis_distance_sq(i64::MIN, i64::MAX);
        assert_eq!(d, i128::MAX);
        assert_eq!(i64::sum_distance(d, d), i128::MAX);
        assert_eq!(
            i32::axis_distance_sq(-1_000_000, 1_000_000),
            4_000_000_000_000
        );
        assert_eq!(i32::axis_distance_sq(i32::MIN, i32::MAX), i64::MAX);
    }

    #[test]
    fn halving() {
        assert_eq!(7i32.halve(), 3);
        assert_eq!((-7i32).halve(), -3);
        assert_eq!(2.5f64.halve(), 1.25);
    }
}
