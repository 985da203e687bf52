use nalgebra::Point2;

use crate::Coordinate;

/// Index of the child quadrant `point` falls into around `center`.
///
/// 0 = (x < cx, y < cy), 1 = (x >= cx, y < cy), 2 = (x < cx, y >= cy),
/// 3 = (x >= cx, y >= cy). Points on a splitting line go to the "+" side.
// Negated `<` so NaN coordinates also route to the "+" side
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub(crate) fn determine_quadrant<T: Coordinate>(center: &Point2<T>, point: &Point2<T>) -> usize {
    let east = usize::from(!(point.x < center.x));
    let south = usize::from(!(point.y < center.y));
    east | (south << 1)
}

pub(crate) fn squared_distance<T: Coordinate>(a: &Point2<T>, b: &Point2<T>) -> T::Distance {
    let dx = T::axis_distance_sq(a.x, b.x);
    let dy = T::axis_distance_sq(a.y, b.y);
    T::sum_distance(dx, dy)
}

#[cfg(test)]
pub(crate) mod tests {
    use nalgebra::point;

    use crate::Rect;

    use super::*;

    pub(crate) fn make_rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect<f64> {
        Rect::new(point![x1, y1], point![x2, y2]).unwrap()
    }

    #[test]
    fn test_determine_quadrant() {
        let center = point![5.0, 5.0];
        let points = [
            point![2.5, 2.5],    // Should be in the first quadrant (index 0)
            point![7.5, 2.5],    // Should be in the second quadrant (index 1)
            point![2.5, 7.5],    // Should be in the third quadrant (index 2)
            point![7.5, 7.5],    // Should be in the fourth quadrant (index 3)
            point![5.0, 5.0],    // On both splitting lines, goes to the "+" side (index 3)
            point![5.0, 1.0],    // On the x split only (index 1)
            point![-40.0, 90.0], // Outside any bounds, still routed (index 2)
        ];

        let expected_quadrants = [0, 1, 2, 3, 3, 1, 2];
        let results = points
            .iter()
            .map(|point| determine_quadrant(&center, point))
            .collect::<Vec<_>>();

        assert_eq!(
            results, expected_quadrants,
            "Each point should match its expected quadrant"
        );
    }

    #[test]
    fn nan_coordinates_route_to_plus_side() {
        let center = point![5.0, 5.0];
        assert_eq!(determine_quadrant(&center, &point![f64::NAN, 1.0]), 1);
        assert_eq!(determine_quadrant(&center, &point![1.0, f64::NAN]), 2);
        assert_eq!(determine_quadrant(&center, &point![f64::NAN, f64::NAN]), 3);
    }

    #[test]
    fn test_squared_distance() {
        assert_eq!(squared_distance(&point![51, 51], &point![50, 50]), 2i64);
        assert_eq!(squared_distance(&point![0.0, 0.0], &point![3.0, 4.0]), 25.0);
    }
}
