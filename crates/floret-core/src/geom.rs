#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// Largest absolute coordinate over a set of points (0 for an empty set).
///
/// This is the half side of the smallest origin-centered square that contains every point.
pub fn max_abs_extent(points: impl IntoIterator<Item = Point>) -> f64 {
    points
        .into_iter()
        .fold(0.0_f64, |acc, p| acc.max(p.x.abs()).max(p.y.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_abs_extent_of_empty_set_is_zero() {
        assert_eq!(max_abs_extent(std::iter::empty()), 0.0);
    }

    #[test]
    fn max_abs_extent_uses_both_axes_and_signs() {
        let pts = [point(1.0, -3.0), point(-2.5, 0.5)];
        assert_eq!(max_abs_extent(pts), 3.0);
    }
}
