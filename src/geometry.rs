//! Planar primitives and the smallest enclosing circle.
//!
//! The circle is built with the randomized incremental construction: points are
//! visited in shuffled order and whenever one falls outside the current circle the
//! circle is rebuilt with that point on its boundary, using at most three boundary
//! points. The shuffle uses a fixed seed after sorting the input, so the same point
//! set always yields the same circle regardless of how the caller ordered it.

use imageproc::point::Point;
use num_traits::AsPrimitive;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::error::GrainError;

/// Relative boundary tolerance used by [`smallest_enclosing_circle`].
pub const DEFAULT_EPSILON: f64 = 1e-12;

const SHUFFLE_SEED: u64 = 0x5EED_C1C1_E000_0001;

/// A circle with a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point<f64>,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point<f64>, radius: f64) -> Self {
        debug_assert!(radius >= 0.0, "radius must be non-negative");
        Self { center, radius }
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Whether `p` lies on or inside the circle, allowing `epsilon` of slack
    /// relative to the radius (absolute below a radius of 1).
    pub fn contains_with(&self, p: Point<f64>, epsilon: f64) -> bool {
        distance(self.center, p) <= self.radius + epsilon * self.radius.max(1.0)
    }

    pub fn contains(&self, p: Point<f64>) -> bool {
        self.contains_with(p, DEFAULT_EPSILON)
    }
}

pub fn distance(a: Point<f64>, b: Point<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Twice the signed area of the triangle `(a, b, c)`; positive when `c` is to
/// the left of the directed line `a -> b`.
pub fn cross(a: Point<f64>, b: Point<f64>, c: Point<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// The circle having segment `ab` as its diameter.
pub fn circle_from_diameter(a: Point<f64>, b: Point<f64>) -> Circle {
    let center = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    let radius = distance(center, a).max(distance(center, b));
    Circle::new(center, radius)
}

/// The circle through `a`, `b` and `c`, or `None` when the points are collinear.
pub fn circumcircle(a: Point<f64>, b: Point<f64>, c: Point<f64>) -> Option<Circle> {
    // Work relative to the bounding box centre to keep the determinant well conditioned.
    let ox = (a.x.min(b.x).min(c.x) + a.x.max(b.x).max(c.x)) / 2.0;
    let oy = (a.y.min(b.y).min(c.y) + a.y.max(b.y).max(c.y)) / 2.0;
    let (ax, ay) = (a.x - ox, a.y - oy);
    let (bx, by) = (b.x - ox, b.y - oy);
    let (cx, cy) = (c.x - ox, c.y - oy);

    let d = (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by)) * 2.0;
    if d == 0.0 {
        return None;
    }

    let a2 = ax * ax + ay * ay;
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let x = ox + (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
    let y = oy + (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;
    let center = Point::new(x, y);
    let radius = distance(center, a)
        .max(distance(center, b))
        .max(distance(center, c));
    Some(Circle::new(center, radius))
}

/// Computes the smallest circle enclosing every point, with [`DEFAULT_EPSILON`].
///
/// # Errors
///
/// Returns [`GrainError::InvalidArgument`] for an empty slice or a non-finite
/// coordinate.
///
/// # Examples
///
/// ```
/// use imageproc::point::Point;
/// use grain_sphericity::geometry::smallest_enclosing_circle;
///
/// let circle = smallest_enclosing_circle(&[Point::new(0, 0), Point::new(4, 0)]).unwrap();
/// assert_eq!(circle.center, Point::new(2.0, 0.0));
/// assert_eq!(circle.radius, 2.0);
/// ```
pub fn smallest_enclosing_circle<T>(points: &[Point<T>]) -> Result<Circle, GrainError>
where
    T: Copy + AsPrimitive<f64>,
{
    smallest_enclosing_circle_with_tolerance(points, DEFAULT_EPSILON)
}

/// Same as [`smallest_enclosing_circle`] with an explicit relative tolerance.
pub fn smallest_enclosing_circle_with_tolerance<T>(
    points: &[Point<T>],
    epsilon: f64,
) -> Result<Circle, GrainError>
where
    T: Copy + AsPrimitive<f64>,
{
    if points.is_empty() {
        return Err(GrainError::InvalidArgument(
            "cannot fit a circle to an empty point set".to_string(),
        ));
    }
    if !(epsilon.is_finite() && epsilon >= 0.0) {
        return Err(GrainError::InvalidArgument(format!(
            "tolerance must be finite and non-negative, got {epsilon}"
        )));
    }

    let mut pts: Vec<Point<f64>> = points
        .iter()
        .map(|p| Point::new(p.x.as_(), p.y.as_()))
        .collect();
    if pts.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(GrainError::InvalidArgument(
            "point coordinates must be finite".to_string(),
        ));
    }

    // Canonical order first, then a seeded shuffle: permutations of the same set
    // visit points identically.
    pts.sort_unstable_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    pts.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));

    let mut circle = Circle::new(pts[0], 0.0);
    for (i, &p) in pts.iter().enumerate().skip(1) {
        if !circle.contains_with(p, epsilon) {
            circle = circle_with_one_point(&pts[..i], p, epsilon);
        }
    }
    Ok(circle)
}

/// Smallest circle enclosing `points` with `p` on its boundary.
fn circle_with_one_point(points: &[Point<f64>], p: Point<f64>, epsilon: f64) -> Circle {
    let mut circle = Circle::new(p, 0.0);
    for (i, &q) in points.iter().enumerate() {
        if !circle.contains_with(q, epsilon) {
            circle = if circle.radius == 0.0 {
                circle_from_diameter(p, q)
            } else {
                circle_with_two_points(&points[..=i], p, q, epsilon)
            };
        }
    }
    circle
}

/// Smallest circle enclosing `points` with both `p` and `q` on its boundary.
fn circle_with_two_points(
    points: &[Point<f64>],
    p: Point<f64>,
    q: Point<f64>,
    epsilon: f64,
) -> Circle {
    let diameter = circle_from_diameter(p, q);
    let mut left: Option<Circle> = None;
    let mut right: Option<Circle> = None;

    for &r in points {
        if diameter.contains_with(r, epsilon) {
            continue;
        }
        let side = cross(p, q, r);
        let Some(candidate) = circumcircle(p, q, r) else {
            continue;
        };
        let offset = cross(p, q, candidate.center);
        if side > 0.0 {
            if left.is_none_or(|prev| offset > cross(p, q, prev.center)) {
                left = Some(candidate);
            }
        } else if side < 0.0 && right.is_none_or(|prev| offset < cross(p, q, prev.center)) {
            right = Some(candidate);
        }
    }

    match (left, right) {
        (None, None) => diameter,
        (Some(l), None) => l,
        (None, Some(r)) => r,
        (Some(l), Some(r)) => {
            if l.radius <= r.radius {
                l
            } else {
                r
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn assert_float_eq(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "Assertion failed: expected {}, got {}",
            b,
            a
        );
    }

    fn random_points(rng: &mut StdRng, n: usize) -> Vec<Point<f64>> {
        (0..n)
            .map(|_| Point::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)))
            .collect()
    }

    /// No centre in a neighbourhood of the result encloses the points with a
    /// smaller radius than the one found.
    fn assert_minimal(points: &[Point<f64>], circle: Circle) {
        let step = (circle.radius * 0.01).max(1e-3);
        for i in -20..=20 {
            for j in -20..=20 {
                let c = Point::new(
                    circle.center.x + i as f64 * step,
                    circle.center.y + j as f64 * step,
                );
                let needed = points
                    .iter()
                    .map(|&p| distance(c, p))
                    .fold(0.0f64, f64::max);
                assert!(
                    needed >= circle.radius - 1e-9,
                    "centre {:?} encloses with {} < {}",
                    c,
                    needed,
                    circle.radius
                );
            }
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let empty: Vec<Point<f64>> = Vec::new();
        assert!(matches!(
            smallest_enclosing_circle(&empty),
            Err(GrainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        assert!(matches!(
            smallest_enclosing_circle(&pts),
            Err(GrainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_single_and_repeated_point() {
        let c = smallest_enclosing_circle(&[Point::new(3, 4)]).unwrap();
        assert_eq!(c.center, Point::new(3.0, 4.0));
        assert_eq!(c.radius, 0.0);

        let c = smallest_enclosing_circle(&[Point::new(3, 4); 5]).unwrap();
        assert_eq!(c.radius, 0.0);
    }

    #[test]
    fn test_collinear_points_use_outer_pair() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 10.0),
        ];
        let c = smallest_enclosing_circle(&pts).unwrap();
        assert_float_eq(c.center.x, 5.0, 1e-9);
        assert_float_eq(c.center.y, 5.0, 1e-9);
        assert_float_eq(c.radius, 50f64.sqrt(), 1e-9);
    }

    #[test]
    fn test_obtuse_triangle_uses_longest_edge() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 1.0)];
        let c = smallest_enclosing_circle(&pts).unwrap();
        assert_float_eq(c.center.x, 5.0, 1e-9);
        assert_float_eq(c.center.y, 0.0, 1e-9);
        assert_float_eq(c.radius, 5.0, 1e-9);
    }

    #[test]
    fn test_equilateral_triangle_uses_circumcircle() {
        let h = 3f64.sqrt() / 2.0;
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.5, h)];
        let c = smallest_enclosing_circle(&pts).unwrap();
        assert_float_eq(c.radius, 1.0 / 3f64.sqrt(), 1e-9);
        assert_float_eq(c.center.x, 0.5, 1e-9);
    }

    #[test]
    fn test_square_corners() {
        let pts = vec![
            Point::new(8, 8),
            Point::new(12, 8),
            Point::new(12, 12),
            Point::new(8, 12),
        ];
        let c = smallest_enclosing_circle(&pts).unwrap();
        assert_float_eq(c.center.x, 10.0, 1e-9);
        assert_float_eq(c.center.y, 10.0, 1e-9);
        assert_float_eq(c.radius, 8f64.sqrt(), 1e-9);
    }

    #[test]
    fn test_random_sets_are_enclosed_and_minimal() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [2usize, 3, 5, 17, 100, 400] {
            let pts = random_points(&mut rng, n);
            let c = smallest_enclosing_circle(&pts).unwrap();
            assert!(pts.iter().all(|&p| c.contains_with(p, 1e-9)));
            assert_minimal(&pts, c);
        }
    }

    #[test]
    fn test_result_is_permutation_invariant() {
        let mut rng = StdRng::seed_from_u64(11);
        let pts = random_points(&mut rng, 64);
        let reference = smallest_enclosing_circle(&pts).unwrap();

        let mut reversed = pts.clone();
        reversed.reverse();
        assert_eq!(smallest_enclosing_circle(&reversed).unwrap(), reference);

        for _ in 0..5 {
            let mut shuffled = pts.clone();
            shuffled.shuffle(&mut rng);
            assert_eq!(smallest_enclosing_circle(&shuffled).unwrap(), reference);
        }
    }

    #[test]
    fn test_repeated_calls_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        let pts = random_points(&mut rng, 50);
        let a = smallest_enclosing_circle(&pts).unwrap();
        let b = smallest_enclosing_circle(&pts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_circumcircle_of_collinear_points_is_none() {
        assert!(
            circumcircle(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0))
                .is_none()
        );
    }
}
