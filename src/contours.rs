use image::math::Rect;
use imageproc::{
    contours::{BorderType, find_contours},
    point::Point,
    region_labelling::Connectivity,
};
use num_traits::AsPrimitive;

use crate::{
    error::GrainError, mask::Mask, rect::bounding_box, region_labelling::isolate_component,
};

/// Closed outer boundary of a grain, in pixel-centre grid coordinates.
///
/// The last point connects back to the first; it is not repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn perimeter(&self) -> f64 {
        perimeter(&self.points)
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box(&self.points)
    }

    /// The vertices as real-valued points.
    pub fn to_f64(&self) -> Vec<Point<f64>> {
        self.points
            .iter()
            .map(|p| Point::new(f64::from(p.x), f64::from(p.y)))
            .collect()
    }
}

/// Calculates the perimeter of a closed polygon.
///
/// The perimeter is the sum of Euclidean distances between consecutive points,
/// closing the loop with the distance between the last and the first point.
/// Polygons with 0 or 1 point have a perimeter of `0.0`; two points count the
/// segment twice (out and back).
///
/// # Type Parameters
///
/// * `T`: The numeric type of the coordinates, convertible to `f64` (`i32`, `u32`, `f64`, ...).
pub fn perimeter<T>(points: &[Point<T>]) -> f64
where
    T: Copy + AsPrimitive<f64>,
{
    if points.len() < 2 {
        return 0.0;
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p1, p2)| {
            let dx: f64 = p2.x.as_() - p1.x.as_();
            let dy: f64 = p2.y.as_() - p1.y.as_();
            dx.hypot(dy)
        })
        .sum()
}

/// Unsigned area of a closed polygon by the shoelace formula.
///
/// Fewer than three vertices enclose no area.
pub fn polygon_area<T>(points: &[Point<T>]) -> f64
where
    T: Copy + AsPrimitive<f64>,
{
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p1, p2)| {
            let (x1, y1): (f64, f64) = (p1.x.as_(), p1.y.as_());
            let (x2, y2): (f64, f64) = (p2.x.as_(), p2.y.as_());
            x1 * y2 - x2 * y1
        })
        .sum();
    twice.abs() / 2.0
}

/// Traces the outer boundary of the grain selected by `point`.
///
/// Disconnected islands are discarded first (see [`isolate_component`]); holes
/// inside the grain are ignored. A single isolated pixel yields a one-point contour.
///
/// # Errors
///
/// [`GrainError::EmptyMask`] if the mask has no foreground.
pub fn extract_contour(
    mask: &Mask,
    point: Point<f64>,
    connectivity: Connectivity,
) -> Result<Contour, GrainError> {
    let component = isolate_component(mask, point, connectivity)?;

    let outer = find_contours::<i32>(component.as_image())
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| c.points)
        .filter(|points| !points.is_empty())
        .max_by(|a, b| polygon_area(a).total_cmp(&polygon_area(b)));

    let points = match outer {
        Some(points) => points,
        // Tracing can come back empty for degenerate components; fall back to the pixels.
        None => component
            .foreground_pixels()
            .map(|p| Point::new(p.x as i32, p.y as i32))
            .collect(),
    };

    if points.is_empty() {
        return Err(GrainError::EmptyMask);
    }
    log::debug!(
        "traced contour with {} vertices from {} foreground pixels",
        points.len(),
        component.foreground_count()
    );
    Ok(Contour::new(points))
}
