use image::math::Rect;
use imageproc::point::Point;
use num_traits::{Num, ToPrimitive};

/// Calculates the axis-aligned bounding box of a set of vertices.
///
/// Works for the integer grid coordinates of a traced contour as well as for
/// floating-point geometry. Width and height are the coordinate spans
/// (`max - min`), so a single point yields an empty rectangle at that point.
///
/// Coordinates that cannot be represented as `u32` (negative values, for instance)
/// are clamped to `0`.
///
/// # Returns
///
/// `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use image::math::Rect;
/// use imageproc::point::Point;
/// use grain_sphericity::rect::bounding_box;
///
/// let diamond = [
///     Point { x: 50.0, y: 10.0 },
///     Point { x: 90.0, y: 50.0 },
///     Point { x: 50.0, y: 90.0 },
///     Point { x: 10.0, y: 50.0 },
/// ];
///
/// let bounds = bounding_box(&diamond).unwrap();
///
/// assert_eq!(bounds, Rect { x: 10, y: 10, width: 80, height: 80 });
/// ```
pub fn bounding_box<T>(vertices: &[Point<T>]) -> Option<Rect>
where
    T: Copy + PartialOrd + Num + ToPrimitive,
{
    let (first, rest) = vertices.split_first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;

    // `T` is only `PartialOrd` so that float coordinates are accepted.
    for p in rest {
        if p.x < min_x {
            min_x = p.x;
        }
        if p.x > max_x {
            max_x = p.x;
        }
        if p.y < min_y {
            min_y = p.y;
        }
        if p.y > max_y {
            max_y = p.y;
        }
    }

    let x = min_x.to_u32().unwrap_or(0);
    let y = min_y.to_u32().unwrap_or(0);

    let width = max_x.to_u32().unwrap_or(0).saturating_sub(x);
    let height = max_y.to_u32().unwrap_or(0).saturating_sub(y);

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}
