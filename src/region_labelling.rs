//! Isolating the grain a click belongs to.
//!
//! Oracles frequently return masks with stray islands away from the clicked grain.
//! Only the connected component under the click (or, failing that, the one closest
//! to it) is kept so the noise never reaches the contour and circle fit.

use image::Luma;
use imageproc::{
    point::Point,
    region_labelling::{Connectivity, connected_components},
};

use crate::{error::GrainError, mask::Mask};

/// Returns a mask holding only the component selected by `point`.
///
/// If the pixel under `point` is foreground, its component is kept. Otherwise the
/// component owning the foreground pixel nearest to `point` is kept; ties go to the
/// first such pixel in row-major order.
///
/// # Errors
///
/// [`GrainError::EmptyMask`] if the mask has no foreground at all.
pub fn isolate_component(
    mask: &Mask,
    point: Point<f64>,
    connectivity: Connectivity,
) -> Result<Mask, GrainError> {
    let labels = connected_components(mask.as_image(), connectivity, Luma([0u8]));

    let under_click = if mask.contains(point) {
        let label = labels.get_pixel(point.x as u32, point.y as u32).0[0];
        (label != 0).then_some(label)
    } else {
        None
    };

    let label = match under_click {
        Some(label) => label,
        None => {
            let mut best: Option<(f64, u32)> = None;
            for (x, y, l) in labels.enumerate_pixels() {
                let l = l.0[0];
                if l == 0 {
                    continue;
                }
                let dx = x as f64 - point.x;
                let dy = y as f64 - point.y;
                let d2 = dx * dx + dy * dy;
                if best.is_none_or(|(best_d2, _)| d2 < best_d2) {
                    best = Some((d2, l));
                }
            }
            best.map(|(_, l)| l).ok_or(GrainError::EmptyMask)?
        }
    };

    let (width, height) = mask.dimensions();
    Ok(Mask::from_fn(width, height, |x, y| {
        labels.get_pixel(x, y).0[0] == label
    }))
}

/// Number of distinct foreground components in the mask.
pub fn count_components(mask: &Mask, connectivity: Connectivity) -> usize {
    let labels = connected_components(mask.as_image(), connectivity, Luma([0u8]));
    labels.pixels().map(|p| p.0[0]).max().unwrap_or(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 3x3 block at (2..5, 2..5) plus a single noise pixel at (10, 10).
    fn block_with_noise() -> Mask {
        Mask::from_fn(12, 12, |x, y| {
            ((2..5).contains(&x) && (2..5).contains(&y)) || (x == 10 && y == 10)
        })
    }

    #[test]
    fn test_keeps_component_under_click() {
        let mask = block_with_noise();
        assert_eq!(count_components(&mask, Connectivity::Eight), 2);

        let iso = isolate_component(&mask, Point::new(3.4, 3.6), Connectivity::Eight).unwrap();
        assert_eq!(iso.foreground_count(), 9);
        assert!(!iso.get(10, 10));

        let iso = isolate_component(&mask, Point::new(10.0, 10.0), Connectivity::Eight).unwrap();
        assert_eq!(iso.foreground_count(), 1);
        assert!(iso.get(10, 10));
    }

    #[test]
    fn test_click_on_background_picks_nearest_component() {
        let mask = block_with_noise();
        let iso = isolate_component(&mask, Point::new(8.0, 9.0), Connectivity::Eight).unwrap();
        assert_eq!(iso.foreground_count(), 1);

        let iso = isolate_component(&mask, Point::new(0.0, 0.0), Connectivity::Eight).unwrap();
        assert_eq!(iso.foreground_count(), 9);
    }

    #[test]
    fn test_click_outside_grid_still_resolves() {
        let mask = block_with_noise();
        let iso = isolate_component(&mask, Point::new(-5.0, -5.0), Connectivity::Eight).unwrap();
        assert_eq!(iso.foreground_count(), 9);
    }

    #[test]
    fn test_connectivity_matters_for_diagonals() {
        let mask = Mask::from_fn(4, 4, |x, y| x == y);
        assert_eq!(count_components(&mask, Connectivity::Eight), 1);
        assert_eq!(count_components(&mask, Connectivity::Four), 4);

        let iso = isolate_component(&mask, Point::new(0.0, 0.0), Connectivity::Four).unwrap();
        assert_eq!(iso.foreground_count(), 1);
    }

    #[test]
    fn test_empty_mask_is_rejected() {
        let mask = Mask::new(4, 4);
        assert!(matches!(
            isolate_component(&mask, Point::new(1.0, 1.0), Connectivity::Eight),
            Err(GrainError::EmptyMask)
        ));
    }
}
