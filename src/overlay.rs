//! Reference painter for [`RenderUpdate`]s.
//!
//! Interactive front ends paint updates themselves; this module rasterises one onto
//! an [`RgbaImage`] for headless use and debugging.

use image::{DynamicImage, Pixel, RgbImage, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};

use crate::{colors::grain_color, config::OverlayStyle, controller::RenderUpdate};

/// Paints the mask tint, grain contours, enclosing circles and click markers.
///
/// Grains are painted in session order so newer selections end up on top.
pub fn draw_render_update(canvas: &mut RgbaImage, update: &RenderUpdate, style: &OverlayStyle) {
    if let Some(mask) = &update.mask_overlay {
        let (width, height) = canvas.dimensions();
        for p in mask.foreground_pixels() {
            if p.x < width && p.y < height {
                canvas.get_pixel_mut(p.x, p.y).blend(&style.mask_tint);
            }
        }
    }

    for (i, grain) in update.grains.iter().enumerate() {
        let color = grain_color(i, style.contour_alpha);
        let points = &grain.contour.points;
        match points.as_slice() {
            [] => {}
            [only] => {
                if let (Ok(x), Ok(y)) = (u32::try_from(only.x), u32::try_from(only.y))
                    && x < canvas.width()
                    && y < canvas.height()
                {
                    canvas.put_pixel(x, y, color);
                }
            }
            _ => {
                for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
                    draw_line_segment_mut(
                        canvas,
                        (a.x as f32, a.y as f32),
                        (b.x as f32, b.y as f32),
                        color,
                    );
                }
            }
        }

        let center = (
            grain.circle.center.x.round() as i32,
            grain.circle.center.y.round() as i32,
        );
        draw_hollow_circle_mut(
            canvas,
            center,
            grain.circle.radius.round() as i32,
            style.circle_color,
        );
    }

    for marker in update.markers() {
        draw_filled_circle_mut(
            canvas,
            (marker.x.round() as i32, marker.y.round() as i32),
            style.marker_radius,
            style.marker_color,
        );
    }
}

/// Copies `base` to RGBA and paints `update` over it.
pub fn render_to_image(base: &RgbImage, update: &RenderUpdate, style: &OverlayStyle) -> RgbaImage {
    let mut canvas = DynamicImage::ImageRgb8(base.clone()).to_rgba8();
    draw_render_update(&mut canvas, update, style);
    canvas
}
