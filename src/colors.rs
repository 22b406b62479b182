use image::Rgba;
use palette::{FromColor, Hsl, Srgb};

/// Hue step between consecutive grains (golden angle), so that a grain keeps its
/// colour as the session grows and neighbours in selection order still contrast.
const HUE_STEP: f32 = 137.507_76;

/// Colour of the `index`-th grain of a session.
pub(crate) fn grain_color(index: usize, alpha: u8) -> Rgba<u8> {
    let hue = (index as f32 * HUE_STEP) % 360.0;

    let saturation = 0.9;
    let lightness = 0.5;

    let hsl_color = Hsl::new(hue, saturation, lightness);
    let srgb_linear = Srgb::from_color(hsl_color);
    let srgb_u8: Srgb<u8> = srgb_linear.into_format();

    Rgba([srgb_u8.red, srgb_u8.green, srgb_u8.blue, alpha])
}
