use image::Rgba;
use imageproc::region_labelling::Connectivity;

use crate::geometry::DEFAULT_EPSILON;

/// How the grain area entering the sphericity ratio is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaMethod {
    /// Shoelace area of the traced outer contour (pixel centres).
    #[default]
    Polygon,
    /// Number of foreground pixels in the selected component.
    PixelCount,
}

/// Colours and sizes used by [`crate::overlay::draw_render_update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Tint painted over the pixels of the newest mask.
    pub mask_tint: Rgba<u8>,
    /// Colour of the enclosing circles.
    pub circle_color: Rgba<u8>,
    /// Colour of the click markers.
    pub marker_color: Rgba<u8>,
    pub marker_radius: i32,
    /// Alpha of the per-grain contour colours.
    pub contour_alpha: u8,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            // Light blue at 60% opacity.
            mask_tint: Rgba([30, 144, 255, 153]),
            circle_color: Rgba([0, 0, 0, 255]),
            marker_color: Rgba([0, 255, 255, 255]),
            marker_radius: 3,
            contour_alpha: 255,
        }
    }
}

/// Tunables of the sphericity engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Relative tolerance for the enclosing-circle boundary test.
    pub epsilon: f64,
    pub area_method: AreaMethod,
    /// Pixel adjacency used when isolating the clicked component.
    pub connectivity: Connectivity,
    pub overlay: OverlayStyle,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            area_method: AreaMethod::default(),
            connectivity: Connectivity::Eight,
            overlay: OverlayStyle::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_area_method(mut self, area_method: AreaMethod) -> Self {
        self.area_method = area_method;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_overlay(mut self, overlay: OverlayStyle) -> Self {
        self.overlay = overlay;
        self
    }
}
