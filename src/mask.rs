use image::{GrayImage, Luma};
use imageproc::point::Point;

const FOREGROUND: Luma<u8> = Luma([255]);

/// Binary per-pixel membership map of a candidate grain.
///
/// Backed by a [`GrayImage`]; any non-zero pixel counts as foreground, which is the
/// convention `imageproc::contours::find_contours` expects.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    image: GrayImage,
}

impl Mask {
    /// An all-background mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        Self {
            image: GrayImage::from_fn(width, height, |x, y| {
                if f(x, y) { FOREGROUND } else { Luma([0]) }
            }),
        }
    }

    /// Wraps an existing binary image, normalising foreground to 255.
    pub fn from_image(mut image: GrayImage) -> Self {
        for p in image.pixels_mut() {
            if p.0[0] != 0 {
                *p = FOREGROUND;
            }
        }
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Foreground test; out-of-range coordinates read as background.
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && self.image.get_pixel(x, y).0[0] != 0
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        self.image
            .put_pixel(x, y, if value { FOREGROUND } else { Luma([0]) });
    }

    /// Whether a real-valued point falls on a pixel of the grid.
    pub fn contains(&self, point: Point<f64>) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width() as f64
            && point.y < self.height() as f64
    }

    pub fn foreground_count(&self) -> usize {
        self.image.pixels().filter(|p| p.0[0] != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.image.pixels().any(|p| p.0[0] != 0)
    }

    /// Coordinates of every foreground pixel in row-major order.
    pub fn foreground_pixels(&self) -> impl Iterator<Item = Point<u32>> + '_ {
        self.image
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] != 0)
            .map(|(x, y, _)| Point::new(x, y))
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_and_counts() {
        let mask = Mask::from_fn(4, 3, |x, y| x == y);
        assert_eq!(mask.dimensions(), (4, 3));
        assert_eq!(mask.foreground_count(), 3);
        assert!(mask.get(2, 2));
        assert!(!mask.get(3, 2));
        assert!(!mask.get(10, 10), "out of range reads as background");
        let pixels: Vec<_> = mask.foreground_pixels().collect();
        assert_eq!(pixels, vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]);
    }

    #[test]
    fn test_from_image_normalises_foreground() {
        let mut img = GrayImage::new(2, 2);
        img.put_pixel(1, 0, Luma([7]));
        let mask = Mask::from_image(img);
        assert_eq!(mask.as_image().get_pixel(1, 0).0[0], 255);
        assert_eq!(mask.foreground_count(), 1);
    }

    #[test]
    fn test_empty_and_contains() {
        let mut mask = Mask::new(5, 5);
        assert!(mask.is_empty());
        mask.set(0, 4, true);
        assert!(!mask.is_empty());
        assert!(mask.contains(Point::new(4.9, 0.0)));
        assert!(!mask.contains(Point::new(5.0, 0.0)));
        assert!(!mask.contains(Point::new(-0.1, 2.0)));
    }
}
