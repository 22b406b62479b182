//! The segmentation capability the controller calls on every primary click.
//!
//! Real deployments put a promptable segmentation model behind [`Segmenter`]; the
//! crate ships [`ThresholdSegmenter`], a deterministic model-free stand-in, and a
//! blanket impl so closures can serve as fakes.

use image::{RgbImage, imageops::grayscale};
use imageproc::{contrast::otsu_level, filter::gaussian_blur_f32, point::Point};

use crate::{error::GrainError, mask::Mask};

/// Produces a candidate grain mask for a click on an image.
pub trait Segmenter {
    /// # Errors
    ///
    /// [`GrainError::SegmentationFailed`] or [`GrainError::PointOutOfBounds`] when no
    /// mask can be produced. The controller treats both as "no grain added".
    fn segment(&mut self, image: &RgbImage, point: Point<f64>) -> Result<Mask, GrainError>;
}

impl<F> Segmenter for F
where
    F: FnMut(&RgbImage, Point<f64>) -> Result<Mask, GrainError>,
{
    fn segment(&mut self, image: &RgbImage, point: Point<f64>) -> Result<Mask, GrainError> {
        self(image, point)
    }
}

/// A candidate mask with the model's confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMask {
    pub mask: Mask,
    pub score: f32,
}

/// Picks the highest-scoring candidate, for models that answer one prompt with
/// several masks.
///
/// # Errors
///
/// [`GrainError::SegmentationFailed`] when there are no candidates.
pub fn best_candidate(candidates: Vec<ScoredMask>) -> Result<Mask, GrainError> {
    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|c| c.mask)
        .ok_or_else(|| GrainError::SegmentationFailed("model returned no candidates".to_string()))
}

/// Fails with [`GrainError::PointOutOfBounds`] if `point` is off the image.
pub fn check_bounds(image: &RgbImage, point: Point<f64>) -> Result<(), GrainError> {
    let (width, height) = image.dimensions();
    let inside = point.x >= 0.0
        && point.y >= 0.0
        && point.x < f64::from(width)
        && point.y < f64::from(height);
    if inside {
        Ok(())
    } else {
        Err(GrainError::PointOutOfBounds {
            x: point.x,
            y: point.y,
            width,
            height,
        })
    }
}

/// Whether grains are darker or lighter than the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    #[default]
    DarkObjects,
    LightObjects,
}

/// Blur + Otsu binarisation of the whole image.
///
/// The click only selects which component is kept later on, so the returned mask
/// may contain every grain in the picture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSegmenter {
    /// Gaussian blur sigma; `0.0` disables blurring.
    pub sigma: f32,
    pub polarity: Polarity,
}

impl Default for ThresholdSegmenter {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            polarity: Polarity::default(),
        }
    }
}

impl ThresholdSegmenter {
    pub fn new(sigma: f32, polarity: Polarity) -> Self {
        Self { sigma, polarity }
    }
}

impl Segmenter for ThresholdSegmenter {
    fn segment(&mut self, image: &RgbImage, point: Point<f64>) -> Result<Mask, GrainError> {
        check_bounds(image, point)?;

        let gray = grayscale(image);
        let blurred = if self.sigma > 0.0 {
            gaussian_blur_f32(&gray, self.sigma)
        } else {
            gray
        };
        let threshold = otsu_level(&blurred);
        log::debug!("otsu threshold {threshold} for {:?}", self.polarity);

        let (width, height) = blurred.dimensions();
        let mask = Mask::from_fn(width, height, |x, y| {
            let v = blurred.get_pixel(x, y).0[0];
            match self.polarity {
                Polarity::DarkObjects => v <= threshold,
                Polarity::LightObjects => v > threshold,
            }
        });

        if mask.is_empty() {
            return Err(GrainError::SegmentationFailed(
                "threshold produced no foreground".to_string(),
            ));
        }
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// White background with a dark 6x6 block at (4..10, 4..10).
    fn dark_block_image() -> RgbImage {
        RgbImage::from_fn(16, 16, |x, y| {
            if (4..10).contains(&x) && (4..10).contains(&y) {
                Rgb([20, 20, 20])
            } else {
                Rgb([230, 230, 230])
            }
        })
    }

    #[test]
    fn test_best_candidate_takes_highest_score() {
        let small = Mask::from_fn(4, 4, |x, y| x == 0 && y == 0);
        let big = Mask::from_fn(4, 4, |_, _| true);
        let picked = best_candidate(vec![
            ScoredMask {
                mask: small.clone(),
                score: 0.2,
            },
            ScoredMask {
                mask: big.clone(),
                score: 0.9,
            },
            ScoredMask {
                mask: small,
                score: 0.5,
            },
        ])
        .unwrap();
        assert_eq!(picked, big);

        assert!(matches!(
            best_candidate(Vec::new()),
            Err(GrainError::SegmentationFailed(_))
        ));
    }

    #[test]
    fn test_threshold_segments_dark_block() {
        let image = dark_block_image();
        let mut segmenter = ThresholdSegmenter::new(0.0, Polarity::DarkObjects);
        let mask = segmenter.segment(&image, Point::new(6.0, 6.0)).unwrap();
        assert_eq!(mask.foreground_count(), 36);
        assert!(mask.get(4, 4));
        assert!(!mask.get(3, 4));

        let mut light = ThresholdSegmenter::new(0.0, Polarity::LightObjects);
        let mask = light.segment(&image, Point::new(1.0, 1.0)).unwrap();
        assert_eq!(mask.foreground_count(), 16 * 16 - 36);
    }

    #[test]
    fn test_default_threshold_blurs_before_otsu() {
        let image = dark_block_image();
        let mut segmenter = ThresholdSegmenter::default();
        assert!(segmenter.sigma > 0.0);
        let mask = segmenter.segment(&image, Point::new(6.0, 6.0)).unwrap();
        for (x, y) in [(5, 5), (6, 6), (8, 8)] {
            assert!(mask.get(x, y), "({x}, {y}) should be foreground");
        }
        for (x, y) in [(0, 0), (12, 12), (15, 3)] {
            assert!(!mask.get(x, y), "({x}, {y}) should be background");
        }
        assert!((16..=64).contains(&mask.foreground_count()));
    }

    #[test]
    fn test_threshold_rejects_points_outside() {
        let image = dark_block_image();
        let mut segmenter = ThresholdSegmenter::default();
        assert!(matches!(
            segmenter.segment(&image, Point::new(16.0, 2.0)),
            Err(GrainError::PointOutOfBounds { width: 16, height: 16, .. })
        ));
        assert!(matches!(
            segmenter.segment(&image, Point::new(2.0, -0.5)),
            Err(GrainError::PointOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_closure_acts_as_segmenter() {
        let image = dark_block_image();
        let mut calls = 0;
        {
            let mut fake = |_: &RgbImage, _: Point<f64>| -> Result<Mask, GrainError> {
                calls += 1;
                Err(GrainError::SegmentationFailed("offline".to_string()))
            };
            assert!(fake.segment(&image, Point::new(1.0, 1.0)).is_err());
        }
        assert_eq!(calls, 1);
    }
}
