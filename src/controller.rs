//! Pointer events in, render updates out.
//!
//! [`InteractionController`] owns the image, the segmentation oracle and the
//! [`Session`] for that image. It never draws; every call returns a
//! [`RenderUpdate`] describing what the canvas should show next.

use std::path::Path;

use image::RgbImage;
use imageproc::point::Point;

use crate::{
    config::EngineConfig,
    error::GrainError,
    mask::Mask,
    metrics::{Grain, describe_grain},
    oracle::Segmenter,
    session::Session,
};

/// Raw pointer input from the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button: select the grain under the point.
    Primary(Point<f64>),
    /// Secondary button: undo the newest selection.
    Secondary,
}

/// What happened in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    GrainAdded,
    GrainRemoved,
    /// Segmentation or metric extraction failed; the session is unchanged.
    Rejected(String),
    /// Secondary click on an empty session.
    NothingToUndo,
}

/// Everything the canvas collaborator needs to repaint the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderUpdate {
    pub kind: UpdateKind,
    /// Newest click marker, if any.
    pub marker: Option<Point<f64>>,
    /// Mask of the selection just made, shown as a tint.
    pub mask_overlay: Option<Mask>,
    /// All session grains in insertion order.
    pub grains: Vec<Grain>,
}

impl RenderUpdate {
    /// Whether the session changed and the overlay must be repainted.
    pub fn needs_redraw(&self) -> bool {
        matches!(self.kind, UpdateKind::GrainAdded | UpdateKind::GrainRemoved)
    }

    /// Click markers of every grain, oldest first, followed by the newest click when
    /// it did not yield a grain (a rejected selection).
    pub fn markers(&self) -> Vec<Point<f64>> {
        let mut markers: Vec<_> = self.grains.iter().map(|g| g.click).collect();
        if let Some(marker) = self.marker
            && !markers.contains(&marker)
        {
            markers.push(marker);
        }
        markers
    }
}

/// Drives one image's selection session.
///
/// Event handlers take `&mut self`, so an event is fully processed, from the oracle
/// call to the session update, before the next one can be handled. Appends therefore
/// land in click order and undo always sees the latest append.
pub struct InteractionController<S> {
    image: RgbImage,
    segmenter: S,
    session: Session,
    config: EngineConfig,
}

impl<S: Segmenter> InteractionController<S> {
    /// Starts an empty session on `image`.
    pub fn new(image: RgbImage, segmenter: S, config: EngineConfig) -> Self {
        log::info!(
            "opened {}x{} image, session empty",
            image.width(),
            image.height()
        );
        Self {
            image,
            segmenter,
            session: Session::new(),
            config,
        }
    }

    /// Loads the image at `path` and starts an empty session on it.
    ///
    /// # Errors
    ///
    /// [`GrainError::Image`] when the file cannot be read or decoded.
    pub fn open<P: AsRef<Path>>(
        path: P,
        segmenter: S,
        config: EngineConfig,
    ) -> Result<Self, GrainError> {
        let image = image::open(path)?.to_rgb8();
        Ok(Self::new(image, segmenter, config))
    }

    /// Switches to another image and discards the current session.
    pub fn load_image(&mut self, image: RgbImage) {
        log::info!(
            "opened {}x{} image, discarding {} grain(s)",
            image.width(),
            image.height(),
            self.session.len()
        );
        self.image = image;
        self.session = Session::new();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dispatches a pointer event.
    ///
    /// # Errors
    ///
    /// Only contract violations ([`GrainError::InvalidArgument`]) are returned.
    pub fn handle(&mut self, event: PointerEvent) -> Result<RenderUpdate, GrainError> {
        match event {
            PointerEvent::Primary(point) => self.on_primary_click(point),
            PointerEvent::Secondary => Ok(self.on_secondary_click()),
        }
    }

    /// Segments at `point`, measures the grain and appends it to the session.
    ///
    /// Recoverable failures produce an [`UpdateKind::Rejected`] update and leave the
    /// session untouched.
    ///
    /// # Errors
    ///
    /// Contract violations ([`GrainError::InvalidArgument`]) propagate.
    pub fn on_primary_click(&mut self, point: Point<f64>) -> Result<RenderUpdate, GrainError> {
        let outcome = self
            .segmenter
            .segment(&self.image, point)
            .and_then(|mask| describe_grain(point, &mask, &self.config).map(|g| (g, mask)));

        match outcome {
            Ok((grain, mask)) => {
                self.session.append(grain);
                log::debug!("session holds {} grain(s)", self.session.len());
                Ok(self.update(UpdateKind::GrainAdded, Some(point), Some(mask)))
            }
            Err(e) if e.is_recoverable() => {
                log::warn!(
                    "selection at ({:.1}, {:.1}) rejected: {e}",
                    point.x,
                    point.y
                );
                Ok(self.update(UpdateKind::Rejected(e.to_string()), Some(point), None))
            }
            Err(e) => Err(e),
        }
    }

    /// Undoes the newest selection, if any.
    pub fn on_secondary_click(&mut self) -> RenderUpdate {
        match self.session.remove_last() {
            Some(removed) => {
                log::info!(
                    "removed grain at ({:.1}, {:.1}), {} left",
                    removed.click.x,
                    removed.click.y,
                    self.session.len()
                );
                let marker = self.session.last().map(|g| g.click);
                self.update(UpdateKind::GrainRemoved, marker, None)
            }
            None => {
                log::debug!("nothing to undo");
                self.update(UpdateKind::NothingToUndo, None, None)
            }
        }
    }

    fn update(
        &self,
        kind: UpdateKind,
        marker: Option<Point<f64>>,
        mask_overlay: Option<Mask>,
    ) -> RenderUpdate {
        RenderUpdate {
            kind,
            marker,
            mask_overlay,
            grains: self.session.all().to_vec(),
        }
    }
}
