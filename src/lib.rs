//! Interactive sand-grain sphericity estimation on top of [imageproc].
//!
//! A click on an image is handed to a segmentation oracle ([`oracle::Segmenter`]);
//! the returned mask is reduced to the clicked grain, traced into a contour, fitted
//! with its smallest enclosing circle and scored by the area ratio between the two.
//! Confirmed grains accumulate in an undoable [`session::Session`] driven by
//! [`controller::InteractionController`].

mod colors;
pub mod config;
pub mod contours;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod metrics;
pub mod oracle;
pub mod overlay;
pub mod rect;
pub mod region_labelling;
pub mod session;

pub use config::{AreaMethod, EngineConfig, OverlayStyle};
pub use contours::Contour;
pub use controller::{InteractionController, PointerEvent, RenderUpdate, UpdateKind};
pub use error::GrainError;
pub use geometry::{Circle, smallest_enclosing_circle};
pub use mask::Mask;
pub use metrics::{Grain, compute_sphericity, describe_grain, fit_circle};
pub use oracle::{Segmenter, ThresholdSegmenter};
pub use session::Session;
