use thiserror::Error;

/// Errors raised while turning a click into a grain record.
///
/// `InvalidArgument` marks a broken internal contract and is expected to surface.
/// The remaining variants describe a rejected selection: the controller swallows
/// them and leaves the session untouched.
#[derive(Debug, Error)]
pub enum GrainError {
    /// A caller violated a precondition, e.g. an empty point set for circle fitting.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The mask handed to the metrics has no foreground pixel.
    #[error("mask has no foreground pixels")]
    EmptyMask,

    /// The segmentation oracle could not produce a mask.
    #[error("segmentation failed: {0}")]
    SegmentationFailed(String),

    /// The click lies outside the image.
    #[error("point ({x:.1}, {y:.1}) is outside the {width}x{height} image")]
    PointOutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    /// Image decoding failed.
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
}

impl GrainError {
    /// Whether this error only rejects a single selection.
    ///
    /// Contract violations return `false`.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GrainError::InvalidArgument(_))
    }
}
