//! Error types for framegate.

use crate::frame::PixelFormat;
use thiserror::Error;

/// Result alias for framegate operations.
pub type FrameGateResult<T> = std::result::Result<T, FrameGateError>;

/// Broad class of a [`FrameGateError`], mirroring how the host must react.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fatal at initialization; the filter never starts processing frames.
    Configuration,
    /// The incoming frame layout cannot be converted; fatal for the pipeline.
    Format,
    /// The current frame cannot be scored; reported for that frame only.
    Match,
}

/// Errors that can occur while configuring the filter or processing frames.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FrameGateError {
    /// The template list is empty.
    #[error("template list is empty")]
    EmptyTemplateList,
    /// A template identifier between delimiters is empty.
    #[error("empty template identifier at position {index}")]
    EmptyIdentifier { index: usize },
    /// A template resource could not be read or decoded.
    #[error("failed to load template {id:?}: {reason}")]
    TemplateLoad { id: String, reason: String },
    /// The similarity threshold is outside `[0.0, 1.0]`.
    #[error("threshold {value} is outside [0.0, 1.0]")]
    ThresholdOutOfRange { value: f32 },
    /// An option key is not recognized.
    #[error("unknown option {key:?}")]
    UnknownOption { key: String },
    /// An option value could not be parsed.
    #[error("invalid value {value:?} for option {key:?}")]
    InvalidOption { key: String, value: String },
    /// A template does not fit inside the negotiated frame size.
    #[error(
        "template {id:?} ({tpl_width}x{tpl_height}) exceeds frame size {frame_width}x{frame_height}"
    )]
    TemplateExceedsFrame {
        id: String,
        tpl_width: usize,
        tpl_height: usize,
        frame_width: usize,
        frame_height: usize,
    },
    /// Image decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
    /// The frame pixel layout is not supported by the adapter.
    #[error("unsupported pixel format {format:?}")]
    UnsupportedFormat { format: PixelFormat },
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is shorter than a row.
    #[error("invalid stride {stride} for row length {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the declared geometry.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The template is larger than the frame it is matched against.
    #[error(
        "template {tpl_width}x{tpl_height} is larger than image {img_width}x{img_height}"
    )]
    TemplateLargerThanFrame {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A placement's top-left corner leaves the template partly outside the image.
    #[error("placement ({x}, {y}) is outside the valid range (0..={max_x}, 0..={max_y})")]
    PlacementOutOfRange {
        x: usize,
        y: usize,
        max_x: usize,
        max_y: usize,
    },
}

impl FrameGateError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrameGateError::EmptyTemplateList
            | FrameGateError::EmptyIdentifier { .. }
            | FrameGateError::TemplateLoad { .. }
            | FrameGateError::ThresholdOutOfRange { .. }
            | FrameGateError::UnknownOption { .. }
            | FrameGateError::InvalidOption { .. }
            | FrameGateError::TemplateExceedsFrame { .. }
            | FrameGateError::ImageIo { .. } => ErrorKind::Configuration,
            FrameGateError::UnsupportedFormat { .. }
            | FrameGateError::InvalidDimensions { .. }
            | FrameGateError::InvalidStride { .. }
            | FrameGateError::BufferTooSmall { .. } => ErrorKind::Format,
            FrameGateError::TemplateLargerThanFrame { .. }
            | FrameGateError::PlacementOutOfRange { .. } => ErrorKind::Match,
        }
    }
}
