//! Frame adaptation from host pixel layouts to grayscale views.
//!
//! The host hands over a [`FrameRef`] describing its buffer. [`adapt`] turns it
//! into a [`FrameView`] the scorer can read: gray frames are borrowed as-is,
//! packed colour frames are reduced to one owned luma plane.

use crate::image::{ImageView, OwnedImage};
use crate::trace::trace_span;
use crate::util::{FrameGateError, FrameGateResult};

mod luma;

pub use luma::{luma_bt601, luma_from_packed};

/// Pixel layout of a host frame's first plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Packed 8-bit blue, green, red.
    Bgr24,
    /// Packed 8-bit red, green, blue.
    Rgb24,
    /// Packed 8-bit blue, green, red, alpha.
    Bgra32,
    /// Packed 8-bit red, green, blue, alpha.
    Rgba32,
    /// Single 8-bit luma channel.
    Gray8,
    /// Planar 4:2:0 YUV.
    Yuv420p,
    /// Semi-planar 4:2:0 YUV.
    Nv12,
}

impl PixelFormat {
    /// Bytes per pixel and the (red, green, blue) byte offsets for packed
    /// colour layouts. `None` for layouts the adapter does not convert.
    pub(crate) fn packed_layout(self) -> Option<(usize, [usize; 3])> {
        match self {
            PixelFormat::Bgr24 => Some((3, [2, 1, 0])),
            PixelFormat::Rgb24 => Some((3, [0, 1, 2])),
            PixelFormat::Bgra32 => Some((4, [2, 1, 0])),
            PixelFormat::Rgba32 => Some((4, [0, 1, 2])),
            PixelFormat::Gray8 | PixelFormat::Yuv420p | PixelFormat::Nv12 => None,
        }
    }
}

/// Borrowed description of a host frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameRef<'a> {
    /// Pixel bytes of the first plane, including row padding.
    pub data: &'a [u8],
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Bytes between the starts of consecutive rows.
    pub stride: usize,
    /// Layout of `data`.
    pub format: PixelFormat,
}

impl<'a> FrameRef<'a> {
    /// Describes a tightly packed frame (`stride == width * bytes_per_pixel`).
    pub fn packed(data: &'a [u8], width: usize, height: usize, format: PixelFormat) -> Self {
        let bpp = match format {
            PixelFormat::Gray8 => 1,
            other => other.packed_layout().map_or(1, |(bpp, _)| bpp),
        };
        Self {
            data,
            width,
            height,
            stride: width.saturating_mul(bpp),
            format,
        }
    }
}

/// A host frame that can expose its pixels without giving up ownership.
///
/// The filter reads the frame through this trait and then forwards the very
/// same object downstream on admit.
pub trait VideoFrame {
    /// Returns a borrowed description of the frame's pixels.
    fn frame_ref(&self) -> FrameRef<'_>;
}

/// Grayscale view of one frame, valid for one matching pass.
#[derive(Debug)]
pub enum FrameView<'a> {
    /// The host frame was already gray and is read in place.
    Borrowed(ImageView<'a, u8>),
    /// Luma converted from a colour frame.
    Owned(OwnedImage),
}

impl FrameView<'_> {
    /// Returns the grayscale pixels as a view.
    pub fn view(&self) -> ImageView<'_, u8> {
        match self {
            FrameView::Borrowed(view) => *view,
            FrameView::Owned(img) => img.view(),
        }
    }

    /// Returns the frame width in pixels.
    pub fn width(&self) -> usize {
        self.view().width()
    }

    /// Returns the frame height in pixels.
    pub fn height(&self) -> usize {
        self.view().height()
    }

    /// Returns true when the view reads the host buffer without copying.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, FrameView::Borrowed(_))
    }
}

/// Converts a host frame into a grayscale view of the same dimensions.
pub fn adapt(frame: FrameRef<'_>) -> FrameGateResult<FrameView<'_>> {
    let _span = trace_span!(
        "adapt_frame",
        width = frame.width,
        height = frame.height,
        format = ?frame.format
    )
    .entered();

    if frame.format == PixelFormat::Gray8 {
        let view = ImageView::new(frame.data, frame.width, frame.height, frame.stride)?;
        return Ok(FrameView::Borrowed(view));
    }

    let (bpp, rgb) = frame
        .format
        .packed_layout()
        .ok_or(FrameGateError::UnsupportedFormat {
            format: frame.format,
        })?;
    let row_bytes = frame
        .width
        .checked_mul(bpp)
        .ok_or(FrameGateError::InvalidDimensions {
            width: frame.width,
            height: frame.height,
        })?;
    // Validates geometry against the byte buffer before any pixel is read.
    let bytes = ImageView::new(frame.data, row_bytes, frame.height, frame.stride)?;
    let gray = luma_from_packed(bytes, bpp, rgb)?;
    Ok(FrameView::Owned(gray))
}
