//! Template decoding via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Colour images are reduced
//! with the same BT.601 weights the frame adapter uses, so a template cut out
//! of a decoded frame matches that frame exactly.

use crate::frame::luma_bt601;
use crate::image::{ImageView, OwnedImage};
use crate::util::{FrameGateError, FrameGateResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> FrameGateResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Creates an owned grayscale image from a dynamic image.
///
/// 8-bit gray input is copied as-is; everything else goes through RGB8 and
/// BT.601 luma. Alpha is ignored.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> FrameGateResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = match img {
        image::DynamicImage::ImageLuma8(gray) => gray.as_raw().clone(),
        other => other
            .to_rgb8()
            .pixels()
            .map(|px| luma_bt601(px[0], px[1], px[2]))
            .collect(),
    };
    OwnedImage::new(data, width, height)
}

/// Decodes an in-memory encoded image into a grayscale owned image.
pub fn decode_gray_image(bytes: &[u8]) -> FrameGateResult<OwnedImage> {
    let img = image::load_from_memory(bytes).map_err(|err| FrameGateError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Loads an image from disk and converts it to a grayscale owned image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> FrameGateResult<OwnedImage> {
    let img = image::open(path).map_err(|err| FrameGateError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
