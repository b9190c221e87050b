//! Fixed-point BT.601 luma conversion.
//!
//! `Y = (1868 * B + 9617 * G + 4899 * R + 8192) >> 14`, the 14-bit integer
//! form of `0.114 B + 0.587 G + 0.299 R` with rounding. The weights sum to
//! `1 << 14`, so white maps to 255 and the result never overflows a byte.

use crate::image::{ImageView, OwnedImage};
use crate::util::FrameGateResult;

const SHIFT: u32 = 14;
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const ROUND: u32 = 1 << (SHIFT - 1);

/// Converts one RGB triple to luma.
#[inline]
pub fn luma_bt601(r: u8, g: u8, b: u8) -> u8 {
    let y = (R_WEIGHT * r as u32 + G_WEIGHT * g as u32 + B_WEIGHT * b as u32 + ROUND) >> SHIFT;
    y as u8
}

/// Converts a packed colour buffer to a contiguous luma image.
///
/// `bytes` is a view over raw bytes whose width is `pixels * bpp`; `rgb` gives
/// the byte offsets of red, green and blue inside one pixel.
pub fn luma_from_packed(
    bytes: ImageView<'_, u8>,
    bpp: usize,
    rgb: [usize; 3],
) -> FrameGateResult<OwnedImage> {
    let width = bytes.width() / bpp;
    let height = bytes.height();
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        if let Some(row) = bytes.row(y) {
            data.extend(
                row.chunks_exact(bpp)
                    .map(|px| luma_bt601(px[rgb[0]], px[rgb[1]], px[rgb[2]])),
            );
        }
    }
    OwnedImage::new(data, width, height)
}

#[cfg(test)]
mod tests {
    use super::luma_bt601;

    #[test]
    fn extremes_map_to_full_range() {
        assert_eq!(luma_bt601(0, 0, 0), 0);
        assert_eq!(luma_bt601(255, 255, 255), 255);
    }

    #[test]
    fn gray_inputs_are_preserved() {
        for v in [1u8, 17, 100, 128, 200, 254] {
            assert_eq!(luma_bt601(v, v, v), v);
        }
    }

    #[test]
    fn primaries_use_bt601_weights() {
        assert_eq!(luma_bt601(255, 0, 0), 76);
        assert_eq!(luma_bt601(0, 255, 0), 150);
        assert_eq!(luma_bt601(0, 0, 255), 29);
    }
}
