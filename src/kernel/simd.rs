//! SIMD-accelerated kernel using the `wide` crate.
//!
//! The template row loop is vectorized to process 8 pixels at a time with
//! `i32x8` lanes. Lane sums are folded into `u64` after every row, so the
//! accumulation stays exact and the kernel agrees bit-for-bit with the scalar
//! reference. Templates with rows wider than [`MAX_SIMD_ROW`] would overflow a
//! lane and are scored by the scalar kernel instead.

use crate::kernel::scalar::ZnccScalar;
use crate::kernel::{Kernel, WindowSums};
use crate::template::TemplatePlan;
use crate::ImageView;
use wide::i32x8;

const LANES: usize = 8;

/// Widest template row whose squared lane sums still fit in `i32`.
pub const MAX_SIMD_ROW: usize = (i32::MAX as usize / (255 * 255)) * LANES;

/// Load 8 u8 values and widen them to i32x8.
#[inline]
fn load_u8x8(slice: &[u8]) -> i32x8 {
    i32x8::from([
        slice[0] as i32,
        slice[1] as i32,
        slice[2] as i32,
        slice[3] as i32,
        slice[4] as i32,
        slice[5] as i32,
        slice[6] as i32,
        slice[7] as i32,
    ])
}

/// Horizontal sum of non-negative lanes.
#[inline]
fn hsum(v: i32x8) -> u64 {
    v.to_array().iter().map(|&lane| lane as u64).sum()
}

/// SIMD ZNCC kernel.
pub struct ZnccSimd;

impl Kernel for ZnccSimd {
    fn window_sums(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> WindowSums {
        let tpl_width = plan.width();
        if tpl_width > MAX_SIMD_ROW {
            return ZnccScalar::window_sums(image, plan, x, y);
        }
        let simd_end = tpl_width / LANES * LANES;
        let mut sums = WindowSums::default();

        for (ty, tpl_row) in plan.data().chunks_exact(tpl_width).enumerate() {
            let img_row = image.row(y + ty).expect("row within bounds for scan");
            let window = &img_row[x..x + tpl_width];

            let mut sum_vec = i32x8::splat(0);
            let mut sum_sq_vec = i32x8::splat(0);
            let mut cross_vec = i32x8::splat(0);
            let mut tx = 0;
            while tx < simd_end {
                let img_vals = load_u8x8(&window[tx..]);
                let tpl_vals = load_u8x8(&tpl_row[tx..]);
                sum_vec = sum_vec + img_vals;
                sum_sq_vec = sum_sq_vec + img_vals * img_vals;
                cross_vec = cross_vec + tpl_vals * img_vals;
                tx += LANES;
            }
            sums.sum += hsum(sum_vec);
            sums.sum_sq += hsum(sum_sq_vec);
            sums.cross += hsum(cross_vec);

            // Scalar remainder
            for (&t, &value) in tpl_row[simd_end..].iter().zip(&window[simd_end..]) {
                let v = value as u64;
                sums.sum += v;
                sums.sum_sq += v * v;
                sums.cross += t as u64 * v;
            }
        }
        sums
    }
}
