//! Scalar reference kernel.

use crate::kernel::{Kernel, WindowSums};
use crate::template::TemplatePlan;
use crate::ImageView;

/// Scalar ZNCC kernel; the reference every other kernel must agree with.
pub struct ZnccScalar;

impl Kernel for ZnccScalar {
    fn window_sums(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> WindowSums {
        let tpl_width = plan.width();
        let mut sums = WindowSums::default();
        for (ty, tpl_row) in plan.data().chunks_exact(tpl_width).enumerate() {
            let img_row = image.row(y + ty).expect("row within bounds for scan");
            for (&t, &value) in tpl_row.iter().zip(&img_row[x..x + tpl_width]) {
                let v = value as u64;
                sums.sum += v;
                sums.sum_sq += v * v;
                sums.cross += t as u64 * v;
            }
        }
        sums
    }
}

#[cfg(test)]
mod tests {
    use super::ZnccScalar;
    use crate::kernel::Kernel;
    use crate::template::TemplatePlan;
    use crate::ImageView;

    fn pattern(width: usize, height: usize, a: usize, b: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(((x * a + y * b + x * y) & 0xFF) as u8);
            }
        }
        data
    }

    fn reference_zncc(image: ImageView<'_, u8>, tpl: &[u8], tw: usize, th: usize, x: usize, y: usize) -> f64 {
        let n = (tw * th) as f64;
        let mean_t = tpl.iter().map(|&v| v as f64).sum::<f64>() / n;
        let mut mean_i = 0.0;
        for ty in 0..th {
            for tx in 0..tw {
                mean_i += *image.get(x + tx, y + ty).unwrap() as f64;
            }
        }
        mean_i /= n;
        let (mut num, mut den_t, mut den_i) = (0.0f64, 0.0f64, 0.0f64);
        for ty in 0..th {
            for tx in 0..tw {
                let t = tpl[ty * tw + tx] as f64 - mean_t;
                let i = *image.get(x + tx, y + ty).unwrap() as f64 - mean_i;
                num += t * i;
                den_t += t * t;
                den_i += i * i;
            }
        }
        num / (den_t * den_i).sqrt()
    }

    #[test]
    fn scan_matches_bruteforce_reference() {
        let (img_width, img_height) = (9, 7);
        let image = pattern(img_width, img_height, 17, 9);
        let (tpl_width, tpl_height) = (3, 2);
        let tpl = pattern(tpl_width, tpl_height, 5, 11);

        let image_view = ImageView::from_slice(&image, img_width, img_height).unwrap();
        let tpl_view = ImageView::from_slice(&tpl, tpl_width, tpl_height).unwrap();
        let plan = TemplatePlan::from_view(tpl_view).unwrap();

        let best = ZnccScalar::scan_full(image_view, &plan).unwrap();

        let mut best_score = f64::NEG_INFINITY;
        let mut best_pos = (0, 0);
        for y in 0..=(img_height - tpl_height) {
            for x in 0..=(img_width - tpl_width) {
                let score = reference_zncc(image_view, &tpl, tpl_width, tpl_height, x, y);
                if score > best_score {
                    best_score = score;
                    best_pos = (x, y);
                }
            }
        }

        assert_eq!((best.x, best.y), best_pos);
        assert!((best.score as f64 - best_score).abs() < 1e-5);
    }

    #[test]
    fn strided_image_reads_only_visible_columns() {
        let tpl = [10u8, 20, 30, 40];
        // Two visible columns per row, the third is padding that must be ignored.
        let image = [10u8, 20, 255, 30, 40, 255];
        let image_view = ImageView::new(&image, 2, 2, 3).unwrap();
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 2, 2).unwrap()).unwrap();
        let score = ZnccScalar::score_at(image_view, &plan, 0, 0).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
    }
}
