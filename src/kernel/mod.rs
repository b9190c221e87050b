//! Correlation kernel implementations.
//!
//! A kernel only decides how the raw sums of one placement are accumulated;
//! turning sums into a coefficient, walking the placement grid and choosing
//! the best placement are shared by every kernel so they cannot disagree.

use crate::scorer::{CorrelationSurface, MatchResult};
use crate::template::TemplatePlan;
use crate::util::{FrameGateError, FrameGateResult};
use crate::ImageView;

/// Exact integer sums of one window placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowSums {
    /// Σ i over the window.
    pub sum: u64,
    /// Σ i² over the window.
    pub sum_sq: u64,
    /// Σ t·i between template and window.
    pub cross: u64,
}

/// Kernel trait for placement scoring and full scans.
pub trait Kernel {
    /// Accumulates the sums for the placement with top-left corner `(x, y)`.
    ///
    /// Callers guarantee the placement lies inside the image.
    fn window_sums(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize)
        -> WindowSums;

    /// Computes the coefficient at a single placement.
    ///
    /// Fails when the template does not fit the image or the placement leaves
    /// part of the template outside it.
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> FrameGateResult<f32> {
        let (max_x, max_y) = placement_range(image, plan)?;
        if x > max_x || y > max_y {
            return Err(FrameGateError::PlacementOutOfRange { x, y, max_x, max_y });
        }
        Ok(score_placement::<Self>(image, plan, x, y))
    }

    /// Scans every placement and returns the best one.
    fn scan_full(image: ImageView<'_, u8>, plan: &TemplatePlan) -> FrameGateResult<MatchResult> {
        let (max_x, max_y) = placement_range(image, plan)?;
        let mut best = MatchResult {
            score: score_placement::<Self>(image, plan, 0, 0),
            x: 0,
            y: 0,
        };
        for y in 0..=max_y {
            for x in 0..=max_x {
                if x == 0 && y == 0 {
                    continue;
                }
                let candidate = MatchResult {
                    score: score_placement::<Self>(image, plan, x, y),
                    x,
                    y,
                };
                if candidate.beats(&best) {
                    best = candidate;
                }
            }
        }
        Ok(best)
    }

    /// Evaluates every placement and returns the full surface.
    fn surface(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
    ) -> FrameGateResult<CorrelationSurface> {
        let (max_x, max_y) = placement_range(image, plan)?;
        let width = max_x + 1;
        let height = max_y + 1;
        let mut scores = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                scores.push(score_placement::<Self>(image, plan, x, y));
            }
        }
        Ok(CorrelationSurface::new(scores, width, height))
    }
}

/// Returns the largest valid top-left placement `(max_x, max_y)`.
pub(crate) fn placement_range(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
) -> FrameGateResult<(usize, usize)> {
    let img_width = image.width();
    let img_height = image.height();
    let tpl_width = plan.width();
    let tpl_height = plan.height();
    if img_width < tpl_width || img_height < tpl_height {
        return Err(FrameGateError::TemplateLargerThanFrame {
            tpl_width,
            tpl_height,
            img_width,
            img_height,
        });
    }
    Ok((img_width - tpl_width, img_height - tpl_height))
}

/// Scores a placement already known to lie inside the image.
#[inline]
pub(crate) fn score_placement<K: Kernel + ?Sized>(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    x: usize,
    y: usize,
) -> f32 {
    zncc_from_sums(plan, K::window_sums(image, plan, x, y))
}

/// Turns raw placement sums into a coefficient in `[-1, 1]`.
///
/// A uniform template or window has no defined coefficient. Such placements
/// score 0.0, except when both sides are uniform at the same intensity: the
/// patches are then pixel-identical and score 1.0.
pub(crate) fn zncc_from_sums(plan: &TemplatePlan, window: WindowSums) -> f32 {
    let n = plan.count() as i128;
    let sum_t = plan.sum() as i128;
    let sum_i = window.sum as i128;
    let var_t = plan.var_scaled() as i128;
    let var_i = n * window.sum_sq as i128 - sum_i * sum_i;

    if var_t == 0 || var_i == 0 {
        if var_t == 0 && var_i == 0 && sum_t == sum_i {
            return 1.0;
        }
        return 0.0;
    }

    let num = n * window.cross as i128 - sum_t * sum_i;
    let denom = (var_t as f64).sqrt() * (var_i as f64).sqrt();
    (num as f64 / denom).clamp(-1.0, 1.0) as f32
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;
