//! Rayon-parallel scans (feature-gated).
//!
//! Placement rows are distributed across the pool; each task scans all x
//! positions of its row with the given kernel and the per-row winners are
//! reduced with the same tie-breaking as the sequential scan.

use crate::kernel::{placement_range, score_placement, Kernel};
use crate::scorer::{CorrelationSurface, MatchResult};
use crate::template::TemplatePlan;
use crate::util::FrameGateResult;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel best-placement scan.
pub fn scan_full_par<K: Kernel>(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
) -> FrameGateResult<MatchResult> {
    let (max_x, max_y) = placement_range(image, plan)?;

    let best = (0..=max_y)
        .into_par_iter()
        .map(|y| {
            let mut row_best = MatchResult {
                score: score_placement::<K>(image, plan, 0, y),
                x: 0,
                y,
            };
            for x in 1..=max_x {
                let candidate = MatchResult {
                    score: score_placement::<K>(image, plan, x, y),
                    x,
                    y,
                };
                if candidate.beats(&row_best) {
                    row_best = candidate;
                }
            }
            row_best
        })
        .reduce_with(|a, b| if b.beats(&a) { b } else { a });

    // The range check above guarantees at least one placement row.
    Ok(best.unwrap_or(MatchResult {
        score: score_placement::<K>(image, plan, 0, 0),
        x: 0,
        y: 0,
    }))
}

/// Row-parallel full surface evaluation.
pub fn surface_par<K: Kernel>(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
) -> FrameGateResult<CorrelationSurface> {
    let (max_x, max_y) = placement_range(image, plan)?;
    let width = max_x + 1;
    let height = max_y + 1;

    let mut scores = vec![0.0f32; width * height];
    scores
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = score_placement::<K>(image, plan, x, y);
            }
        });

    Ok(CorrelationSurface::new(scores, width, height))
}
