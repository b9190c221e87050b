//! Full correlation surface for diagnostics.

use crate::scorer::MatchResult;

/// Coefficients for every placement, row-major.
///
/// The surface is `(frame_h - tpl_h + 1)` rows by `(frame_w - tpl_w + 1)`
/// columns; entry `(x, y)` is the score with the template's top-left corner at
/// `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationSurface {
    scores: Vec<f32>,
    width: usize,
    height: usize,
}

impl CorrelationSurface {
    pub(crate) fn new(scores: Vec<f32>, width: usize, height: usize) -> Self {
        debug_assert_eq!(scores.len(), width * height);
        Self {
            scores,
            width,
            height,
        }
    }

    /// Number of horizontal placements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertical placements.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major scores.
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Best placement, ties resolved to the first in row-major order.
    pub fn best(&self) -> Option<MatchResult> {
        let mut best: Option<MatchResult> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            let candidate = MatchResult {
                score,
                x: idx % self.width,
                y: idx / self.width,
            };
            if best.map_or(true, |b| candidate.beats(&b)) {
                best = Some(candidate);
            }
        }
        best
    }
}
