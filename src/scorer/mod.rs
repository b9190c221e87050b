//! Sliding-window similarity scoring.
//!
//! A template is compared against every placement inside the frame with the
//! zero-mean normalized cross-correlation coefficient; the best placement is
//! the frame's score for that template.

use crate::kernel::Kernel;
use crate::template::Template;
use crate::util::FrameGateResult;
use crate::ImageView;
use std::cmp::Ordering;

mod surface;

pub use surface::CorrelationSurface;

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::ZnccScalar as Zncc;
#[cfg(feature = "simd")]
use crate::kernel::simd::ZnccSimd as Zncc;

/// Best placement of one template inside one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// Correlation coefficient in `[-1, 1]`.
    pub score: f32,
    /// Column of the template's top-left corner.
    pub x: usize,
    /// Row of the template's top-left corner.
    pub y: usize,
}

impl MatchResult {
    /// Higher score first; ties go to the earlier placement in row-major order.
    pub(crate) fn cmp_rank(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.y.cmp(&self.y))
            .then_with(|| other.x.cmp(&self.x))
    }

    pub(crate) fn beats(&self, other: &Self) -> bool {
        self.cmp_rank(other) == Ordering::Greater
    }
}

/// Returns the best correlation coefficient of `template` inside `view`.
///
/// Fails with `TemplateLargerThanFrame` when the template does not fit.
pub fn score(view: ImageView<'_, u8>, template: &Template) -> FrameGateResult<f32> {
    match_template(view, template).map(|m| m.score)
}

/// Returns the best placement of `template` inside `view`.
pub fn match_template(view: ImageView<'_, u8>, template: &Template) -> FrameGateResult<MatchResult> {
    Zncc::scan_full(view, template.plan())
}

/// Row-parallel variant of [`match_template`]; results are identical.
#[cfg(feature = "rayon")]
pub fn match_template_par(
    view: ImageView<'_, u8>,
    template: &Template,
) -> FrameGateResult<MatchResult> {
    crate::kernel::rayon::scan_full_par::<Zncc>(view, template.plan())
}

/// Returns the coefficient of every placement of `template` inside `view`.
pub fn correlation_surface(
    view: ImageView<'_, u8>,
    template: &Template,
) -> FrameGateResult<CorrelationSurface> {
    #[cfg(feature = "rayon")]
    {
        crate::kernel::rayon::surface_par::<Zncc>(view, template.plan())
    }
    #[cfg(not(feature = "rayon"))]
    {
        Zncc::surface(view, template.plan())
    }
}
