//! Low-level building blocks for custom scoring pipelines.
//!
//! These expose the template statistics, the kernel trait and the concrete
//! kernels for callers that want per-placement scores or their own scan
//! order. Most users should prefer [`crate::FrameGate`] or
//! [`crate::match_template`].

pub use crate::frame::{luma_bt601, luma_from_packed};
pub use crate::kernel::scalar::ZnccScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::ZnccSimd;
pub use crate::kernel::{Kernel, WindowSums};
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::{scan_full_par, surface_par};
#[cfg(feature = "rayon")]
pub use crate::policy::evaluate_par;
pub use crate::policy::verdict_from_scores;
pub use crate::template::TemplatePlan;
