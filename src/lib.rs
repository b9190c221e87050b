//! FrameGate is a per-frame admission filter for video pipelines.
//!
//! Each frame is converted to grayscale and compared against a fixed set of
//! reference templates with zero-mean normalized cross-correlation (ZNCC). When
//! any template scores at or above the configured threshold the frame is
//! dropped; otherwise it is forwarded downstream unchanged.
//!
//! The host pipeline drives a [`FrameGate`]; the building blocks
//! ([`TemplateStore`], [`adapt`], [`score`], [`decide`]) are public for hosts
//! that want to wire the stages themselves. Optional features: `rayon`
//! (parallel scans and template scoring), `simd` (vectorized kernel via
//! `wide`), `image-io` (template decoding via `image`), `tracing`.

pub mod filter;
pub mod frame;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod policy;
pub mod scorer;
pub mod store;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use filter::{Disposition, FilterConfig, FilterStats, FrameGate, FrameOutcome, FrameSink};
pub use frame::{adapt, FrameRef, FrameView, PixelFormat, VideoFrame};
pub use crate::image::{ImageView, OwnedImage};
pub use policy::{decide, evaluate, Decision, Evaluation, TemplateScore, Verdict};
pub use scorer::{correlation_surface, match_template, score, CorrelationSurface, MatchResult};
pub use store::{parse_template_list, MemoryTemplateSource, TemplateSource, TemplateStore};
#[cfg(feature = "image-io")]
pub use store::FsTemplateSource;
pub use template::Template;
pub use util::{ErrorKind, FrameGateError, FrameGateResult};
