//! The per-instance filter the host pipeline drives.
//!
//! `FrameGate` ties the pieces together: it owns the template store, adapts
//! each incoming frame, runs the admission policy and then either hands the
//! original frame to the downstream sink or drops it. Exactly one of the two
//! happens for every frame that is judged; a frame that fails is released and
//! the error is returned to the host.

use crate::frame::{adapt, VideoFrame};
use crate::policy::{evaluate, Decision, Evaluation, Verdict};
use crate::store::{TemplateSource, TemplateStore};
use crate::trace::trace_debug;
use crate::util::{FrameGateError, FrameGateResult};
use crate::ImageView;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

mod config;

pub use config::{FilterConfig, OPTION_SEPARATOR};

/// Downstream consumer of admitted frames.
pub trait FrameSink<F> {
    /// Takes ownership of an admitted frame.
    fn forward(&mut self, frame: F);
}

impl<F> FrameSink<F> for Vec<F> {
    fn forward(&mut self, frame: F) {
        self.push(frame);
    }
}

/// What happened to one input frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Handed to the sink unchanged.
    Forwarded,
    /// Released without forwarding.
    Dropped,
}

/// Disposition of a frame together with the scores that decided it.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutcome {
    /// Whether the frame was forwarded or dropped.
    pub disposition: Disposition,
    /// Verdict and evaluated template scores.
    pub decision: Decision,
}

/// Snapshot of the filter counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Frames received.
    pub frames: u64,
    /// Frames forwarded downstream.
    pub forwarded: u64,
    /// Frames dropped on a template match.
    pub dropped: u64,
    /// Frames that failed to be judged.
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    frames: AtomicU64,
    forwarded: AtomicU64,
    dropped: AtomicU64,
    failed: AtomicU64,
}

/// Template-matching admission filter.
#[derive(Debug)]
pub struct FrameGate {
    store: Arc<TemplateStore>,
    evaluation: Evaluation,
    parallel: bool,
    counters: Counters,
}

impl FrameGate {
    /// Creates a filter over an existing store.
    pub fn new(store: Arc<TemplateStore>) -> Self {
        Self {
            store,
            evaluation: Evaluation::FirstMatch,
            parallel: false,
            counters: Counters::default(),
        }
    }

    /// Validates `cfg` and loads its templates from `source`.
    pub fn from_config<S>(cfg: &FilterConfig, source: &S) -> FrameGateResult<Self>
    where
        S: TemplateSource + ?Sized,
    {
        let templates = cfg
            .templates
            .as_deref()
            .ok_or(FrameGateError::EmptyTemplateList)?;
        let store = TemplateStore::load_list(source, templates, cfg.threshold)?;
        Ok(Self::new(Arc::new(store))
            .with_evaluation(cfg.evaluation)
            .with_parallel(cfg.parallel))
    }

    /// Sets the evaluation mode.
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Scores every template on the rayon pool when the `rayon` feature is
    /// enabled; without it the setting falls back to sequential scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the shared template store.
    pub fn store(&self) -> &Arc<TemplateStore> {
        &self.store
    }

    /// Checks a negotiated frame size against the templates.
    pub fn configure(&self, width: usize, height: usize) -> FrameGateResult<()> {
        self.store.check_frame_size(width, height)
    }

    /// Judges a frame without consuming it.
    pub fn judge<F: VideoFrame + ?Sized>(&self, frame: &F) -> FrameGateResult<Decision> {
        let view = adapt(frame.frame_ref())?;
        self.run_policy(view.view())
    }

    /// Judges `frame` and either forwards it to `sink` or drops it.
    pub fn filter_frame<F, K>(&self, frame: F, sink: &mut K) -> FrameGateResult<FrameOutcome>
    where
        F: VideoFrame,
        K: FrameSink<F> + ?Sized,
    {
        self.counters.frames.fetch_add(1, Ordering::Relaxed);
        let decision = match self.judge(&frame) {
            Ok(decision) => decision,
            Err(err) => {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                return Err(err);
            }
        };

        let disposition = match decision.verdict {
            Verdict::Admit => {
                sink.forward(frame);
                self.counters.forwarded.fetch_add(1, Ordering::Relaxed);
                Disposition::Forwarded
            }
            Verdict::Drop => {
                if let Some(hit) = decision.trigger(self.store.threshold()) {
                    trace_debug!(
                        "frame_dropped",
                        template = hit.index,
                        score = hit.result.score,
                        x = hit.result.x,
                        y = hit.result.y
                    );
                }
                drop(frame);
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                Disposition::Dropped
            }
        };
        Ok(FrameOutcome {
            disposition,
            decision,
        })
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> FilterStats {
        FilterStats {
            frames: self.counters.frames.load(Ordering::Relaxed),
            forwarded: self.counters.forwarded.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    fn run_policy(&self, view: ImageView<'_, u8>) -> FrameGateResult<Decision> {
        if self.parallel {
            return self.run_parallel(view);
        }
        evaluate(view, &self.store, self.evaluation)
    }

    #[cfg(feature = "rayon")]
    fn run_parallel(&self, view: ImageView<'_, u8>) -> FrameGateResult<Decision> {
        crate::policy::evaluate_par(view, &self.store)
    }

    #[cfg(not(feature = "rayon"))]
    fn run_parallel(&self, view: ImageView<'_, u8>) -> FrameGateResult<Decision> {
        evaluate(view, &self.store, self.evaluation)
    }
}
