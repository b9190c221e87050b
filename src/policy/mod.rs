//! Admission policy: folds per-template scores into ADMIT or DROP.
//!
//! A frame is dropped as soon as one template scores at or above the store
//! threshold. The predicate is a monotone OR over templates, so stopping at
//! the first hit and scoring every template give the same verdict; the
//! evaluation mode only changes how much diagnostic detail is collected.

use crate::scorer::{match_template, MatchResult};
use crate::store::TemplateStore;
use crate::util::FrameGateResult;
use crate::ImageView;

/// Outcome for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Forward the frame downstream unchanged.
    Admit,
    /// Release the frame and forward nothing.
    Drop,
}

/// How many templates to score per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Evaluation {
    /// Stop at the first template that reaches the threshold.
    #[default]
    FirstMatch,
    /// Score every template, for per-template diagnostics.
    AllTemplates,
}

/// Score of one template against the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemplateScore {
    /// Index of the template in store order.
    pub index: usize,
    /// Best placement and its coefficient.
    pub result: MatchResult,
}

/// Verdict plus the template scores that were evaluated to reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    /// The admission verdict.
    pub verdict: Verdict,
    /// Evaluated templates in store order. With [`Evaluation::FirstMatch`] the
    /// list ends at the first template that triggered a drop.
    pub scores: Vec<TemplateScore>,
}

impl Decision {
    /// The first template that reached the threshold, if any.
    pub fn trigger(&self, threshold: f32) -> Option<&TemplateScore> {
        self.scores.iter().find(|s| s.result.score >= threshold)
    }
}

/// Decides whether the frame passes, short-circuiting on the first hit.
pub fn decide(view: ImageView<'_, u8>, store: &TemplateStore) -> FrameGateResult<Verdict> {
    evaluate(view, store, Evaluation::FirstMatch).map(|d| d.verdict)
}

/// Scores templates in store order and returns the verdict with its scores.
///
/// The first scoring failure aborts evaluation; no verdict is produced for a
/// frame that could not be fully judged.
pub fn evaluate(
    view: ImageView<'_, u8>,
    store: &TemplateStore,
    mode: Evaluation,
) -> FrameGateResult<Decision> {
    let threshold = store.threshold();
    let mut scores = Vec::with_capacity(store.len());
    let mut verdict = Verdict::Admit;
    for (index, template) in store.templates().iter().enumerate() {
        let result = match_template(view, template)?;
        scores.push(TemplateScore { index, result });
        if result.score >= threshold {
            verdict = Verdict::Drop;
            if mode == Evaluation::FirstMatch {
                break;
            }
        }
    }
    Ok(Decision { verdict, scores })
}

/// Scores every template on the rayon pool, then applies the verdict rule.
///
/// One task per template; all results are joined before the verdict and the
/// first failure in store order is returned.
#[cfg(feature = "rayon")]
pub fn evaluate_par(view: ImageView<'_, u8>, store: &TemplateStore) -> FrameGateResult<Decision> {
    use rayon::prelude::*;

    let results: Vec<FrameGateResult<MatchResult>> = store
        .templates()
        .par_iter()
        .map(|template| match_template(view, template))
        .collect();

    let mut scores = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        scores.push(TemplateScore {
            index,
            result: result?,
        });
    }
    let verdict = verdict_from_scores(scores.iter().map(|s| s.result.score), store.threshold());
    Ok(Decision { verdict, scores })
}

/// Pure verdict rule over already computed scores.
pub fn verdict_from_scores<I>(scores: I, threshold: f32) -> Verdict
where
    I: IntoIterator<Item = f32>,
{
    if scores.into_iter().any(|score| score >= threshold) {
        Verdict::Drop
    } else {
        Verdict::Admit
    }
}
