//! Template store: the immutable set of templates and the drop threshold.
//!
//! The store is built once when the filter starts. Loading is all-or-nothing:
//! the first identifier that cannot be read or decoded aborts the load, so the
//! filter never runs with a template silently missing. After construction the
//! store is only read, and can be shared across threads behind an `Arc`.

use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::{FrameGateError, FrameGateResult};

mod parse;
mod source;

pub use parse::{parse_template_list, TEMPLATE_DELIMITER};
#[cfg(feature = "image-io")]
pub use source::FsTemplateSource;
pub use source::{MemoryTemplateSource, TemplateSource};

/// Default similarity cutoff for dropping a frame.
pub const DEFAULT_THRESHOLD: f32 = 0.7;

/// Ordered, immutable templates plus the drop threshold.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    templates: Vec<Template>,
    threshold: f32,
}

impl TemplateStore {
    /// Loads every identifier from `source` in order.
    pub fn load<S, I>(source: &S, ids: I, threshold: f32) -> FrameGateResult<Self>
    where
        S: TemplateSource + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        validate_threshold(threshold)?;
        let _span = trace_span!("load_templates", threshold = threshold).entered();

        let mut templates = Vec::new();
        for id in ids {
            let id = id.as_ref();
            if id.is_empty() {
                return Err(FrameGateError::EmptyIdentifier {
                    index: templates.len(),
                });
            }
            let template = source
                .load_gray(id)
                .and_then(|img| Template::from_image(id, &img))
                .map_err(|err| FrameGateError::TemplateLoad {
                    id: id.to_string(),
                    reason: err.to_string(),
                })?;
            trace_event!(
                "template_loaded",
                id = id,
                width = template.width(),
                height = template.height(),
                uniform = template.plan().is_uniform()
            );
            templates.push(template);
        }

        Self::from_templates(templates, threshold)
    }

    /// Parses a comma-separated list and loads it from `source`.
    pub fn load_list<S>(source: &S, list: &str, threshold: f32) -> FrameGateResult<Self>
    where
        S: TemplateSource + ?Sized,
    {
        validate_threshold(threshold)?;
        let ids = parse_template_list(list)?;
        Self::load(source, &ids, threshold)
    }

    /// Builds a store from already decoded templates.
    pub fn from_templates(templates: Vec<Template>, threshold: f32) -> FrameGateResult<Self> {
        validate_threshold(threshold)?;
        if templates.is_empty() {
            return Err(FrameGateError::EmptyTemplateList);
        }
        Ok(Self {
            templates,
            threshold,
        })
    }

    /// Returns the templates in configuration order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Returns the number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always false for a constructed store; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Returns the drop threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Checks that every template fits inside a `width` x `height` frame.
    pub fn check_frame_size(&self, width: usize, height: usize) -> FrameGateResult<()> {
        match self
            .templates
            .iter()
            .find(|t| t.width() > width || t.height() > height)
        {
            Some(t) => Err(FrameGateError::TemplateExceedsFrame {
                id: t.id().to_string(),
                tpl_width: t.width(),
                tpl_height: t.height(),
                frame_width: width,
                frame_height: height,
            }),
            None => Ok(()),
        }
    }
}

/// Rejects thresholds outside `[0.0, 1.0]`, including NaN.
pub fn validate_threshold(threshold: f32) -> FrameGateResult<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(FrameGateError::ThresholdOutOfRange { value: threshold })
    }
}
