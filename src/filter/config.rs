//! Filter options.
//!
//! Options arrive as a filter-argument string, `key=value` pairs separated by
//! `:` (for example `threshold=0.8:templates=logo.png,banner.png`). Keys are
//! `threshold`, `templates`, `mode` (`first` or `all`) and `parallel`.
//! A literal colon inside a value is written `\:`, so a template on a Windows
//! drive reads `templates=C\:\logos\a.png`.

use crate::policy::Evaluation;
use crate::store::{validate_threshold, DEFAULT_THRESHOLD};
use crate::util::{FrameGateError, FrameGateResult};

/// Separator between `key=value` pairs.
pub const OPTION_SEPARATOR: char = ':';

/// Configuration of one filter instance.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterConfig {
    /// Similarity cutoff in `[0.0, 1.0]`; a frame is dropped at or above it.
    pub threshold: f32,
    /// Comma-separated template identifiers. Required.
    pub templates: Option<String>,
    /// How many templates to score per frame.
    pub evaluation: Evaluation,
    /// Score templates on the rayon pool (ignored without the `rayon` feature).
    pub parallel: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            templates: None,
            evaluation: Evaluation::FirstMatch,
            parallel: false,
        }
    }
}

impl FilterConfig {
    /// Parses a filter-argument string on top of the defaults.
    pub fn from_options(options: &str) -> FrameGateResult<Self> {
        let mut cfg = Self::default();
        cfg.apply_options(options)?;
        Ok(cfg)
    }

    /// Applies every `key=value` pair of `options` in order.
    pub fn apply_options(&mut self, options: &str) -> FrameGateResult<()> {
        for pair in split_options(options).iter().filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| FrameGateError::InvalidOption {
                    key: pair.to_string(),
                    value: String::new(),
                })?;
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Applies one option.
    pub fn set(&mut self, key: &str, value: &str) -> FrameGateResult<()> {
        let invalid = || FrameGateError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "threshold" => {
                let threshold: f32 = value.parse().map_err(|_| invalid())?;
                validate_threshold(threshold)?;
                self.threshold = threshold;
            }
            "templates" => self.templates = Some(value.to_string()),
            "mode" => {
                self.evaluation = match value {
                    "first" => Evaluation::FirstMatch,
                    "all" => Evaluation::AllTemplates,
                    _ => return Err(invalid()),
                }
            }
            "parallel" => {
                self.parallel = match value {
                    "1" | "true" => true,
                    "0" | "false" => false,
                    _ => return Err(invalid()),
                }
            }
            _ => {
                return Err(FrameGateError::UnknownOption {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Sets the threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the template list.
    pub fn with_templates(mut self, templates: impl Into<String>) -> Self {
        self.templates = Some(templates.into());
        self
    }

    /// Sets the evaluation mode.
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Enables or disables parallel template scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Splits on unescaped separators; `\:` becomes a literal `:`. Any other
/// backslash is kept as-is.
fn split_options(options: &str) -> Vec<String> {
    let mut pairs = Vec::new();
    let mut current = String::new();
    let mut chars = options.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&OPTION_SEPARATOR) => {
                current.push(OPTION_SEPARATOR);
                chars.next();
            }
            OPTION_SEPARATOR => pairs.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    pairs.push(current);
    pairs
}
