//! Reference templates.

use crate::image::{ImageView, OwnedImage};
use crate::util::FrameGateResult;

mod plan;

pub use plan::TemplatePlan;

/// Immutable grayscale template with its precomputed statistics.
#[derive(Clone, Debug)]
pub struct Template {
    id: String,
    plan: TemplatePlan,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    pub fn new(
        id: impl Into<String>,
        data: Vec<u8>,
        width: usize,
        height: usize,
    ) -> FrameGateResult<Self> {
        let img = OwnedImage::new(data, width, height)?;
        Self::from_image(id, &img)
    }

    /// Creates a template from an owned grayscale image.
    pub fn from_image(id: impl Into<String>, img: &OwnedImage) -> FrameGateResult<Self> {
        let plan = TemplatePlan::from_view(img.view())?;
        Ok(Self {
            id: id.into(),
            plan,
        })
    }

    /// Returns the identifier the template was loaded from.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.plan.width()
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.plan.height()
    }

    /// Returns a borrowed view of the template pixels.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.plan.view()
    }

    /// Returns the precomputed statistics.
    pub fn plan(&self) -> &TemplatePlan {
        &self.plan
    }
}
