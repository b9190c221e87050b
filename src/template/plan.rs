//! Template statistics precomputed once at load time.

use crate::image::{ImageView, OwnedImage};
use crate::util::{FrameGateError, FrameGateResult};

/// Precomputed sums for zero-mean normalized cross-correlation.
///
/// Sums are kept as exact integers; only the final coefficient is rounded.
/// `var_scaled` is `n * Σt² − (Σt)²`, i.e. `n²` times the population variance,
/// and is zero exactly when the template is uniform.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    img: OwnedImage,
    count: u64,
    sum: u64,
    sum_sq: u64,
    var_scaled: u128,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> FrameGateResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(FrameGateError::InvalidDimensions { width, height })?;

        let mut data = Vec::with_capacity(count);
        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        for y in 0..height {
            let row = tpl.row(y).ok_or(FrameGateError::BufferTooSmall {
                needed: y * tpl.stride() + width,
                got: tpl.as_slice().len(),
            })?;
            for &value in row {
                let v = value as u64;
                sum += v;
                sum_sq += v * v;
            }
            data.extend_from_slice(row);
        }

        let count = count as u64;
        let var_scaled = (count as u128 * sum_sq as u128) - (sum as u128 * sum as u128);

        Ok(Self {
            img: OwnedImage::new(data, width, height)?,
            count,
            sum,
            sum_sq,
            var_scaled,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns the template pixels in row-major order.
    pub fn data(&self) -> &[u8] {
        self.img.data()
    }

    /// Returns a borrowed view of the template pixels.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Returns the number of pixels.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the sum of all intensities.
    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Returns the sum of squared intensities.
    pub fn sum_sq(&self) -> u64 {
        self.sum_sq
    }

    /// Returns `n² · variance` as an exact integer.
    pub fn var_scaled(&self) -> u128 {
        self.var_scaled
    }

    /// Returns the mean intensity.
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }

    /// Returns the population standard deviation of the intensities.
    pub fn std_dev(&self) -> f64 {
        (self.var_scaled as f64).sqrt() / self.count as f64
    }

    /// Returns true when every pixel has the same intensity.
    pub fn is_uniform(&self) -> bool {
        self.var_scaled == 0
    }
}
