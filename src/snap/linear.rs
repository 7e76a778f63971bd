use crate::core::SnapScale;
use crate::error::{SnapError, SnapResult};

use super::SnappingResult;

/// Stateless snapper rounding both edges to multiples of a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSnapper<S> {
    scale: S,
    threshold: f64,
    range_start: f64,
    range_end: f64,
    non_zero_interval_required: bool,
}

impl<S: SnapScale> LinearSnapper<S> {
    pub fn new(scale: S, threshold: f64, range_start: f64, range_end: f64) -> SnapResult<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(SnapError::InvalidConfig(
                "snapping threshold must be finite and > 0".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start > range_end {
            return Err(SnapError::InvalidConfig(
                "snapping range must be finite with start <= end".to_owned(),
            ));
        }

        Ok(Self {
            scale,
            threshold,
            range_start,
            range_end,
            non_zero_interval_required: true,
        })
    }

    /// Allows zero-width results when both edges round to the same value.
    #[must_use]
    pub fn with_non_zero_interval(mut self, required: bool) -> Self {
        self.non_zero_interval_required = required;
        self
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn snap(&self, pixel_selection: [f64; 2]) -> SnappingResult {
        let mut values =
            pixel_selection.map(|pixel| self.round_to_threshold(self.scale.invert(pixel)));

        if self.non_zero_interval_required && values[0] == values[1] {
            if values[1] + self.threshold <= self.range_end {
                values[1] += self.threshold;
            } else if values[0] - self.threshold >= self.range_start {
                values[0] -= self.threshold;
            }
        }

        SnappingResult::from_values(values, &self.scale).ordered()
    }

    fn round_to_threshold(&self, value: f64) -> f64 {
        (value / self.threshold).round() * self.threshold
    }
}

/// Closure form of [`LinearSnapper::snap`].
pub fn generate_linear_snapping_function<S: SnapScale>(
    scale: S,
    threshold: f64,
    range_start: f64,
    range_end: f64,
    non_zero_interval_required: bool,
) -> SnapResult<impl Fn([f64; 2]) -> SnappingResult> {
    let snapper = LinearSnapper::new(scale, threshold, range_start, range_end)?
        .with_non_zero_interval(non_zero_interval_required);
    Ok(move |pixel_selection| snapper.snap(pixel_selection))
}
