use serde::{Deserialize, Serialize};

use crate::core::SnapScale;

/// Outcome of one snap: the selection in domain units and in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnappingResult {
    pub values: [f64; 2],
    pub pixels: [f64; 2],
}

impl SnappingResult {
    #[must_use]
    pub fn new(values: [f64; 2], pixels: [f64; 2]) -> Self {
        Self { values, pixels }
    }

    /// Builds a result by projecting `values` through `scale`.
    #[must_use]
    pub fn from_values<S: SnapScale + ?Sized>(values: [f64; 2], scale: &S) -> Self {
        Self {
            values,
            pixels: [scale.forward(values[0]), scale.forward(values[1])],
        }
    }

    /// Selection width in domain units.
    #[must_use]
    pub fn duration(&self) -> f64 {
        (self.values[1] - self.values[0]).abs()
    }

    #[must_use]
    pub fn matches_pixels(&self, selection: [f64; 2]) -> bool {
        self.pixels[0] == selection[0] && self.pixels[1] == selection[1]
    }

    /// Swaps edges when the selection came out reversed.
    #[must_use]
    pub(crate) fn ordered(self) -> Self {
        if self.values[0] > self.values[1] || self.pixels[0] > self.pixels[1] {
            Self {
                values: [self.values[1], self.values[0]],
                pixels: [self.pixels[1], self.pixels[0]],
            }
        } else {
            self
        }
    }
}
