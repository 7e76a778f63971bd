use crate::core::SnapScale;
use crate::error::{SnapError, SnapResult};

use super::search::nearest_index;

/// Parallel snap-point values and their projected pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapTable {
    values: Vec<f64>,
    pixels: Vec<f64>,
}

impl SnapTable {
    /// Projects `values` through `scale`.
    ///
    /// Both sequences must come out strictly ascending and there must be at
    /// least two entries.
    pub fn from_values<S: SnapScale + ?Sized>(values: Vec<f64>, scale: &S) -> SnapResult<Self> {
        if values.len() < 2 {
            return Err(SnapError::InvalidConfig(format!(
                "snap table needs at least two ticks, got {}",
                values.len()
            )));
        }

        let pixels: Vec<f64> = values.iter().map(|value| scale.forward(*value)).collect();
        if !strictly_ascending(&values) {
            return Err(SnapError::InvalidScale(
                "snap values must be finite and strictly ascending".to_owned(),
            ));
        }
        if !strictly_ascending(&pixels) {
            return Err(SnapError::InvalidScale(
                "snap pixels must be finite and strictly ascending".to_owned(),
            ));
        }

        Ok(Self { values, pixels })
    }

    /// Same table with every value moved by `offset`, re-projected.
    pub fn shifted<S: SnapScale + ?Sized>(&self, offset: f64, scale: &S) -> SnapResult<Self> {
        let values = self.values.iter().map(|value| value + offset).collect();
        Self::from_values(values, scale)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.values.len() - 1
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    /// Value at `index`, clamped to the table.
    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        self.values[index.min(self.last_index())]
    }

    /// Pixel at `index`, clamped to the table.
    #[must_use]
    pub fn pixel(&self, index: usize) -> f64 {
        self.pixels[index.min(self.last_index())]
    }

    #[must_use]
    pub fn first_pixel(&self) -> f64 {
        self.pixels[0]
    }

    #[must_use]
    pub fn last_pixel(&self) -> f64 {
        self.pixels[self.last_index()]
    }

    #[must_use]
    pub fn nearest_index(&self, pixel: f64) -> usize {
        nearest_index(&self.pixels, pixel)
    }
}

fn strictly_ascending(items: &[f64]) -> bool {
    items.iter().all(|item| item.is_finite()) && items.windows(2).all(|pair| pair[0] < pair[1])
}
