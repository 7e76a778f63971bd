use serde::{Deserialize, Serialize};

use crate::core::primitives::nice_tick_step;
use crate::error::{SnapError, SnapResult};

/// Projection capability the snapping engine depends on.
///
/// Implementations must be monotonic increasing: larger domain values map to
/// larger pixels, and `ticks` returns ascending values.
pub trait SnapScale {
    /// Maps a pixel back into the domain.
    fn invert(&self, pixel: f64) -> f64;

    /// Maps a domain value onto the pixel range.
    fn forward(&self, value: f64) -> f64;

    /// Returns roughly `count` ascending reference values inside the domain.
    fn ticks(&self, count: usize) -> Vec<f64>;
}

impl<S: SnapScale + ?Sized> SnapScale for &S {
    fn invert(&self, pixel: f64) -> f64 {
        (**self).invert(pixel)
    }

    fn forward(&self, value: f64) -> f64 {
        (**self).forward(value)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        (**self).ticks(count)
    }
}

/// Affine domain to pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> SnapResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 == domain.1 {
            return Err(SnapError::InvalidScale(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
            return Err(SnapError::InvalidScale(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Nice ticks covering the domain, ordered like the domain.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain_start, self.domain_end, count)
    }
}

impl SnapScale for LinearScale {
    fn invert(&self, pixel: f64) -> f64 {
        self.pixel_to_domain(pixel)
    }

    fn forward(&self, value: f64) -> f64 {
        self.domain_to_pixel(value)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        LinearScale::ticks(*self, count)
    }
}

pub(crate) fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let (lo, hi) = if start < stop {
        (start, stop)
    } else {
        (stop, start)
    };
    let step = nice_tick_step(hi - lo, count);
    if step <= 0.0 {
        return Vec::new();
    }

    // Sub-unit steps divide by the inverse to keep values like 0.3 exact.
    let mut ticks: Vec<f64> = if step < 1.0 {
        let inverse = (1.0 / step).round();
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    } else {
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    };

    if start > stop {
        ticks.reverse();
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::linear_ticks;

    #[test]
    fn ticks_follow_domain_direction() {
        assert_eq!(linear_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(linear_ticks(10.0, 0.0, 5), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn fractional_ticks_stay_exact() {
        assert_eq!(linear_ticks(0.0, 1.0, 10)[3], 0.3);
    }

    #[test]
    fn degenerate_inputs_produce_trivial_ticks() {
        assert!(linear_ticks(0.0, 1.0, 0).is_empty());
        assert!(linear_ticks(f64::NAN, 1.0, 5).is_empty());
        assert_eq!(linear_ticks(3.0, 3.0, 5), vec![3.0]);
    }
}
