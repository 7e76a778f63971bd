use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::datetime_to_unix_millis;
use crate::error::{SnapError, SnapResult};

pub const DEFAULT_NUM_TICKS: usize = 10;

/// Time snapping setup for one brush.
///
/// The scale is passed separately so this type stays serializable; hosts can
/// persist it next to their chart layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSnapConfig {
    /// Tick density requested from the scale.
    #[serde(default = "default_num_ticks")]
    pub num_ticks: usize,
    pub extent_start_ms: f64,
    pub extent_end_ms: f64,
    /// Seed for the first previous selection.
    pub brush_start_ms: f64,
    /// Also bounds duration-preserving block drags.
    pub brush_end_ms: f64,
    /// Chart width in pixels.
    pub width: f64,
    #[serde(default)]
    pub allow_extent_snapping: bool,
}

impl TimeSnapConfig {
    /// Creates a config whose brush covers the whole extent.
    #[must_use]
    pub fn new(extent_start_ms: f64, extent_end_ms: f64, width: f64) -> Self {
        Self {
            num_ticks: DEFAULT_NUM_TICKS,
            extent_start_ms,
            extent_end_ms,
            brush_start_ms: extent_start_ms,
            brush_end_ms: extent_end_ms,
            width,
            allow_extent_snapping: false,
        }
    }

    #[must_use]
    pub fn from_datetimes(
        extent_start: DateTime<Utc>,
        extent_end: DateTime<Utc>,
        width: f64,
    ) -> Self {
        Self::new(
            datetime_to_unix_millis(extent_start),
            datetime_to_unix_millis(extent_end),
            width,
        )
    }

    #[must_use]
    pub fn with_num_ticks(mut self, num_ticks: usize) -> Self {
        self.num_ticks = num_ticks;
        self
    }

    #[must_use]
    pub fn with_brush(mut self, brush_start_ms: f64, brush_end_ms: f64) -> Self {
        self.brush_start_ms = brush_start_ms;
        self.brush_end_ms = brush_end_ms;
        self
    }

    #[must_use]
    pub fn with_brush_datetimes(self, brush_start: DateTime<Utc>, brush_end: DateTime<Utc>) -> Self {
        self.with_brush(
            datetime_to_unix_millis(brush_start),
            datetime_to_unix_millis(brush_end),
        )
    }

    #[must_use]
    pub fn with_extent_snapping(mut self, allow: bool) -> Self {
        self.allow_extent_snapping = allow;
        self
    }

    pub fn validate(self) -> SnapResult<Self> {
        if self.num_ticks == 0 {
            return Err(SnapError::InvalidConfig(
                "num_ticks must be > 0".to_owned(),
            ));
        }
        if !self.extent_start_ms.is_finite()
            || !self.extent_end_ms.is_finite()
            || self.extent_start_ms >= self.extent_end_ms
        {
            return Err(SnapError::InvalidConfig(
                "extent must be finite with start < end".to_owned(),
            ));
        }
        if !self.brush_start_ms.is_finite()
            || !self.brush_end_ms.is_finite()
            || self.brush_start_ms > self.brush_end_ms
        {
            return Err(SnapError::InvalidConfig(
                "brush must be finite with start <= end".to_owned(),
            ));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(SnapError::InvalidConfig(
                "width must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }

    pub fn from_json_str(input: &str) -> SnapResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            SnapError::InvalidConfig(format!("failed to parse snap config json: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> SnapResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SnapError::InvalidData(format!("failed to serialize snap config: {e}"))
        })
    }
}

fn default_num_ticks() -> usize {
    DEFAULT_NUM_TICKS
}
