use chrono::{DateTime, Utc};

use crate::error::{SnapError, SnapResult};

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(millis: f64) -> SnapResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(SnapError::InvalidData(
            "timestamp millis must be finite".to_owned(),
        ));
    }

    DateTime::from_timestamp_millis(millis.floor() as i64).ok_or_else(|| {
        SnapError::InvalidData(format!("timestamp {millis} ms is out of range"))
    })
}

/// Rounds `span / count` up to a 1, 2 or 5 multiple of a power of ten.
///
/// Returns `0.0` for degenerate input so callers can bail out.
#[must_use]
pub(crate) fn nice_tick_step(span: f64, count: usize) -> f64 {
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return 0.0;
    }

    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}
