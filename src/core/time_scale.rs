use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::{datetime_to_unix_millis, nice_tick_step};
use crate::core::scale::{LinearScale, SnapScale};
use crate::error::SnapResult;

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
const WEEK_MS: f64 = 7.0 * DAY_MS;
const MONTH_MS: f64 = 30.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;

/// Upper bound on generated ticks, guards against absurd spans.
const MAX_GENERATED_TICKS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TickUnit {
    /// Nominal duration; months count as 30 days and years as 365.
    #[must_use]
    pub fn nominal_millis(self) -> f64 {
        match self {
            Self::Millisecond => 1.0,
            Self::Second => SECOND_MS,
            Self::Minute => MINUTE_MS,
            Self::Hour => HOUR_MS,
            Self::Day => DAY_MS,
            Self::Week => WEEK_MS,
            Self::Month => MONTH_MS,
            Self::Year => YEAR_MS,
        }
    }
}

/// Calendar interval between two consecutive time ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInterval {
    pub unit: TickUnit,
    pub step: u64,
}

impl TickInterval {
    #[must_use]
    pub const fn new(unit: TickUnit, step: u64) -> Self {
        Self { unit, step }
    }

    #[must_use]
    pub fn nominal_millis(self) -> f64 {
        self.unit.nominal_millis() * self.step as f64
    }
}

const CANDIDATE_INTERVALS: [TickInterval; 18] = [
    TickInterval::new(TickUnit::Second, 1),
    TickInterval::new(TickUnit::Second, 5),
    TickInterval::new(TickUnit::Second, 15),
    TickInterval::new(TickUnit::Second, 30),
    TickInterval::new(TickUnit::Minute, 1),
    TickInterval::new(TickUnit::Minute, 5),
    TickInterval::new(TickUnit::Minute, 15),
    TickInterval::new(TickUnit::Minute, 30),
    TickInterval::new(TickUnit::Hour, 1),
    TickInterval::new(TickUnit::Hour, 3),
    TickInterval::new(TickUnit::Hour, 6),
    TickInterval::new(TickUnit::Hour, 12),
    TickInterval::new(TickUnit::Day, 1),
    TickInterval::new(TickUnit::Day, 2),
    TickInterval::new(TickUnit::Week, 1),
    TickInterval::new(TickUnit::Month, 1),
    TickInterval::new(TickUnit::Month, 3),
    TickInterval::new(TickUnit::Year, 1),
];

/// Time axis mapping unix milliseconds onto a pixel range.
///
/// Ticks are aligned to UTC calendar boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain_ms: (f64, f64), range_px: (f64, f64)) -> SnapResult<Self> {
        Ok(Self {
            linear: LinearScale::new(domain_ms, range_px)?,
        })
    }

    pub fn from_datetimes(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        range_px: (f64, f64),
    ) -> SnapResult<Self> {
        Self::new(
            (datetime_to_unix_millis(start), datetime_to_unix_millis(end)),
            range_px,
        )
    }

    #[must_use]
    pub fn domain_ms(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn time_to_pixel(self, time_ms: f64) -> f64 {
        self.linear.domain_to_pixel(time_ms)
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> f64 {
        self.linear.pixel_to_domain(pixel)
    }

    /// Picks the calendar interval whose duration is closest to `span / count`.
    #[must_use]
    pub fn tick_interval(self, count: usize) -> TickInterval {
        let (start, end) = self.sorted_domain();
        select_tick_interval(end - start, count.max(1))
    }

    /// Tick instants (unix millis) inside the domain, ordered like the domain.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }

        let (start, end) = self.sorted_domain();
        let interval = self.tick_interval(count);
        let mut ticks = interval_ticks(start, end, interval);
        if self.linear.domain().0 > self.linear.domain().1 {
            ticks.reverse();
        }
        ticks
    }

    fn sorted_domain(self) -> (f64, f64) {
        let (start, end) = self.linear.domain();
        if start <= end { (start, end) } else { (end, start) }
    }
}

impl SnapScale for TimeScale {
    fn invert(&self, pixel: f64) -> f64 {
        self.pixel_to_time(pixel)
    }

    fn forward(&self, value: f64) -> f64 {
        self.time_to_pixel(value)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        TimeScale::ticks(*self, count)
    }
}

fn select_tick_interval(span_ms: f64, count: usize) -> TickInterval {
    let target = span_ms / count as f64;
    let upper = CANDIDATE_INTERVALS.partition_point(|interval| interval.nominal_millis() <= target);

    if upper == CANDIDATE_INTERVALS.len() {
        let step = nice_tick_step(span_ms / YEAR_MS, count).max(1.0);
        return TickInterval::new(TickUnit::Year, step.round() as u64);
    }
    if upper == 0 {
        let step = nice_tick_step(span_ms, count).max(1.0);
        return TickInterval::new(TickUnit::Millisecond, step.round() as u64);
    }

    let below = CANDIDATE_INTERVALS[upper - 1];
    let above = CANDIDATE_INTERVALS[upper];
    if target / below.nominal_millis() < above.nominal_millis() / target {
        below
    } else {
        above
    }
}

fn interval_ticks(start_ms: f64, end_ms: f64, interval: TickInterval) -> Vec<f64> {
    let step = interval.step.max(1);
    match interval.unit {
        TickUnit::Millisecond | TickUnit::Second | TickUnit::Minute | TickUnit::Hour => {
            // Fixed-length units divide evenly into the UTC day, so epoch
            // multiples line up with calendar fields.
            let size = interval.unit.nominal_millis() * step as f64;
            let first = (start_ms / size).ceil() as i64;
            let last = (end_ms / size).floor() as i64;
            if last < first {
                return Vec::new();
            }
            if (last - first) as usize >= MAX_GENERATED_TICKS {
                warn!(
                    span_ms = end_ms - start_ms,
                    ?interval,
                    "tick generation capped"
                );
            }
            (first..=last)
                .take(MAX_GENERATED_TICKS)
                .map(|i| i as f64 * size)
                .collect()
        }
        TickUnit::Day | TickUnit::Week | TickUnit::Month | TickUnit::Year => {
            calendar_ticks(start_ms, end_ms, interval.unit, step)
        }
    }
}

fn calendar_ticks(start_ms: f64, end_ms: f64, unit: TickUnit, step: u64) -> Vec<f64> {
    let Some(mut cursor) = first_midnight_at_or_after(start_ms) else {
        return Vec::new();
    };

    match unit {
        TickUnit::Week => {
            while cursor.weekday() != Weekday::Sun {
                match cursor.succ_opt() {
                    Some(next) => cursor = next,
                    None => return Vec::new(),
                }
            }
        }
        TickUnit::Month => {
            cursor = first_of_month_at_or_after(cursor);
            while u64::from(cursor.month0()) % step != 0 {
                match cursor.checked_add_months(Months::new(1)) {
                    Some(next) => cursor = next,
                    None => return Vec::new(),
                }
            }
        }
        TickUnit::Year => {
            cursor = first_of_year_at_or_after(cursor);
            let year = i64::from(cursor.year());
            let remainder = year.rem_euclid(step as i64);
            if remainder != 0 {
                let target = year + (step as i64 - remainder);
                match i32::try_from(target)
                    .ok()
                    .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
                {
                    Some(date) => cursor = date,
                    None => return Vec::new(),
                }
            }
        }
        _ => {}
    }

    let mut ticks = Vec::new();
    loop {
        let cursor_ms = date_millis(cursor);
        if cursor_ms > end_ms {
            break;
        }
        if ticks.len() >= MAX_GENERATED_TICKS {
            warn!(?unit, step, "calendar tick generation capped");
            break;
        }

        let aligned = match unit {
            // Day steps restart at the first of every month.
            TickUnit::Day => u64::from(cursor.day0()) % step == 0,
            _ => true,
        };
        if aligned {
            ticks.push(cursor_ms);
        }

        let next = match unit {
            TickUnit::Day => cursor.checked_add_signed(Duration::days(1)),
            TickUnit::Week => cursor.checked_add_signed(Duration::weeks(1)),
            TickUnit::Month => u32::try_from(step)
                .ok()
                .and_then(|months| cursor.checked_add_months(Months::new(months))),
            TickUnit::Year => i32::try_from(step)
                .ok()
                .and_then(|years| cursor.year().checked_add(years))
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
            _ => None,
        };
        match next {
            Some(next) => cursor = next,
            None => break,
        }
    }
    ticks
}

fn first_midnight_at_or_after(millis: f64) -> Option<NaiveDate> {
    let time = DateTime::from_timestamp_millis(millis.ceil() as i64)?;
    let date = time.date_naive();
    if date_millis(date) < millis {
        date.succ_opt()
    } else {
        Some(date)
    }
}

fn first_of_month_at_or_after(date: NaiveDate) -> NaiveDate {
    if date.day() == 1 {
        return date;
    }
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .unwrap_or(date)
}

fn first_of_year_at_or_after(date: NaiveDate) -> NaiveDate {
    if date.ordinal() == 1 {
        return date;
    }
    NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap_or(date)
}

fn date_millis(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}
