//! Query windows and clipping raw intervals to them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{FreeBusyError, Result};
use crate::interval::Interval;

/// A non-empty, half-open `[from, until)` query range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    from: DateTime<Utc>,
    until: DateTime<Utc>,
}

impl TimeWindow {
    /// # Errors
    /// Returns `FreeBusyError::InvalidWindow` if `from >= until`.
    pub fn new(from: DateTime<Utc>, until: DateTime<Utc>) -> Result<Self> {
        if from >= until {
            return Err(FreeBusyError::InvalidWindow(format!(
                "from {} is not before until {}",
                from.to_rfc3339(),
                until.to_rfc3339()
            )));
        }
        Ok(Self { from, until })
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn until(&self) -> DateTime<Utc> {
        self.until
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.until - self.from).num_minutes()
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.from <= t && t < self.until
    }

    /// Truncate one interval to the window. `None` if nothing is left.
    pub fn clip(&self, interval: &Interval) -> Option<Interval> {
        if interval.start() >= self.until || interval.end() <= self.from {
            return None;
        }
        interval.with_range(
            interval.start().max(self.from),
            interval.end().min(self.until),
        )
    }
}

/// Clip a multiset of intervals to `window`, discarding whatever falls outside.
///
/// Intervals crossing a boundary are truncated and keep their status and
/// origin. Input order is preserved; no sorting happens here.
pub fn clip_to_window<'a, I>(window: &TimeWindow, intervals: I) -> Vec<Interval>
where
    I: IntoIterator<Item = &'a Interval>,
{
    intervals
        .into_iter()
        .filter_map(|interval| window.clip(interval))
        .collect()
}
