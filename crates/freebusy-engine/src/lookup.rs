//! Point lookups and conflict checks over a normalized timeline.
//!
//! All functions here expect the canonical sequence produced by
//! [`normalize`](crate::normalize): sorted and non-overlapping. That lets both
//! lookups binary-search instead of scanning.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::interval::Interval;
use crate::status::BusyStatus;

/// A normalized interval that overlaps a proposed range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub interval: Interval,
    pub overlap_minutes: i64,
}

/// Status of the interval covering `t`, or `None` when nothing covers it
/// (implicitly free). Coverage is half-open: an interval ending at `t` does
/// not cover `t`.
pub fn status_at(intervals: &[Interval], t: DateTime<Utc>) -> Option<BusyStatus> {
    let idx = intervals.partition_point(|interval| interval.start() <= t);
    idx.checked_sub(1)
        .map(|i| &intervals[i])
        .filter(|interval| interval.contains(t))
        .map(Interval::status)
}

/// Whether the participant is unavailable at `t`: the covering status is
/// `Tentative` or more conflicting.
pub fn is_busy_at(intervals: &[Interval], t: DateTime<Utc>) -> bool {
    status_at(intervals, t).is_some_and(BusyStatus::blocks_scheduling)
}

/// Find every interval at least as conflicting as `threshold` that overlaps
/// `[start, end)`.
///
/// Two ranges overlap when `a.start < b.end && b.start < a.end`, so an interval
/// ending exactly at `start` is not a conflict.
pub fn conflicts_with(
    intervals: &[Interval],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    threshold: BusyStatus,
) -> Vec<Conflict> {
    // Ends are ascending in a normalized sequence, so skip everything that
    // finishes before the proposed range begins.
    let first = intervals.partition_point(|interval| interval.end() <= start);

    intervals[first..]
        .iter()
        .take_while(|interval| interval.start() < end)
        .filter(|interval| interval.status() >= threshold)
        .map(|interval| {
            let overlap_start = interval.start().max(start);
            let overlap_end = interval.end().min(end);
            Conflict {
                interval: interval.clone(),
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        })
        .collect()
}
