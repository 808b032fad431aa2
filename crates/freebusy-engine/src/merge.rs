//! Sweep-line merge of clipped intervals into a canonical timeline.
//!
//! Every interval contributes a start and an end event. Events are sorted once,
//! then swept left to right in batches of equal instants. Between two
//! consecutive instants the set of active intervals is constant, and the most
//! conflicting active status decides that sub-range. Adjacent sub-ranges with
//! the same status are coalesced as they are emitted.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::interval::Interval;
use crate::status::BusyStatus;
use crate::window::{clip_to_window, TimeWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    at: DateTime<Utc>,
    edge: Edge,
    index: usize,
}

/// Active intervals bucketed by status rank, so the winner is found without
/// rescanning every interval per sub-range.
///
/// Each bucket keeps input indices ordered, which makes the representative
/// origin the earliest-added interval of the winning status.
#[derive(Debug, Default)]
struct ActiveSet {
    by_rank: [BTreeSet<usize>; BusyStatus::ALL.len()],
}

impl ActiveSet {
    fn insert(&mut self, status: BusyStatus, index: usize) {
        self.by_rank[usize::from(status.rank())].insert(index);
    }

    fn remove(&mut self, status: BusyStatus, index: usize) {
        self.by_rank[usize::from(status.rank())].remove(&index);
    }

    /// Most conflicting active status and its representative interval index.
    fn winner(&self) -> Option<(BusyStatus, usize)> {
        BusyStatus::ALL.iter().rev().find_map(|&status| {
            self.by_rank[usize::from(status.rank())]
                .first()
                .map(|&index| (status, index))
        })
    }
}

/// Append `[start, end)` resolved to `source`'s status, extending the previous
/// output interval instead when it ends at `start` with the same status.
fn push_coalesced(
    merged: &mut Vec<Interval>,
    source: &Interval,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) {
    if let Some(last) = merged.last_mut() {
        if last.status() == source.status() && last.end() == start {
            if let Some(extended) = last.with_range(last.start(), end) {
                *last = extended;
            }
            return;
        }
    }
    if let Some(piece) = source.with_range(start, end) {
        merged.push(piece);
    }
}

/// Resolve an unordered, possibly overlapping multiset of intervals into a
/// sorted, non-overlapping sequence.
///
/// Where intervals overlap, the most conflicting status wins. Uncovered time
/// produces no output. Runs in O(n log n).
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut events: Vec<Event> = intervals
        .iter()
        .enumerate()
        .flat_map(|(index, interval)| {
            [
                Event {
                    at: interval.start(),
                    edge: Edge::Start,
                    index,
                },
                Event {
                    at: interval.end(),
                    edge: Edge::End,
                    index,
                },
            ]
        })
        .collect();
    events.sort_by_key(|event| event.at);

    let mut active = ActiveSet::default();
    let mut merged: Vec<Interval> = Vec::new();
    let mut cursor: Option<DateTime<Utc>> = None;
    let mut i = 0;

    while i < events.len() {
        let at = events[i].at;

        // The sub-range [cursor, at) was covered by whatever was active
        // before this batch of events.
        if let (Some(prev), Some((_, index))) = (cursor, active.winner()) {
            push_coalesced(&mut merged, &intervals[index], prev, at);
        }

        while let Some(event) = events.get(i).filter(|event| event.at == at) {
            let status = intervals[event.index].status();
            match event.edge {
                Edge::Start => active.insert(status, event.index),
                Edge::End => active.remove(status, event.index),
            }
            i += 1;
        }
        cursor = Some(at);
    }

    merged.sort_by(Interval::canonical_cmp);
    merged
}

/// Clip `intervals` to `window`, then merge them into the canonical timeline.
///
/// Pure function of its inputs; the result satisfies boundary containment,
/// canonical ordering, no overlap, and never downgrades the status of any
/// covered instant.
pub fn normalize(window: &TimeWindow, intervals: &[Interval]) -> Vec<Interval> {
    let clipped = clip_to_window(window, intervals);
    let merged = merge_intervals(&clipped);
    debug!(
        raw = intervals.len(),
        clipped = clipped.len(),
        merged = merged.len(),
        "normalized free/busy intervals"
    );
    merged
}
