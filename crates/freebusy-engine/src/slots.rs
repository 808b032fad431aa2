//! Free time slots within a query window.
//!
//! Walks a normalized timeline left to right and reports the gaps between
//! blocking intervals. `Free` and `Unknown` intervals count as free time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::window::TimeWindow;

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Find free slots in `window`, given a normalized interval sequence.
///
/// Returns slots sorted by start time. Blocking intervals outside the window
/// are ignored; those crossing it are treated as clipped.
pub fn free_slots(window: &TimeWindow, intervals: &[Interval]) -> Vec<FreeSlot> {
    let mut slots = Vec::new();
    let mut cursor = window.from();

    for interval in intervals.iter().filter(|i| i.status().blocks_scheduling()) {
        let busy_start = interval.start().max(window.from());
        let busy_end = interval.end().min(window.until());
        if busy_start >= busy_end {
            continue;
        }
        if cursor < busy_start {
            slots.push(FreeSlot::new(cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }

    // Trailing free slot after the last blocking interval.
    if cursor < window.until() {
        slots.push(FreeSlot::new(cursor, window.until()));
    }

    slots
}

/// First free slot of at least `min_duration_minutes`.
pub fn first_free_slot(
    window: &TimeWindow,
    intervals: &[Interval],
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    free_slots(window, intervals)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}
