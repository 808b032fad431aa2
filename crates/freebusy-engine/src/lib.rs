//! # freebusy-engine
//!
//! Deterministic free/busy interval normalization for calendar availability.
//!
//! Calendar providers hand over availability as an unsorted pile of intervals,
//! each tagged with a busy status. They overlap, repeat, and spill past the
//! range that was asked for. This crate reduces that pile to a canonical
//! timeline: clipped to the query window, non-overlapping, sorted, and with
//! the most conflicting status winning wherever intervals overlap.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use freebusy_engine::{BusyStatus, Interval, ParticipantTimeline};
//!
//! let at = |h, m| Utc.with_ymd_and_hms(2026, 3, 16, h, m, 0).unwrap();
//! let mut timeline = ParticipantTimeline::new("alice", at(8, 0), at(18, 0)).unwrap();
//! timeline.add(Interval::new(at(9, 0), at(10, 0), BusyStatus::Busy, "standup").unwrap());
//! timeline.add(Interval::new(at(9, 30), at(9, 45), BusyStatus::OutOfOffice, "dentist").unwrap());
//! timeline.normalize();
//!
//! let statuses: Vec<_> = timeline.intervals().iter().map(|i| i.status()).collect();
//! assert_eq!(statuses, [BusyStatus::Busy, BusyStatus::OutOfOffice, BusyStatus::Busy]);
//! ```
//!
//! ## Modules
//!
//! - [`status`] — `BusyStatus` and its conflict-severity ranking
//! - [`interval`] — validated `Interval` values and raw provider records
//! - [`window`] — query windows and clipping
//! - [`merge`] — sweep-line merge and the `normalize` pipeline
//! - [`timeline`] — `ParticipantTimeline`, the per-query aggregate
//! - [`lookup`] — point lookups and conflict checks on a normalized timeline
//! - [`slots`] — free slots between blocking intervals
//! - [`error`] — Error types

pub mod error;
pub mod interval;
pub mod lookup;
pub mod merge;
pub mod slots;
pub mod status;
pub mod timeline;
pub mod window;

pub use error::FreeBusyError;
pub use interval::{Interval, Origin, RawInterval};
pub use lookup::{conflicts_with, is_busy_at, status_at, Conflict};
pub use merge::{merge_intervals, normalize};
pub use slots::{first_free_slot, free_slots, FreeSlot};
pub use status::BusyStatus;
pub use timeline::{IngestReport, ParticipantTimeline, Rejected};
pub use window::{clip_to_window, TimeWindow};
