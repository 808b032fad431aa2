//! Per-query aggregate owning one participant's intervals.
//!
//! A [`ParticipantTimeline`] is created for a single query (participant plus
//! window), filled by one or more calendar providers, normalized once and then
//! handed to a consumer. Mutation takes `&mut self`, so a timeline has exactly
//! one writer at a time.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{FreeBusyError, Result};
use crate::interval::{Interval, RawInterval};
use crate::slots::{self, FreeSlot};
use crate::status::BusyStatus;
use crate::window::TimeWindow;
use crate::{lookup, merge};

/// A raw record that failed validation during [`ParticipantTimeline::ingest`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// Position of the record in the ingested batch.
    pub position: usize,
    pub record: RawInterval,
    pub error: FreeBusyError,
}

/// Outcome of a bulk ingest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: Vec<Rejected>,
}

/// One participant's availability within a query window.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantTimeline {
    participant: String,
    #[serde(flatten)]
    window: TimeWindow,
    intervals: Vec<Interval>,
    #[serde(skip)]
    normalized: bool,
}

impl ParticipantTimeline {
    /// # Errors
    /// Returns `FreeBusyError::InvalidWindow` if `from >= until`.
    pub fn new(
        participant: impl Into<String>,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self::with_window(participant, TimeWindow::new(from, until)?))
    }

    pub fn with_window(participant: impl Into<String>, window: TimeWindow) -> Self {
        Self {
            participant: participant.into(),
            window,
            intervals: Vec::new(),
            normalized: false,
        }
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Whether `intervals()` currently holds the canonical sequence.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Append an already-validated interval. No ordering or overlap rules apply
    /// until [`normalize`](Self::normalize).
    pub fn add(&mut self, interval: Interval) {
        self.intervals.push(interval);
        self.normalized = false;
    }

    /// Validate a provider record and append it.
    ///
    /// # Errors
    /// Returns `FreeBusyError::InvalidInterval` if the range is empty or
    /// inverted, or the status is not recognized. Nothing is added then.
    pub fn add_raw(&mut self, record: RawInterval) -> Result<()> {
        let interval = Interval::try_from(record)?;
        self.add(interval);
        Ok(())
    }

    /// Add a batch of provider records, skipping the invalid ones.
    ///
    /// Each rejected record is logged at `warn` and returned in the report so
    /// the caller can trace it back to its source.
    pub fn ingest<I>(&mut self, records: I) -> IngestReport
    where
        I: IntoIterator<Item = RawInterval>,
    {
        let mut report = IngestReport::default();
        for (position, record) in records.into_iter().enumerate() {
            match Interval::try_from(record.clone()) {
                Ok(interval) => {
                    self.add(interval);
                    report.accepted += 1;
                }
                Err(error) => {
                    warn!(
                        participant = %self.participant,
                        position,
                        origin = record.origin.as_deref().unwrap_or(""),
                        %error,
                        "skipping invalid free/busy record"
                    );
                    report.rejected.push(Rejected {
                        position,
                        record,
                        error,
                    });
                }
            }
        }
        debug!(
            participant = %self.participant,
            accepted = report.accepted,
            rejected = report.rejected.len(),
            "ingested free/busy records"
        );
        report
    }

    /// Replace the pending intervals with the canonical, window-clipped,
    /// non-overlapping sequence. Idempotent.
    pub fn normalize(&mut self) {
        self.intervals = merge::normalize(&self.window, &self.intervals);
        self.normalized = true;
    }

    /// Insertion order before [`normalize`](Self::normalize), canonical order
    /// after it.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn into_intervals(self) -> Vec<Interval> {
        self.intervals
    }

    /// The canonical sequence: borrowed when already normalized, computed on
    /// the fly otherwise. Pending intervals are left untouched.
    fn canonical(&self) -> Cow<'_, [Interval]> {
        if self.normalized {
            Cow::Borrowed(&self.intervals)
        } else {
            Cow::Owned(merge::normalize(&self.window, &self.intervals))
        }
    }

    /// Status at `t`; `None` when uncovered.
    ///
    /// Answers from the normalized view even if [`normalize`](Self::normalize)
    /// has not run yet.
    pub fn status_at(&self, t: DateTime<Utc>) -> Option<BusyStatus> {
        lookup::status_at(&self.canonical(), t)
    }

    pub fn is_busy_at(&self, t: DateTime<Utc>) -> bool {
        lookup::is_busy_at(&self.canonical(), t)
    }

    pub fn free_slots(&self) -> Vec<FreeSlot> {
        slots::free_slots(&self.window, &self.canonical())
    }
}
