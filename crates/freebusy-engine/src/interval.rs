//! Interval value types: validated [`Interval`]s and unvalidated provider
//! records ([`RawInterval`]).

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FreeBusyError, Result};
use crate::status::BusyStatus;

/// Opaque reference back to the source record an interval came from.
///
/// Carried through clipping and merging for traceability only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Origin(String);

impl Origin {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Origin {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Origin {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A non-empty, half-open `[start, end)` range tagged with a busy status.
///
/// Fields are private so that `start < end` holds for every value. Equality
/// ignores [`Origin`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    status: BusyStatus,
    #[serde(skip_serializing_if = "Origin::is_empty")]
    origin: Origin,
}

impl Interval {
    /// Build an interval, rejecting empty or inverted ranges.
    ///
    /// # Errors
    /// Returns `FreeBusyError::InvalidInterval` if `start >= end`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: BusyStatus,
        origin: impl Into<Origin>,
    ) -> Result<Self> {
        if start >= end {
            return Err(FreeBusyError::InvalidInterval(format!(
                "start {} is not before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self {
            start,
            end,
            status,
            origin: origin.into(),
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn status(&self) -> BusyStatus {
        self.status
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open containment: `start <= t < end`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }

    /// Whether the two ranges share at least one instant. Adjacent ranges
    /// (one ends where the other starts) do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }

    /// Derive a new interval over `[start, end)` that keeps this interval's
    /// status and origin. Returns `None` when the new range is empty.
    pub(crate) fn with_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then(|| Self {
            start,
            end,
            status: self.status,
            origin: self.origin.clone(),
        })
    }

    /// Canonical timeline order: `start` ascending, then `end` ascending, then
    /// the more conflicting status first for identical ranges.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then(self.end.cmp(&other.end))
            .then(other.status.cmp(&self.status))
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.status == other.status
    }
}

impl Eq for Interval {}

/// An unvalidated interval as a calendar provider hands it over.
///
/// The status is still text; converting into an [`Interval`] validates both
/// the range and the status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub origin: Option<String>,
}

impl TryFrom<RawInterval> for Interval {
    type Error = FreeBusyError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        let status: BusyStatus = raw.status.parse()?;
        Interval::new(raw.start, raw.end, status, raw.origin.unwrap_or_default())
    }
}
