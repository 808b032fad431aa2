//! Busy-status values and their conflict-severity ordering.
//!
//! Every comparison between statuses goes through [`BusyStatus::rank`], so the
//! "most conflicting wins" rule lives in exactly one table.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FreeBusyError;

/// How strongly an interval indicates that a participant is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusyStatus {
    Free,
    /// No data was available for the range (provider gap, permission denied).
    Unknown,
    Tentative,
    Busy,
    OutOfOffice,
}

impl BusyStatus {
    /// All statuses, least conflicting first.
    pub const ALL: [BusyStatus; 5] = [
        BusyStatus::Free,
        BusyStatus::Unknown,
        BusyStatus::Tentative,
        BusyStatus::Busy,
        BusyStatus::OutOfOffice,
    ];

    /// Fixed conflict rank. Higher means more conflicting.
    pub const fn rank(self) -> u8 {
        match self {
            BusyStatus::Free => 0,
            BusyStatus::Unknown => 1,
            BusyStatus::Tentative => 2,
            BusyStatus::Busy => 3,
            BusyStatus::OutOfOffice => 4,
        }
    }

    /// Strict severity comparison: `rank(self) > rank(other)`.
    ///
    /// Irreflexive, antisymmetric and transitive, so it can pick a
    /// deterministic winner among overlapping statuses.
    pub const fn is_more_conflicting_than(self, other: BusyStatus) -> bool {
        self.rank() > other.rank()
    }

    /// Whether this status prevents scheduling something on top of it.
    ///
    /// `Free` and `Unknown` do not block; `Tentative` and above do.
    pub const fn blocks_scheduling(self) -> bool {
        self.rank() >= BusyStatus::Tentative.rank()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BusyStatus::Free => "FREE",
            BusyStatus::Unknown => "UNKNOWN",
            BusyStatus::Tentative => "TENTATIVE",
            BusyStatus::Busy => "BUSY",
            BusyStatus::OutOfOffice => "OUT_OF_OFFICE",
        }
    }
}

impl Ord for BusyStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for BusyStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BusyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusyStatus {
    type Err = FreeBusyError;

    /// Parse a provider status string. Accepts the canonical names as well as
    /// the RFC 5545 `FBTYPE` values, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "FREE" => Ok(BusyStatus::Free),
            "UNKNOWN" | "NODATA" => Ok(BusyStatus::Unknown),
            "TENTATIVE" | "BUSY_TENTATIVE" => Ok(BusyStatus::Tentative),
            "BUSY" => Ok(BusyStatus::Busy),
            "OUT_OF_OFFICE" | "OOO" | "BUSY_UNAVAILABLE" => Ok(BusyStatus::OutOfOffice),
            _ => Err(FreeBusyError::InvalidInterval(format!(
                "unrecognized busy status '{}'",
                s
            ))),
        }
    }
}
