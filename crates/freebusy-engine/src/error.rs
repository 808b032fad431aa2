//! Error types for freebusy-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FreeBusyError {
    /// A raw record could not become an [`Interval`](crate::Interval): the
    /// range is empty or inverted, or the status is not recognized.
    /// Callers treat this as a data-quality warning and skip the record.
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// The query window is empty or inverted (`from >= until`).
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

pub type Result<T> = std::result::Result<T, FreeBusyError>;
