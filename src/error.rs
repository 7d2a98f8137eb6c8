//! Error types for the Shift Attendance Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The reconciliation core itself has no failure modes beyond producing empty
//! results; the variants here cover the surrounding layers (month validation
//! and the remote punch-sheet fetch).

use thiserror::Error;

/// The main error type for the Shift Attendance Reconciliation Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidMonth { year: 2025, month: 13 };
/// assert_eq!(error.to_string(), "Invalid month 13 of year 2025");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested year/month does not form a valid calendar month.
    #[error("Invalid month {month} of year {year}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
    },

    /// The punch sheet is private or otherwise unreadable.
    ///
    /// Raised when the source responds with 401/403 or serves a sign-in page
    /// instead of CSV. This is a hard failure: retrying other endpoints will
    /// not help until the sheet is shared publicly.
    #[error("Punch sheet is private or unreadable")]
    PrivateSource,

    /// All fetch endpoints failed for a transient or structural reason.
    #[error("Failed to fetch punch sheet: {message}")]
    FetchFailed {
        /// A description of the last failure observed.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
