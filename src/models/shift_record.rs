//! Shift kind and reconciled shift record models.
//!
//! A [`ShiftRecord`] is the reconciled entry/exit pairing for one person, one
//! shift kind, one calendar day. Records are produced fresh on every matching
//! pass and are never mutated or persisted.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The three scheduled shifts of a roster day.
///
/// The variant order is the fixed matching and output order: a punch is
/// offered to the night pass first, then morning, then afternoon. Changing
/// this order changes which shift wins an ambiguous punch, so it must be
/// preserved.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ShiftKind;
///
/// assert!(ShiftKind::Night < ShiftKind::Morning);
/// assert_eq!(ShiftKind::Morning.symbol(), 'ช');
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// Core hours 00:00-08:00; the entry punch may fall late on the previous day.
    Night,
    /// Core hours 08:00-16:00.
    Morning,
    /// Core hours 16:00-00:00; the exit punch may fall early on the next day.
    Afternoon,
}

impl ShiftKind {
    /// The single-character roster symbol used in monthly tabulation.
    ///
    /// These are the symbols the ward's paper roster uses: `ด` (night),
    /// `ช` (morning), `บ` (afternoon).
    pub fn symbol(&self) -> char {
        match self {
            ShiftKind::Night => 'ด',
            ShiftKind::Morning => 'ช',
            ShiftKind::Afternoon => 'บ',
        }
    }

    /// The one-letter tag embedded in record identities.
    pub fn tag(&self) -> char {
        match self {
            ShiftKind::Night => 'N',
            ShiftKind::Morning => 'M',
            ShiftKind::Afternoon => 'A',
        }
    }
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftKind::Night => write!(f, "Night"),
            ShiftKind::Morning => write!(f, "Morning"),
            ShiftKind::Afternoon => write!(f, "Afternoon"),
        }
    }
}

/// The reconciled attendance record for one person, shift kind, and day.
///
/// Either time may be absent: a missed scan leaves a partial record, which is
/// a legitimate outcome rather than an error. A record is only emitted when
/// an entry punch was found, so in practice `in_time` is populated and
/// `out_time` is the field that goes missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Deterministic identity: `<person_id>-<tag>-<day-of-month>`.
    pub id: String,
    /// Stable identifier for the person (badge/card number).
    pub person_id: String,
    /// Display name of the person.
    pub person_name: String,
    /// Which shift this record belongs to.
    pub kind: ShiftKind,
    /// The calendar day the shift belongs to.
    pub date: NaiveDate,
    /// Time of the entry punch, if one was matched.
    pub in_time: Option<NaiveTime>,
    /// Time of the exit punch, if one was matched.
    pub out_time: Option<NaiveTime>,
    /// Free-text notes; currently always empty.
    pub remarks: String,
}

impl ShiftRecord {
    /// Builds the deterministic record identity for a person, kind, and day.
    ///
    /// Identical inputs always yield the same identity, making re-computation
    /// idempotent.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{ShiftKind, ShiftRecord};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
    /// assert_eq!(ShiftRecord::record_id("8050133", ShiftKind::Night, day), "8050133-N-2");
    /// ```
    pub fn record_id(person_id: &str, kind: ShiftKind, date: NaiveDate) -> String {
        format!("{}-{}-{}", person_id, kind.tag(), date.day())
    }
}
