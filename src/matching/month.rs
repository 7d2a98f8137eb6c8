//! Monthly aggregation over day-level matching.
//!
//! The aggregator replays the day matcher once per calendar day of the
//! target month, always against the full punch history because night and
//! afternoon shifts straddle month boundaries. Each day is matched
//! independently; nothing is cached or shared across days. That is a
//! simplicity-over-performance tradeoff acceptable at the problem's scale
//! (tens of people, one month).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthlyAttendance, Punch};

use super::day::match_shifts_for_day;

/// Returns the number of days in the given calendar month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] when `year`/`month` do not form a
/// valid calendar month.
///
/// # Example
///
/// ```
/// use attendance_engine::matching::days_in_month;
///
/// assert_eq!(days_in_month(2025, 12).unwrap(), 31);
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert!(days_in_month(2025, 13).is_err());
/// ```
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidMonth { year, month })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(EngineError::InvalidMonth { year, month })?;
    Ok((next_first - first).num_days() as u32)
}

/// Builds the monthly attendance table for every person in the punch
/// history.
///
/// Every person ever seen in `punches` gets an entry, whether or not they
/// worked during the target month; every day of the month is present as a
/// key, holding an empty set when nothing was matched. Output is sorted by
/// person name (code-point order).
///
/// The table is rebuilt in full on every call, never updated incrementally.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] when `year`/`month` do not form a
/// valid calendar month.
pub fn aggregate_month(
    punches: &[Punch],
    year: i32,
    month: u32,
) -> EngineResult<Vec<MonthlyAttendance>> {
    let day_count = days_in_month(year, month)?;

    let mut table: BTreeMap<String, BTreeMap<u32, BTreeSet<char>>> = BTreeMap::new();
    for punch in punches {
        table.entry(punch.person_name.clone()).or_default();
    }
    for days in table.values_mut() {
        for day in 1..=day_count {
            days.insert(day, BTreeSet::new());
        }
    }

    for day in 1..=day_count {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(EngineError::InvalidMonth { year, month })?;
        for record in match_shifts_for_day(punches, date) {
            if let Some(days) = table.get_mut(&record.person_name) {
                if let Some(symbols) = days.get_mut(&record.date.day()) {
                    symbols.insert(record.kind.symbol());
                }
            }
        }
    }

    Ok(table
        .into_iter()
        .map(|(person_name, shifts_by_day)| MonthlyAttendance {
            person_name,
            shifts_by_day,
        })
        .collect())
}
