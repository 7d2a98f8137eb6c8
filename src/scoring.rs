//! Overtime scoring over monthly attendance.
//!
//! Scoring reduces a person's monthly day-symbol table to the roster's
//! overtime figure: `(public_holidays - zero_days) + night_afternoon_days +
//! morning_afternoon_days`. Day overrides (sick leave, meeting, vacation)
//! replace a day's computed symbols and take that day out of every count,
//! including the zero-day count.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::MonthlyAttendance;

/// A manual replacement for one person's computed day.
///
/// # Example
///
/// ```
/// use attendance_engine::scoring::DayOverride;
///
/// assert_eq!(DayOverride::SickLeave.label(), "ลาป่วย");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOverride {
    /// Sick leave, displayed as the roster's Thai label.
    SickLeave,
    /// An all-day meeting.
    Meeting,
    /// Vacation.
    Vacation,
}

impl DayOverride {
    /// The label shown in the roster cell in place of shift symbols.
    pub fn label(&self) -> &'static str {
        match self {
            DayOverride::SickLeave => "ลาป่วย",
            DayOverride::Meeting => "ประชุม",
            DayOverride::Vacation => "VAC",
        }
    }
}

impl std::fmt::Display for DayOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Collapses a day's symbol set into its roster cell string.
///
/// Composite states win over single shifts: night-plus-afternoon renders as
/// `ดบ` and morning-plus-afternoon as `ชบ`. An empty set renders as the
/// empty string, which the roster displays as a zero day.
pub fn day_symbols(symbols: &BTreeSet<char>) -> String {
    let night = symbols.contains(&'ด');
    let morning = symbols.contains(&'ช');
    let afternoon = symbols.contains(&'บ');

    if night && afternoon {
        "ดบ".to_string()
    } else if morning && afternoon {
        "ชบ".to_string()
    } else if morning {
        "ช".to_string()
    } else if afternoon {
        "บ".to_string()
    } else if night {
        "ด".to_string()
    } else {
        String::new()
    }
}

/// Renders the roster cell for one day: the override label when one is set,
/// otherwise the computed symbols, otherwise `0`.
pub fn day_display(symbols: &BTreeSet<char>, day_override: Option<DayOverride>) -> String {
    if let Some(value) = day_override {
        return value.label().to_string();
    }
    let display = day_symbols(symbols);
    if display.is_empty() {
        "0".to_string()
    } else {
        display
    }
}

/// The per-person monthly overtime tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSummary {
    /// Days rendered as the night-plus-afternoon composite.
    pub night_afternoon_days: u32,
    /// Days rendered as the morning-plus-afternoon composite.
    pub morning_afternoon_days: u32,
    /// Days with no shifts and no override.
    pub zero_days: u32,
    /// The overtime score; negative when zero days outnumber public
    /// holidays.
    pub score: i64,
}

/// Scores one person's month.
///
/// `overrides` maps day-of-month to the override applied to that day for
/// this person. An overridden day contributes to no count at all.
///
/// # Example
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use attendance_engine::models::MonthlyAttendance;
/// use attendance_engine::scoring::score_month;
///
/// let mut shifts_by_day = BTreeMap::new();
/// shifts_by_day.insert(1, BTreeSet::from(['ด', 'บ']));
/// shifts_by_day.insert(2, BTreeSet::from(['ช']));
/// shifts_by_day.insert(3, BTreeSet::new());
/// let attendance = MonthlyAttendance {
///     person_name: "มานี มีพะโล้".to_string(),
///     shifts_by_day,
/// };
///
/// let summary = score_month(&attendance, 2, &BTreeMap::new());
/// assert_eq!(summary.score, (2 - 1) + 1 + 0);
/// ```
pub fn score_month(
    attendance: &MonthlyAttendance,
    public_holidays: u32,
    overrides: &BTreeMap<u32, DayOverride>,
) -> OvertimeSummary {
    let mut night_afternoon_days = 0u32;
    let mut morning_afternoon_days = 0u32;
    let mut zero_days = 0u32;

    for (day, symbols) in &attendance.shifts_by_day {
        if overrides.contains_key(day) {
            continue;
        }
        match day_symbols(symbols).as_str() {
            "ดบ" => night_afternoon_days += 1,
            "ชบ" => morning_afternoon_days += 1,
            "" => zero_days += 1,
            _ => {}
        }
    }

    let score = (i64::from(public_holidays) - i64::from(zero_days))
        + i64::from(night_afternoon_days)
        + i64::from(morning_afternoon_days);

    OvertimeSummary {
        night_afternoon_days,
        morning_afternoon_days,
        zero_days,
        score,
    }
}
