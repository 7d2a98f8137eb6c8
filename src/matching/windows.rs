//! Time-window primitives and the fixed shift-window policy.
//!
//! This module provides the inclusive minute-granular [`TimeWindow`] check and
//! the hardcoded entry/exit windows for the three-shift roster. The windows
//! are a fixed policy for one organisation; there is no configuration layer
//! for them.

use chrono::{NaiveTime, Timelike};

/// An inclusive time-of-day window with minute granularity.
///
/// Comparison deliberately ignores seconds: a punch at `08:45:59` is inside a
/// window ending at `08:45`. Wall-clock punch terminals report to the second,
/// but the roster policy is stated in whole minutes.
///
/// A window whose `end` precedes its `start` wraps past midnight. None of the
/// roster windows below actually wrap (the cross-midnight shifts are modeled
/// as two separate windows on adjacent days), but the primitive supports it.
///
/// # Example
///
/// ```
/// use attendance_engine::matching::TimeWindow;
/// use chrono::NaiveTime;
///
/// let window = TimeWindow::new(7, 30, 8, 45);
/// assert!(window.contains(NaiveTime::from_hms_opt(8, 45, 59).unwrap()));
/// assert!(!window.contains(NaiveTime::from_hms_opt(8, 46, 0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start_minute: u32,
    end_minute: u32,
}

impl TimeWindow {
    /// Creates a window from inclusive start and end clock times.
    ///
    /// # Panics
    ///
    /// Panics if either pair is not a valid clock time. All call sites in
    /// this crate use static literals.
    pub fn new(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Self {
        assert!(start_hour < 24 && start_min < 60, "valid start clock time");
        assert!(end_hour < 24 && end_min < 60, "valid end clock time");
        TimeWindow {
            start_minute: start_hour * 60 + start_min,
            end_minute: end_hour * 60 + end_min,
        }
    }

    /// Returns true when `time` falls inside the window, both ends inclusive.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let check = time.hour() * 60 + time.minute();
        if self.start_minute <= self.end_minute {
            check >= self.start_minute && check <= self.end_minute
        } else {
            // Wraps past midnight.
            check >= self.start_minute || check <= self.end_minute
        }
    }
}

/// Night-shift entry window on the day before the target day.
pub fn night_entry_prev_day() -> TimeWindow {
    TimeWindow::new(22, 30, 23, 59)
}

/// Night-shift entry window on the target day itself.
///
/// Punches in this window are subject to the afternoon-carryover
/// disambiguation before they may start a night shift.
pub fn night_entry_same_day() -> TimeWindow {
    TimeWindow::new(0, 0, 0, 45)
}

/// Night-shift exit window on the target day.
pub fn night_exit() -> TimeWindow {
    TimeWindow::new(8, 0, 9, 15)
}

/// Morning-shift entry window on the target day.
pub fn morning_entry() -> TimeWindow {
    TimeWindow::new(7, 30, 8, 45)
}

/// Morning-shift exit window on the target day.
pub fn morning_exit() -> TimeWindow {
    TimeWindow::new(16, 0, 17, 15)
}

/// Afternoon-shift entry window on the target day.
pub fn afternoon_entry() -> TimeWindow {
    TimeWindow::new(15, 30, 16, 45)
}

/// Afternoon-shift exit window on the target day itself.
pub fn afternoon_exit_same_day() -> TimeWindow {
    TimeWindow::new(23, 50, 23, 59)
}

/// Afternoon-shift exit window on the day after the target day.
pub fn afternoon_exit_next_day() -> TimeWindow {
    TimeWindow::new(0, 0, 1, 15)
}
