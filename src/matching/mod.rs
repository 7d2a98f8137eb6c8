//! Shift reconciliation logic for the attendance engine.
//!
//! This module contains the matching core: the inclusive time-window
//! primitive and the fixed three-shift window policy, day-level pairing of
//! entry and exit punches into shift records, and the monthly aggregation
//! that replays day matching across a whole calendar month.

mod day;
mod month;
mod windows;

pub use day::match_shifts_for_day;
pub use month::{aggregate_month, days_in_month};
pub use windows::{
    TimeWindow, afternoon_entry, afternoon_exit_next_day, afternoon_exit_same_day, morning_entry,
    morning_exit, night_entry_prev_day, night_entry_same_day, night_exit,
};
