//! Core data models for the Shift Attendance Reconciliation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod monthly;
mod punch;
mod shift_record;

pub use monthly::MonthlyAttendance;
pub use punch::Punch;
pub use shift_record::{ShiftKind, ShiftRecord};
