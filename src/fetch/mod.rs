//! Punch-sheet acquisition for the attendance engine.
//!
//! This module pulls raw punch data from the published spreadsheet and
//! normalises it into the [`Punch`](crate::models::Punch) list the matching
//! core consumes: CSV parsing, mixed date-format handling, row validation,
//! and multi-endpoint retry with a hard stop on private sheets.

mod client;
mod parse;

pub use client::{SheetSource, fetch_punches};
pub use parse::{parse_rows, parse_timestamp};
