//! Shift Attendance Reconciliation Engine
//!
//! This crate reconciles raw punch-clock events into shift-attendance records
//! for a fixed three-shift roster (night, morning, afternoon) and aggregates
//! them into monthly per-person summaries with overtime scoring.

#![warn(missing_docs)]

pub mod api;
pub mod error;
pub mod fetch;
pub mod matching;
pub mod models;
pub mod scoring;
