//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoints for day-level reconciliation,
//! monthly roster aggregation, and fetching the configured punch sheet.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DayRosterRequest, MonthRosterRequest, OverrideRequest, PunchRequest};
pub use response::{ApiError, MonthRosterRow};
pub use state::AppState;
