//! Request types for the attendance engine API.
//!
//! This module defines the JSON request structures for the roster endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::Punch;
use crate::scoring::DayOverride;

/// A punch event in a roster request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRequest {
    /// Stable identifier for the person (badge/card number).
    pub person_id: String,
    /// Display name of the person.
    pub person_name: String,
    /// When the punch was recorded (wall-clock local time).
    pub timestamp: NaiveDateTime,
}

/// Request body for the `POST /roster/day` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRosterRequest {
    /// The raw punch events, any order.
    pub punches: Vec<PunchRequest>,
    /// The calendar day to reconcile.
    pub date: NaiveDate,
}

/// A manual day replacement in a month roster request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideRequest {
    /// The person the override applies to.
    pub person_name: String,
    /// Day of month (1-based).
    pub day: u32,
    /// The replacement status.
    pub status: DayOverride,
}

/// Request body for the `POST /roster/month` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthRosterRequest {
    /// The full punch history, any order.
    pub punches: Vec<PunchRequest>,
    /// Target year.
    pub year: i32,
    /// Target month (1-12).
    pub month: u32,
    /// Public holiday count for the scoring formula.
    #[serde(default)]
    pub public_holidays: u32,
    /// Manual day replacements.
    #[serde(default)]
    pub overrides: Vec<OverrideRequest>,
}

impl From<PunchRequest> for Punch {
    fn from(req: PunchRequest) -> Self {
        Punch {
            person_id: req.person_id,
            person_name: req.person_name,
            timestamp: req.timestamp,
        }
    }
}
