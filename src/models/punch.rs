//! Punch event model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single timestamped attendance event for one person.
///
/// Punches are produced by the fetch layer, already validated and sorted by
/// timestamp, and are consumed read-only by the matching core. Matching
/// groups punches by `person_name`; `person_id` is the badge number carried
/// through into record identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// Stable identifier for the person (badge/card number).
    pub person_id: String,
    /// Display name, used as the grouping key during matching.
    pub person_name: String,
    /// When the punch was recorded (wall-clock local time).
    pub timestamp: NaiveDateTime,
}
