//! Monthly attendance aggregate model.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Per-person monthly attendance: day-of-month mapped to the set of shift
/// symbols worked that day.
///
/// Every day of the target month is present as a key, holding an empty set
/// when nothing was worked. The per-day container is deliberately a set
/// rather than a single value: a person can legitimately hold two shifts on
/// one day (for example a night exit pairing plus a fresh afternoon entry),
/// and the combination is a meaningful composite state downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAttendance {
    /// Display name of the person.
    pub person_name: String,
    /// Day of month (1-based) to the symbols worked that day.
    pub shifts_by_day: BTreeMap<u32, BTreeSet<char>>,
}
