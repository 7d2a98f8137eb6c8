//! CSV row parsing for the punch sheet.
//!
//! The sheet columns are Date, Time, Card, Name. Dates arrive in a mix of
//! formats (ISO, day-first, month-first, Thai Buddhist years) and the time
//! lives in its own column, so parsing normalises everything into a
//! [`NaiveDateTime`] before the matching core ever sees it. Rows that fail
//! validation are dropped here; the core assumes clean input.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use tracing::debug;

use crate::models::Punch;

/// Parses a sheet date cell plus time cell into a timestamp.
///
/// Formats handled, in order:
/// 1. ISO date or date-time (`2025-12-02` or `2025-12-02T11:21:12`). When a
///    separate time cell is present it overrides the time portion.
/// 2. Slash- or dash-separated day/month/year triples. A positional value
///    above 12 is unambiguously the day; otherwise day-first is assumed,
///    matching the sheet's Thai locale. A year above 2400 is a Buddhist
///    year and is normalised by subtracting 543.
///
/// An empty time cell means midnight. Returns `None` for anything that does
/// not form a valid calendar date-time.
///
/// # Example
///
/// ```
/// use attendance_engine::fetch::parse_timestamp;
/// use chrono::NaiveDate;
///
/// let ts = parse_timestamp("02/12/2568", "11:21:12").unwrap();
/// assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2025, 12, 2).unwrap());
/// ```
pub fn parse_timestamp(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let date_str = date_str.trim();
    let time_str = time_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if date_str.contains('T') || (date_str.contains('-') && date_str.len() >= 10) {
        if let Some(ts) = parse_iso(date_str, time_str) {
            return Some(ts);
        }
    }

    parse_separated(date_str, time_str)
}

fn parse_iso(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let (date_part, embedded_time) = match date_str.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (date_str, None),
    };
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

    // A populated time cell wins over any time embedded in the date cell.
    let time = if time_str.contains(':') {
        parse_time(time_str)?
    } else if let Some(embedded) = embedded_time {
        parse_time(embedded)?
    } else {
        midnight()
    };

    Some(date.and_time(time))
}

fn parse_separated(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let parts: Vec<&str> = date_str.split(['/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }
    let v1: u32 = parts[0].trim().parse().ok()?;
    let v2: u32 = parts[1].trim().parse().ok()?;
    let mut year: i32 = parts[2].trim().parse().ok()?;

    // Thai Buddhist calendar year, e.g. 2568 -> 2025.
    if year > 2400 {
        year -= 543;
    }

    let (day, month) = if v1 > 12 {
        (v1, v2)
    } else if v2 > 12 {
        (v2, v1)
    } else {
        // Ambiguous; default to day-first for the sheet's locale.
        (v1, v2)
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = if time_str.is_empty() {
        midnight()
    } else {
        parse_time(time_str)?
    };
    Some(date.and_time(time))
}

fn parse_time(time_str: &str) -> Option<NaiveTime> {
    let mut parts = time_str.split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next().unwrap_or("0").trim().parse().ok()?;
    let second: u32 = match parts.next() {
        Some(s) => s.trim().parse().ok()?,
        None => 0,
    };
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn midnight() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("valid midnight time")
}

/// Parses the raw CSV body of a punch sheet into validated punches.
///
/// Expects a header row followed by Date, Time, Card, Name columns (extra
/// columns are ignored, short rows skipped). Rows are dropped when the date
/// or name cell is empty, when the date cell is a leaked header, when the
/// timestamp does not parse, or when it sits at or before the Unix epoch
/// (a zero timestamp is a terminal artefact, not a real punch).
///
/// Output is sorted by timestamp, which the matching core relies on.
pub fn parse_rows(csv_text: &str) -> Vec<Punch> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut punches = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                debug!(error = %err, "skipping malformed csv row");
                continue;
            }
        };
        if record.len() < 4 {
            continue;
        }
        let date_str = record[0].trim();
        let time_str = record[1].trim();
        let card = record[2].trim();
        let name = record[3].trim();

        if date_str.is_empty() || name.is_empty() || date_str.eq_ignore_ascii_case("date") {
            continue;
        }
        let Some(timestamp) = parse_timestamp(date_str, time_str) else {
            continue;
        };
        if timestamp.and_utc().timestamp() <= 0 {
            continue;
        }

        punches.push(Punch {
            person_id: card.to_string(),
            person_name: name.to_string(),
            timestamp,
        });
    }

    punches.sort_by_key(|p| p.timestamp);
    punches
}
