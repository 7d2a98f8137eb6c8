//! Day-level shift matching.
//!
//! This module pairs entry and exit punches into shift records for a single
//! calendar day. Matching runs three passes per person in the fixed order
//! Night, Morning, Afternoon; a per-person used-punch set scoped to the call
//! prevents one punch from serving two shifts. The pass order is a design
//! choice that decides which shift wins a punch sitting in two overlapping
//! windows and must not be reordered.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::{Punch, ShiftKind, ShiftRecord};

use super::windows;

/// Matches all punches against one target day, producing zero or more shift
/// records per person.
///
/// Only punches dated on the target day or its immediate neighbours are
/// considered, since the night shift begins on the previous evening and the
/// afternoon shift ends in the next day's small hours. The input is never
/// mutated; records are built fresh on every call, so identical inputs yield
/// identical output.
///
/// The returned list is sorted by shift kind (Night, Morning, Afternoon);
/// within a kind, people appear in the order their punches first occur in
/// the input.
///
/// # Example
///
/// ```
/// use attendance_engine::matching::match_shifts_for_day;
/// use attendance_engine::models::{Punch, ShiftKind};
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let punches = vec![
///     Punch {
///         person_id: "8050133".to_string(),
///         person_name: "มานี มีพะโล้".to_string(),
///         timestamp: NaiveDateTime::parse_from_str("2025-12-02 08:10:00", "%Y-%m-%d %H:%M:%S")
///             .unwrap(),
///     },
/// ];
/// let day = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
///
/// let records = match_shifts_for_day(&punches, day);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].kind, ShiftKind::Morning);
/// assert!(records[0].out_time.is_none());
/// ```
pub fn match_shifts_for_day(punches: &[Punch], day: NaiveDate) -> Vec<ShiftRecord> {
    let prev_day = day.pred_opt();
    let next_day = day.succ_opt();

    let relevant: Vec<&Punch> = punches
        .iter()
        .filter(|p| {
            let date = p.timestamp.date();
            date == day || Some(date) == prev_day || Some(date) == next_day
        })
        .collect();

    // Group by person name, keeping people in the order their punches first
    // appear so output order is stable across calls.
    let mut person_order: Vec<&str> = Vec::new();
    let mut by_person: HashMap<&str, Vec<&Punch>> = HashMap::new();
    for punch in relevant {
        by_person
            .entry(punch.person_name.as_str())
            .or_insert_with(|| {
                person_order.push(punch.person_name.as_str());
                Vec::new()
            })
            .push(punch);
    }

    let mut records = Vec::new();
    for name in person_order {
        let person_punches = &by_person[name];
        let mut used: HashSet<usize> = HashSet::new();

        if let Some(record) = match_night(person_punches, &mut used, day, prev_day) {
            records.push(record);
        }
        if let Some(record) = match_morning(person_punches, &mut used, day) {
            records.push(record);
        }
        if let Some(record) = match_afternoon(person_punches, &mut used, day, next_day) {
            records.push(record);
        }
    }

    // Stable sort: kind order first, first-seen person order within a kind.
    records.sort_by_key(|r| r.kind);
    records
}

/// Claims the first unused punch satisfying `predicate`, marking it used.
fn claim_first<F>(punches: &[&Punch], used: &mut HashSet<usize>, predicate: F) -> Option<usize>
where
    F: Fn(&Punch) -> bool,
{
    for (idx, punch) in punches.iter().enumerate() {
        if !used.contains(&idx) && predicate(punch) {
            used.insert(idx);
            return Some(idx);
        }
    }
    None
}

/// Decides whether a same-day small-hours punch belongs to yesterday's
/// afternoon shift rather than a fresh night entry.
///
/// The heuristic: the person entered yesterday's afternoon window and shows
/// no punch in today's night-exit window. It can misclassify a genuine
/// very-early night entry when that pattern coincidentally holds; downstream
/// consumers depend on the exact behaviour, so it is preserved as-is.
///
/// All of the person's punches are inspected here, including ones already
/// claimed by another pairing.
fn is_afternoon_carryover(punches: &[&Punch], day: NaiveDate, prev_day: Option<NaiveDate>) -> bool {
    let entered_afternoon_yesterday = punches.iter().any(|p| {
        Some(p.timestamp.date()) == prev_day
            && windows::afternoon_entry().contains(p.timestamp.time())
    });
    let has_night_exit_today = punches
        .iter()
        .any(|p| p.timestamp.date() == day && windows::night_exit().contains(p.timestamp.time()));
    entered_afternoon_yesterday && !has_night_exit_today
}

fn match_night(
    punches: &[&Punch],
    used: &mut HashSet<usize>,
    day: NaiveDate,
    prev_day: Option<NaiveDate>,
) -> Option<ShiftRecord> {
    let carryover = is_afternoon_carryover(punches, day, prev_day);

    let mut entry_idx = None;
    for (idx, punch) in punches.iter().enumerate() {
        if used.contains(&idx) {
            continue;
        }
        let date = punch.timestamp.date();
        let time = punch.timestamp.time();
        let late_prev_evening =
            Some(date) == prev_day && windows::night_entry_prev_day().contains(time);
        let early_same_day = date == day && windows::night_entry_same_day().contains(time);
        if !late_prev_evening && !early_same_day {
            continue;
        }
        // A small-hours candidate is really yesterday's afternoon exit when
        // the carryover pattern holds; skip it and try the next candidate.
        if early_same_day && carryover {
            continue;
        }
        entry_idx = Some(idx);
        break;
    }
    let entry_idx = entry_idx?;
    used.insert(entry_idx);

    let exit_idx = claim_first(punches, used, |p| {
        p.timestamp.date() == day && windows::night_exit().contains(p.timestamp.time())
    });

    Some(build_record(punches, ShiftKind::Night, day, entry_idx, exit_idx))
}

fn match_morning(
    punches: &[&Punch],
    used: &mut HashSet<usize>,
    day: NaiveDate,
) -> Option<ShiftRecord> {
    let entry_idx = claim_first(punches, used, |p| {
        p.timestamp.date() == day && windows::morning_entry().contains(p.timestamp.time())
    })?;
    let exit_idx = claim_first(punches, used, |p| {
        p.timestamp.date() == day && windows::morning_exit().contains(p.timestamp.time())
    });
    Some(build_record(punches, ShiftKind::Morning, day, entry_idx, exit_idx))
}

fn match_afternoon(
    punches: &[&Punch],
    used: &mut HashSet<usize>,
    day: NaiveDate,
    next_day: Option<NaiveDate>,
) -> Option<ShiftRecord> {
    let entry_idx = claim_first(punches, used, |p| {
        p.timestamp.date() == day && windows::afternoon_entry().contains(p.timestamp.time())
    })?;
    let exit_idx = claim_first(punches, used, |p| {
        let date = p.timestamp.date();
        let time = p.timestamp.time();
        (date == day && windows::afternoon_exit_same_day().contains(time))
            || (Some(date) == next_day && windows::afternoon_exit_next_day().contains(time))
    });
    Some(build_record(
        punches,
        ShiftKind::Afternoon,
        day,
        entry_idx,
        exit_idx,
    ))
}

/// Builds a record from a claimed entry punch and an optional claimed exit.
///
/// A record is only ever built around an entry; a lone exit punch produces
/// nothing and stays unclaimed for the day.
fn build_record(
    punches: &[&Punch],
    kind: ShiftKind,
    day: NaiveDate,
    entry_idx: usize,
    exit_idx: Option<usize>,
) -> ShiftRecord {
    let entry = punches[entry_idx];
    ShiftRecord {
        id: ShiftRecord::record_id(&entry.person_id, kind, day),
        person_id: entry.person_id.clone(),
        person_name: entry.person_name.clone(),
        kind,
        date: day,
        in_time: Some(entry.timestamp.time()),
        out_time: exit_idx.map(|idx| punches[idx].timestamp.time()),
        remarks: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn make_punch(name: &str, date_str: &str, time_str: &str) -> Punch {
        Punch {
            person_id: format!("id-{name}"),
            person_name: name.to_string(),
            timestamp: NaiveDateTime::parse_from_str(
                &format!("{date_str} {time_str}"),
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
        }
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_time(time_str: &str) -> chrono::NaiveTime {
        chrono::NaiveTime::parse_from_str(time_str, "%H:%M:%S").unwrap()
    }

    #[test]
    fn test_morning_shift_pairs_entry_and_exit() {
        let punches = vec![
            make_punch("A", "2025-12-02", "08:10:00"),
            make_punch("A", "2025-12-02", "16:05:00"),
        ];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ShiftKind::Morning);
        assert_eq!(records[0].in_time, Some(make_time("08:10:00")));
        assert_eq!(records[0].out_time, Some(make_time("16:05:00")));
        assert_eq!(records[0].id, "id-A-M-2");
    }

    #[test]
    fn test_lone_entry_produces_partial_record() {
        let punches = vec![make_punch("A", "2025-12-02", "08:10:00")];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ShiftKind::Morning);
        assert!(records[0].out_time.is_none());
    }

    #[test]
    fn test_lone_exit_produces_no_record() {
        let punches = vec![make_punch("A", "2025-12-02", "16:05:00")];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_no_punches_no_records() {
        let records = match_shifts_for_day(&[], make_date("2025-12-02"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_morning_boundary_is_inclusive() {
        let punches = vec![make_punch("A", "2025-12-02", "07:30:00")];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ShiftKind::Morning);
    }

    #[test]
    fn test_before_morning_window_is_not_an_entry() {
        let punches = vec![make_punch("A", "2025-12-02", "07:29:00")];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_night_shift_spans_previous_evening() {
        let punches = vec![
            make_punch("A", "2025-12-01", "22:45:00"),
            make_punch("A", "2025-12-02", "08:05:00"),
        ];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ShiftKind::Night);
        assert_eq!(records[0].date, make_date("2025-12-02"));
        assert_eq!(records[0].in_time, Some(make_time("22:45:00")));
        assert_eq!(records[0].out_time, Some(make_time("08:05:00")));
    }

    #[test]
    fn test_afternoon_exit_spans_next_morning() {
        let punches = vec![
            make_punch("A", "2025-12-02", "15:55:00"),
            make_punch("A", "2025-12-03", "00:10:00"),
        ];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ShiftKind::Afternoon);
        assert_eq!(records[0].out_time, Some(make_time("00:10:00")));
    }

    #[test]
    fn test_carryover_punch_is_not_a_night_entry() {
        // Afternoon entry yesterday at 16:00, one small-hours punch today,
        // no night-exit punch today: the 00:20 punch is yesterday's
        // afternoon exit, not a night entry.
        let punches = vec![
            make_punch("A", "2025-12-01", "16:00:00"),
            make_punch("A", "2025-12-02", "00:20:00"),
        ];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));
        assert!(records.iter().all(|r| r.kind != ShiftKind::Night));
    }

    #[test]
    fn test_small_hours_punch_with_night_exit_is_a_night_entry() {
        // Same shape as the carryover case, but a night-exit punch exists
        // today, so the small-hours punch starts a genuine night shift.
        let punches = vec![
            make_punch("A", "2025-12-01", "16:00:00"),
            make_punch("A", "2025-12-02", "00:20:00"),
            make_punch("A", "2025-12-02", "08:30:00"),
        ];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));

        let night: Vec<_> = records.iter().filter(|r| r.kind == ShiftKind::Night).collect();
        assert_eq!(night.len(), 1);
        assert_eq!(night[0].in_time, Some(make_time("00:20:00")));
        assert_eq!(night[0].out_time, Some(make_time("08:30:00")));
    }

    #[test]
    fn test_small_hours_punch_without_yesterday_afternoon_is_a_night_entry() {
        let punches = vec![make_punch("A", "2025-12-02", "00:20:00")];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ShiftKind::Night);
        assert!(records[0].out_time.is_none());
    }

    #[test]
    fn test_used_punch_is_not_reused_across_kinds() {
        // 08:10 sits in both the night-exit and morning-entry windows. The
        // night pass runs first and claims it as the exit, so the morning
        // pass must not see it again.
        let punches = vec![
            make_punch("A", "2025-12-01", "22:45:00"),
            make_punch("A", "2025-12-02", "08:10:00"),
        ];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ShiftKind::Night);
        assert_eq!(records[0].out_time, Some(make_time("08:10:00")));
    }

    #[test]
    fn test_triple_shift_day_is_sorted_night_morning_afternoon() {
        let punches = vec![
            make_punch("A", "2025-12-01", "22:40:00"),
            make_punch("A", "2025-12-02", "08:05:00"),
            make_punch("A", "2025-12-02", "08:20:00"),
            make_punch("A", "2025-12-02", "16:10:00"),
            make_punch("A", "2025-12-02", "16:40:00"),
            make_punch("A", "2025-12-02", "23:55:00"),
        ];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));

        let kinds: Vec<ShiftKind> = records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![ShiftKind::Night, ShiftKind::Morning, ShiftKind::Afternoon]
        );
    }

    #[test]
    fn test_people_are_matched_independently() {
        let punches = vec![
            make_punch("A", "2025-12-02", "08:10:00"),
            make_punch("B", "2025-12-02", "08:12:00"),
            make_punch("B", "2025-12-02", "16:03:00"),
        ];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].person_name, "A");
        assert!(records[0].out_time.is_none());
        assert_eq!(records[1].person_name, "B");
        assert_eq!(records[1].out_time, Some(make_time("16:03:00")));
    }

    #[test]
    fn test_punches_outside_adjacent_days_are_ignored() {
        let punches = vec![
            make_punch("A", "2025-12-05", "08:10:00"),
            make_punch("A", "2025-11-30", "08:10:00"),
        ];
        let records = match_shifts_for_day(&punches, make_date("2025-12-02"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_matching_is_idempotent() {
        let punches = vec![
            make_punch("A", "2025-12-01", "22:40:00"),
            make_punch("A", "2025-12-02", "08:05:00"),
            make_punch("B", "2025-12-02", "08:12:00"),
            make_punch("B", "2025-12-02", "16:03:00"),
        ];
        let day = make_date("2025-12-02");

        let first = match_shifts_for_day(&punches, day);
        let second = match_shifts_for_day(&punches, day);
        assert_eq!(first, second);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        prop_compose! {
            fn arb_punch()(
                person in prop::sample::select(vec!["A", "B", "C"]),
                day in 1u32..=28,
                hour in 0u32..24,
                minute in 0u32..60,
            ) -> Punch {
                make_punch(
                    person,
                    &format!("2025-12-{day:02}"),
                    &format!("{hour:02}:{minute:02}:00"),
                )
            }
        }

        proptest! {
            #[test]
            fn matching_twice_yields_identical_output(
                punches in prop::collection::vec(arb_punch(), 0..40),
                day in 2u32..=27,
            ) {
                let day = NaiveDate::from_ymd_opt(2025, 12, day).unwrap();
                let first = match_shifts_for_day(&punches, day);
                let second = match_shifts_for_day(&punches, day);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn at_most_one_record_per_person_and_kind(
                punches in prop::collection::vec(arb_punch(), 0..40),
                day in 2u32..=27,
            ) {
                let day = NaiveDate::from_ymd_opt(2025, 12, day).unwrap();
                let records = match_shifts_for_day(&punches, day);

                let mut seen = HashSet::new();
                for record in &records {
                    prop_assert!(
                        seen.insert((record.person_name.clone(), record.kind)),
                        "duplicate record for {} {:?}",
                        record.person_name,
                        record.kind,
                    );
                }
            }

            #[test]
            fn output_is_sorted_by_kind(
                punches in prop::collection::vec(arb_punch(), 0..40),
                day in 2u32..=27,
            ) {
                let day = NaiveDate::from_ymd_opt(2025, 12, day).unwrap();
                let records = match_shifts_for_day(&punches, day);
                let kinds: Vec<ShiftKind> = records.iter().map(|r| r.kind).collect();

                let mut sorted = kinds.clone();
                sorted.sort();
                prop_assert_eq!(kinds, sorted);
            }

            #[test]
            fn records_never_share_a_punch_within_a_person(
                punches in prop::collection::vec(arb_punch(), 0..40),
                day in 2u32..=27,
            ) {
                let day = NaiveDate::from_ymd_opt(2025, 12, day).unwrap();

                // Duplicate timestamps would make reconstructed punches
                // indistinguishable, so drop them for this property.
                let mut seen = HashSet::new();
                let punches: Vec<Punch> = punches
                    .into_iter()
                    .filter(|p| seen.insert((p.person_name.clone(), p.timestamp)))
                    .collect();

                let records = match_shifts_for_day(&punches, day);

                // Rebuild each attributed punch as (person, full datetime);
                // a night entry at 22:30+ fell on the previous day and an
                // afternoon exit at 01:15 or earlier fell on the next day.
                let mut attributed = Vec::new();
                for record in &records {
                    if let Some(time) = record.in_time {
                        let date = if record.kind == ShiftKind::Night
                            && windows::night_entry_prev_day().contains(time)
                        {
                            day.pred_opt().unwrap()
                        } else {
                            day
                        };
                        attributed.push((record.person_name.clone(), date.and_time(time)));
                    }
                    if let Some(time) = record.out_time {
                        let date = if record.kind == ShiftKind::Afternoon
                            && windows::afternoon_exit_next_day().contains(time)
                        {
                            day.succ_opt().unwrap()
                        } else {
                            day
                        };
                        attributed.push((record.person_name.clone(), date.and_time(time)));
                    }
                }
                let unique: HashSet<_> = attributed.iter().cloned().collect();
                prop_assert_eq!(unique.len(), attributed.len());
            }
        }
    }
}
