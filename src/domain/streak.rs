/// Streak calculation from a habit's completion log
///
/// The streak is the count of consecutive scheduled occurrences completed
/// up to and including the most recent one. It is derived entirely from
/// `logs` and `frequency_days`; the cached `streak` field on the record is
/// refreshed from here on every completion-log mutation.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::habit::Habit;
use crate::domain::types::{day_index, parse_instant};
use crate::domain::DomainError;

/// Compute the current streak for a habit as of `now`
///
/// Logs with fewer than two entries are their own answer: an empty log is
/// a streak of 0, a single completion is a streak of 1, without parsing.
///
/// Otherwise every entry must parse (a malformed timestamp surfaces as an
/// error instead of being skipped, so data corruption can't masquerade as
/// a broken streak). Entries collapse to a set of day indices, so several
/// completions on one calendar day count once. The walk starts at today's
/// day index, or one period earlier when today isn't logged yet so that
/// an unfinished day doesn't zero an active streak, and steps backward by
/// the frequency, counting until the first missing day.
pub fn calculate_streak(habit: &Habit, now: DateTime<Utc>) -> Result<u32, DomainError> {
    if habit.logs.len() < 2 {
        return Ok(habit.logs.len() as u32);
    }

    if habit.frequency_days == 0 {
        return Ok(0);
    }

    let mut completed_days = BTreeSet::new();
    for entry in &habit.logs {
        let instant = parse_instant(entry).ok_or_else(|| DomainError::MalformedLog {
            entry: entry.clone(),
        })?;
        completed_days.insert(day_index(instant));
    }

    let frequency = i64::from(habit.frequency_days);
    let mut expected = day_index(now);

    if !completed_days.contains(&expected) {
        expected -= frequency;
    }

    let mut streak = 0u32;
    while completed_days.contains(&expected) {
        streak += 1;
        expected -= frequency;
    }

    Ok(streak)
}
