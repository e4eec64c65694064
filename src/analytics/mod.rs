/// Day-level queries over the habit set
///
/// Stateless views composed from the recurrence rule and the completion
/// log: which habits still need doing on a date, and how much of the day's
/// schedule is already done. Both operate on a listed snapshot of the
/// habit set, so callers pair them with the repository's `list_all`.

use chrono::NaiveDate;

use crate::domain::{Habit, HabitId};

/// Outstanding habits for a date: scheduled and not yet completed
///
/// A habit that is due but already logged for the date is excluded; with
/// no habits at all the result is an empty vec.
pub fn habits_due_on(habits: &[(HabitId, Habit)], date: NaiveDate) -> Vec<(HabitId, Habit)> {
    habits
        .iter()
        .filter(|(_, habit)| habit.is_due_on(date) && !habit.is_complete_on(date))
        .cloned()
        .collect()
}

/// Completed/total counts for a date
///
/// The day's selection is every habit either scheduled for the date or
/// completed on it; `completed` is the subset actually completed. The
/// completed count never exceeds the total, and both are `(0, 0)` with no
/// habits.
pub fn completion_ratio(habits: &[(HabitId, Habit)], date: NaiveDate) -> (u32, u32) {
    let mut completed = 0u32;
    let mut total = 0u32;

    for (_, habit) in habits {
        let complete = habit.is_complete_on(date);
        if habit.is_due_on(date) || complete {
            total += 1;
            if complete {
                completed += 1;
            }
        }
    }

    (completed, total)
}
