/// Recurrence rule deciding whether a habit is due on a given day
///
/// A habit is due on its start day and every `frequency_days` after it,
/// at calendar-day granularity. This is a pure function of the record;
/// malformed start dates make a habit "never due" rather than failing,
/// since bulk queries must survive historical records.

use chrono::NaiveDate;

use crate::domain::habit::Habit;
use crate::domain::types::parse_instant;

impl Habit {
    /// Check whether this habit has a scheduled occurrence on `date`
    ///
    /// Time-of-day is ignored on both sides. Never due before the start
    /// day; on or after it, due when the elapsed whole days are a multiple
    /// of the frequency.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        // Stored data can carry a zero frequency; guard the modulo below.
        if self.frequency_days == 0 {
            return false;
        }

        let start_day = match parse_instant(&self.start_date_time) {
            Some(start) => start.date_naive(),
            None => return false,
        };

        if date < start_day {
            return false;
        }

        let days_since_start = (date - start_day).num_days();
        days_since_start % i64::from(self.frequency_days) == 0
    }
}
