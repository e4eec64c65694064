/// Unit tests over the public API, on the in-memory store
use chrono::{DateTime, Duration, Utc};
use habit_ledger::*;

/// Deterministic id source producing uuid-shaped ids
struct SequentialIds(std::cell::Cell<u32>);

impl SequentialIds {
    fn new() -> Self {
        Self(std::cell::Cell::new(0))
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.0.get();
        self.0.set(n + 1);
        format!("00000000-0000-4000-8000-{:012x}", n)
    }
}

fn instant(value: &str) -> DateTime<Utc> {
    parse_instant(value).unwrap()
}

fn repository() -> HabitRepository<MemoryStore> {
    HabitRepository::with_id_source(MemoryStore::new(), Box::new(SequentialIds::new()))
}

#[cfg(test)]
mod crud_properties {
    use super::*;

    #[test]
    fn test_create_then_get_has_defaults() {
        let repo = repository();
        let now = instant("2025-06-05T08:00:00+00:00");

        for (name, description, frequency) in [
            ("Hydrate", "", 1u32),
            ("Run", "5k around the block", 2),
            ("Call home", "Sunday evenings", 7),
        ] {
            let id = repo.create(name, description, frequency, now).unwrap();
            let habit = repo.get_by_id(&id).unwrap();

            assert_eq!(habit.name, name);
            assert_eq!(habit.description, description);
            assert_eq!(habit.frequency_days, frequency);
            assert_eq!(habit.streak, 0);
            assert!(habit.logs.is_empty());
        }
    }

    #[test]
    fn test_list_returns_all_created() {
        let repo = repository();
        let now = instant("2025-06-05T08:00:00+00:00");

        let first = repo.create("One", "", 1, now).unwrap();
        let second = repo.create("Two", "", 1, now).unwrap();

        let ids: Vec<_> = repo.list_all().unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first));
        assert!(ids.contains(&second));
    }

    #[test]
    fn test_keys_carry_the_habit_prefix() {
        let repo = repository();
        let now = instant("2025-06-05T08:00:00+00:00");
        let id = repo.create("Hydrate", "", 1, now).unwrap();

        assert!(id.as_str().starts_with("id"));
        assert!(is_habit_key(id.as_str()));
    }
}

#[cfg(test)]
mod schedule_properties {
    use super::*;

    #[test]
    fn test_due_on_start_day_always() {
        let now = instant("2025-06-05T14:30:00+00:00");
        for frequency in [1u32, 2, 7, 30] {
            let habit = Habit::new("Test", "", frequency, now).unwrap();
            assert!(habit.is_due_on(now.date_naive()));
        }
    }

    #[test]
    fn test_not_due_before_start_day() {
        let now = instant("2025-06-05T14:30:00+00:00");
        let habit = Habit::new("Test", "", 1, now).unwrap();

        for offset in 1..30 {
            assert!(!habit.is_due_on(now.date_naive() - Duration::days(offset)));
        }
    }

    #[test]
    fn test_daily_habit_due_again_next_day() {
        // Create at T with frequency 1, complete at T: outstanding again at T+1
        let repo = repository();
        let now = instant("2025-06-05T08:00:00+00:00");
        let id = repo.create("Hydrate", "", 1, now).unwrap();
        repo.log_completion(&id, now).unwrap();

        let habit = repo.get_by_id(&id).unwrap();
        assert!(habit.is_complete_on(now.date_naive()));
        assert!(!habit.is_complete_on(now.date_naive() + Duration::days(1)));

        let habits = repo.list_all().unwrap();
        let tomorrow = now.date_naive() + Duration::days(1);
        let due = habits_due_on(&habits, tomorrow);
        assert!(due.iter().any(|(due_id, _)| *due_id == id));
    }

    #[test]
    fn test_weekly_habit_schedule() {
        // Sunday start, weekly frequency
        let now = instant("2025-06-01T10:00:00+00:00");
        let habit = Habit::new("Call home", "", 7, now).unwrap();

        assert!(!habit.is_due_on(now.date_naive() + Duration::days(3)));
        assert!(habit.is_due_on(now.date_naive() + Duration::days(7)));
    }
}

#[cfg(test)]
mod completion_and_streaks {
    use super::*;

    #[test]
    fn test_completion_round_trip() {
        let repo = repository();
        let now = instant("2025-06-05T08:00:00+00:00");
        let today = now.date_naive();
        let id = repo.create("Hydrate", "", 1, now).unwrap();

        repo.log_completion(&id, now).unwrap();
        assert!(repo.get_by_id(&id).unwrap().is_complete_on(today));

        repo.remove_last_completion(&id, now).unwrap();
        assert!(!repo.get_by_id(&id).unwrap().is_complete_on(today));
    }

    #[test]
    fn test_remove_on_empty_log_is_noop() {
        let repo = repository();
        let now = instant("2025-06-05T08:00:00+00:00");
        let id = repo.create("Hydrate", "", 1, now).unwrap();

        assert!(repo.remove_last_completion(&id, now).unwrap());
        assert_eq!(repo.get_by_id(&id).unwrap().logs.len(), 0);
    }

    #[test]
    fn test_unknown_id_is_invalid_habit() {
        let repo = repository();
        let now = instant("2025-06-05T08:00:00+00:00");
        let unknown = HabitId::from_key("id11111111-2222-4333-8444-555555555555").unwrap();

        assert!(matches!(
            repo.log_completion(&unknown, now),
            Err(RepositoryError::InvalidHabit { .. })
        ));
    }

    #[test]
    fn test_streak_zero_and_one() {
        let now = instant("2025-06-05T08:00:00+00:00");
        let mut habit = Habit::new("Hydrate", "", 1, now).unwrap();

        assert_eq!(calculate_streak(&habit, now).unwrap(), 0);

        habit.push_completion(now);
        assert_eq!(calculate_streak(&habit, now).unwrap(), 1);
    }

    #[test]
    fn test_streak_grows_with_consecutive_days() {
        let repo = repository();
        let start = instant("2025-06-01T08:00:00+00:00");
        let id = repo.create("Hydrate", "", 1, start).unwrap();

        for offset in 0..5 {
            let day = start + Duration::days(offset);
            repo.log_completion(&id, day).unwrap();
            assert_eq!(repo.get_by_id(&id).unwrap().streak, (offset + 1) as u32);
        }
    }
}

#[cfg(test)]
mod ratio_properties {
    use super::*;

    #[test]
    fn test_empty_store_ratio_and_due() {
        let repo = repository();
        let today = instant("2025-06-05T08:00:00+00:00").date_naive();

        let habits = repo.list_all().unwrap();
        assert!(habits_due_on(&habits, today).is_empty());
        assert_eq!(completion_ratio(&habits, today), (0, 0));
    }

    #[test]
    fn test_ratio_invariant_over_operation_sequences() {
        let repo = repository();
        let now = instant("2025-06-05T08:00:00+00:00");
        let today = now.date_naive();

        let first = repo.create("One", "", 1, now).unwrap();
        let second = repo.create("Two", "", 2, now).unwrap();
        let third = repo.create("Three", "", 7, now).unwrap();

        // Interleave completions, removals, and a delete; the invariant holds
        // after every step
        let check = |repo: &HabitRepository<MemoryStore>| {
            let habits = repo.list_all().unwrap();
            for offset in 0..10 {
                let (completed, total) = completion_ratio(&habits, today + Duration::days(offset));
                assert!(completed <= total);
            }
        };

        check(&repo);
        repo.log_completion(&first, now).unwrap();
        check(&repo);
        repo.log_completion(&second, now).unwrap();
        check(&repo);
        repo.remove_last_completion(&first, now).unwrap();
        check(&repo);
        repo.log_completion(&first, now).unwrap();
        repo.log_completion(&first, now).unwrap(); // same-day duplicate
        check(&repo);
        repo.delete(&third).unwrap();
        check(&repo);
    }
}

#[cfg(test)]
mod facade {
    use super::*;

    #[test]
    fn test_tracker_with_fixed_clock() {
        let clock = FixedClock(instant("2025-06-05T08:00:00+00:00"));
        let tracker = HabitTracker::with_capabilities(
            MemoryStore::new(),
            Box::new(clock),
            Box::new(SequentialIds::new()),
        );

        let id = tracker.create_habit("Hydrate", "Eight glasses", 1).unwrap();

        assert_eq!(tracker.completion_ratio().unwrap(), (0, 1));
        assert_eq!(tracker.habits_due_today().unwrap().len(), 1);

        tracker.log_completion(&id).unwrap();
        assert!(tracker.is_complete_today(&id).unwrap());
        assert_eq!(tracker.completion_ratio().unwrap(), (1, 1));
        assert!(tracker.habits_due_today().unwrap().is_empty());

        tracker.remove_last_completion(&id).unwrap();
        assert_eq!(tracker.completion_ratio().unwrap(), (0, 1));
    }

    #[test]
    fn test_raw_read_matches_stored_payload() {
        let clock = FixedClock(instant("2025-06-05T08:00:00+00:00"));
        let tracker =
            HabitTracker::with_clock(MemoryStore::new(), Box::new(clock));

        let id = tracker.create_habit("Hydrate", "", 1).unwrap();
        let raw = tracker.repository().read(&id).unwrap().unwrap();

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["habitName"], "Hydrate");
        assert_eq!(value["habitStreak"], 0);
        assert_eq!(value["logs"], serde_json::json!([]));
    }
}
