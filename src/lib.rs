/// Public library interface for the habit ledger
///
/// This module exports the habit tracker facade and the public types
/// that can be used by other applications or tests.

use chrono::NaiveDate;

// Internal modules
mod analytics;
mod domain;
mod repository;
mod storage;

// Re-export public modules and types
pub use analytics::{completion_ratio, habits_due_on};
pub use domain::*;
pub use repository::{HabitRepository, RepositoryError};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

/// Habit tracker facade wiring the repository to a clock
///
/// Owns a repository over the chosen store and reads the injected clock
/// exactly once per operation, so everything below the facade takes
/// explicit instants and stays deterministic. The repository is reachable
/// directly for callers that want to supply their own instants.
pub struct HabitTracker<S: KeyValueStore> {
    repository: HabitRepository<S>,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> HabitTracker<S> {
    /// Create a tracker over the given store with the system clock
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    /// Create a tracker with an injected clock
    pub fn with_clock(store: S, clock: Box<dyn Clock>) -> Self {
        Self {
            repository: HabitRepository::new(store),
            clock,
        }
    }

    /// Create a tracker with injected clock and id source
    pub fn with_capabilities(store: S, clock: Box<dyn Clock>, ids: Box<dyn IdSource>) -> Self {
        Self {
            repository: HabitRepository::with_id_source(store, ids),
            clock,
        }
    }

    /// Get a reference to the repository (useful for testing)
    pub fn repository(&self) -> &HabitRepository<S> {
        &self.repository
    }

    /// Create a habit starting now; returns its id
    pub fn create_habit(
        &self,
        name: &str,
        description: &str,
        frequency_days: u32,
    ) -> Result<HabitId, RepositoryError> {
        self.repository
            .create(name, description, frequency_days, self.clock.now())
    }

    /// Load a habit by id
    pub fn habit(&self, id: &HabitId) -> Result<Habit, RepositoryError> {
        self.repository.get_by_id(id)
    }

    /// Delete a habit; idempotent
    pub fn delete_habit(&self, id: &HabitId) -> Result<(), RepositoryError> {
        self.repository.delete(id)
    }

    /// List every habit with its id
    pub fn list_habits(&self) -> Result<Vec<(HabitId, Habit)>, RepositoryError> {
        self.repository.list_all()
    }

    /// Check whether the habit has been completed today
    pub fn is_complete_today(&self, id: &HabitId) -> Result<bool, RepositoryError> {
        let habit = self.repository.get_by_id(id)?;
        Ok(habit.is_complete_on(self.clock.now().date_naive()))
    }

    /// Record a completion of the habit right now
    pub fn log_completion(&self, id: &HabitId) -> Result<bool, RepositoryError> {
        self.repository.log_completion(id, self.clock.now())
    }

    /// Remove the habit's most recent completion
    pub fn remove_last_completion(&self, id: &HabitId) -> Result<bool, RepositoryError> {
        self.repository
            .remove_last_completion(id, self.clock.now())
    }

    /// Outstanding habits for an arbitrary date
    pub fn habits_due_on(&self, date: NaiveDate) -> Result<Vec<(HabitId, Habit)>, RepositoryError> {
        let habits = self.repository.list_all()?;
        Ok(analytics::habits_due_on(&habits, date))
    }

    /// Outstanding habits for today
    pub fn habits_due_today(&self) -> Result<Vec<(HabitId, Habit)>, RepositoryError> {
        self.habits_due_on(self.clock.now().date_naive())
    }

    /// Completed/total counts for an arbitrary date
    pub fn completion_ratio_on(&self, date: NaiveDate) -> Result<(u32, u32), RepositoryError> {
        let habits = self.repository.list_all()?;
        Ok(analytics::completion_ratio(&habits, date))
    }

    /// Completed/total counts for today
    pub fn completion_ratio(&self) -> Result<(u32, u32), RepositoryError> {
        self.completion_ratio_on(self.clock.now().date_naive())
    }
}
