/// Habit repository: CRUD and completion-log mutations over a key/value store
///
/// Owns the identifier scheme and serialization. All reads and writes go
/// through the injected `KeyValueStore`; ids come from the injected
/// `IdSource`. Load-modify-persist sequences here are not atomic;
/// concurrent writers to the same id are last-writer-wins.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{calculate_streak, DomainError, Habit, HabitId, IdSource, UuidSource};
use crate::storage::{KeyValueStore, StorageError};

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// `get_by_id` on an id with no record behind it
    #[error("Habit not found: {habit_id}")]
    NotFound { habit_id: String },

    /// Completion-log mutation referencing an id with no record behind it.
    /// Distinct from trivial successes like popping an empty log.
    #[error("Invalid habit: {habit_id}")]
    InvalidHabit { habit_id: String },
}

/// Repository over any conforming key/value backend
pub struct HabitRepository<S: KeyValueStore> {
    store: S,
    ids: Box<dyn IdSource>,
}

impl<S: KeyValueStore> HabitRepository<S> {
    /// Create a repository with the default UUID id source
    pub fn new(store: S) -> Self {
        Self::with_id_source(store, Box::new(UuidSource))
    }

    /// Create a repository with an injected id source
    pub fn with_id_source(store: S, ids: Box<dyn IdSource>) -> Self {
        Self { store, ids }
    }

    /// Access the underlying store (useful for testing)
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a new habit and return its id
    ///
    /// Validates the fields, assigns a fresh prefixed id, and persists a
    /// record with `now` as the start instant, a zero streak, and an empty
    /// log.
    pub fn create(
        &self,
        name: &str,
        description: &str,
        frequency_days: u32,
        now: DateTime<Utc>,
    ) -> Result<HabitId, RepositoryError> {
        let habit = Habit::new(name, description, frequency_days, now)?;
        let id = HabitId::generate(self.ids.as_ref());

        self.put(&id, &habit)?;

        tracing::debug!("Created habit: {} ({})", habit.name, id);
        Ok(id)
    }

    /// Read the raw stored payload for a habit, without deserializing
    ///
    /// Pass-through get, used for exact-payload comparisons; `Ok(None)`
    /// when no record exists.
    pub fn read(&self, id: &HabitId) -> Result<Option<String>, RepositoryError> {
        Ok(self.store.get(id.as_str())?)
    }

    /// Load and revive a habit by id
    ///
    /// A missing record is `NotFound`; a record that exists but cannot be
    /// revived surfaces the revival error instead.
    pub fn get_by_id(&self, id: &HabitId) -> Result<Habit, RepositoryError> {
        let raw = self
            .store
            .get(id.as_str())?
            .ok_or_else(|| RepositoryError::NotFound {
                habit_id: id.to_string(),
            })?;

        Ok(Habit::revive(&raw)?)
    }

    /// Persist a habit at the given id, replacing any previous record
    pub fn put(&self, id: &HabitId, habit: &Habit) -> Result<(), RepositoryError> {
        let payload = serde_json::to_string(habit)?;
        self.store.set(id.as_str(), &payload)?;
        Ok(())
    }

    /// Delete a habit; idempotent, deleting an absent id is not an error
    pub fn delete(&self, id: &HabitId) -> Result<(), RepositoryError> {
        self.store.delete(id.as_str())?;
        tracing::debug!("Deleted habit: {}", id);
        Ok(())
    }

    /// List every habit in the store
    ///
    /// Filters the store's keys to habit-shaped ones, revives each record,
    /// and returns (id, habit) pairs in ascending key order. Records that
    /// fail revival are skipped with a warning so one bad record cannot
    /// abort a whole-collection query; `get_by_id` still surfaces their
    /// errors individually. Always returns a vec, empty when no habits
    /// exist.
    pub fn list_all(&self) -> Result<Vec<(HabitId, Habit)>, RepositoryError> {
        let mut keys = self.store.list_keys()?;
        keys.sort();

        let mut habits = Vec::new();
        for key in keys {
            let id = match HabitId::from_key(&key) {
                Some(id) => id,
                None => continue, // unrelated key sharing the store
            };

            let raw = match self.store.get(&key)? {
                Some(raw) => raw,
                None => continue,
            };

            match Habit::revive(&raw) {
                Ok(habit) => habits.push((id, habit)),
                Err(e) => {
                    tracing::warn!("Skipping unrevivable habit record {}: {}", key, e);
                }
            }
        }

        Ok(habits)
    }

    /// Record a completion of the habit at the current instant
    ///
    /// An unknown id is an `InvalidHabit` error, not a `false` return.
    /// Appends `now` to the log (same-day duplicates included), recomputes
    /// the cached streak, persists, and returns `true`.
    pub fn log_completion(&self, id: &HabitId, now: DateTime<Utc>) -> Result<bool, RepositoryError> {
        let mut habit = self.load_for_mutation(id)?;

        habit.push_completion(now);
        habit.streak = calculate_streak(&habit, now)?;
        self.put(id, &habit)?;

        tracing::debug!("Logged completion for {} (streak {})", id, habit.streak);
        Ok(true)
    }

    /// Remove the most recently logged completion of the habit
    ///
    /// An unknown id is an `InvalidHabit` error; popping an empty log is a
    /// no-op that still succeeds. Recomputes the cached streak, persists,
    /// and returns `true`.
    pub fn remove_last_completion(
        &self,
        id: &HabitId,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut habit = self.load_for_mutation(id)?;

        habit.pop_completion();
        habit.streak = calculate_streak(&habit, now)?;
        self.put(id, &habit)?;

        tracing::debug!("Removed completion for {} (streak {})", id, habit.streak);
        Ok(true)
    }

    fn load_for_mutation(&self, id: &HabitId) -> Result<Habit, RepositoryError> {
        match self.get_by_id(id) {
            Ok(habit) => Ok(habit),
            Err(RepositoryError::NotFound { habit_id }) => {
                Err(RepositoryError::InvalidHabit { habit_id })
            }
            Err(e) => Err(e),
        }
    }
}
