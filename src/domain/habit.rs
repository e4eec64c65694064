/// Habit record and related functionality
///
/// This module defines the Habit struct that represents a recurring task the
/// user wants to track, along with its persisted wire shape, validation
/// rules, and the revival path that brings stored records back to a
/// canonical form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::domain::types::parse_instant;
use crate::domain::DomainError;

/// A habit is a recurring task with a completion history
///
/// The serde field names are the persisted record format; other tooling
/// reads these exact keys, so renames here are a breaking change.
/// `streak` is a cached value recomputed on every completion-log mutation;
/// `logs` holds one date-time string per completion, most recent last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Display name (e.g., "Morning Run")
    #[serde(rename = "habitName")]
    pub name: String,
    /// Detailed description, may be empty
    #[serde(rename = "habitDescription")]
    pub description: String,
    /// Days between scheduled occurrences (1 = daily, 7 = weekly)
    #[serde(rename = "habitFrequency", deserialize_with = "coerce_count")]
    pub frequency_days: u32,
    /// First scheduled occurrence; canonical form is RFC 3339
    #[serde(rename = "startDateTime")]
    pub start_date_time: String,
    /// Cached consecutive-completion count, recomputable from `logs`
    #[serde(rename = "habitStreak", deserialize_with = "coerce_count")]
    pub streak: u32,
    /// Completion timestamps, append-only plus remove-most-recent
    #[serde(rename = "logs")]
    pub logs: Vec<String>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// The start instant is the moment of creation; streak and log start
    /// empty. Returns a validation error for an empty name or a zero
    /// frequency.
    pub fn new(
        name: &str,
        description: &str,
        frequency_days: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::validate_name(name)?;
        Self::validate_description(description)?;
        Self::validate_frequency(frequency_days)?;

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            frequency_days,
            start_date_time: now.to_rfc3339(),
            streak: 0,
            logs: Vec::new(),
        })
    }

    /// Revive a stored record into a canonical habit
    ///
    /// Numeric fields stored as strings are coerced; a value that is neither
    /// a number nor a numeric string fails loudly instead of corrupting the
    /// record (the raw payload stays readable through the repository's raw
    /// read path). The start date is re-normalized to RFC 3339 when it
    /// parses and preserved verbatim when it doesn't, in which case the
    /// recurrence engine treats the habit as never due. Every log entry
    /// must parse as a date/time.
    pub fn revive(raw: &str) -> Result<Self, DomainError> {
        let mut habit: Habit =
            serde_json::from_str(raw).map_err(|e| DomainError::InvalidRecord {
                message: e.to_string(),
            })?;

        if let Some(start) = parse_instant(&habit.start_date_time) {
            habit.start_date_time = start.to_rfc3339();
        }

        for entry in &habit.logs {
            if parse_instant(entry).is_none() {
                return Err(DomainError::InvalidLogEntry {
                    entry: entry.clone(),
                });
            }
        }

        Ok(habit)
    }

    /// Check whether this habit was completed on the given calendar day
    ///
    /// Compares at day granularity; duplicate same-day entries and entries
    /// that fail to parse both leave the answer unchanged.
    pub fn is_complete_on(&self, date: NaiveDate) -> bool {
        self.logs
            .iter()
            .filter_map(|entry| parse_instant(entry))
            .any(|instant| instant.date_naive() == date)
    }

    /// Append a completion at the given instant
    ///
    /// Same-day duplicates are appended as-is; completion checks dedupe by
    /// calendar day, so a double tap inflates the log but not the answer.
    pub fn push_completion(&mut self, now: DateTime<Utc>) {
        self.logs.push(now.to_rfc3339());
    }

    /// Remove the most recently appended completion, if any
    pub fn pop_completion(&mut self) -> Option<String> {
        self.logs.pop()
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::Validation {
                message: "Habit name cannot be empty".to_string(),
            });
        }

        if trimmed.len() > 100 {
            return Err(DomainError::Validation {
                message: "Habit name cannot be longer than 100 characters".to_string(),
            });
        }

        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.len() > 500 {
            return Err(DomainError::Validation {
                message: "Description cannot be longer than 500 characters".to_string(),
            });
        }
        Ok(())
    }

    fn validate_frequency(frequency_days: u32) -> Result<(), DomainError> {
        if frequency_days == 0 {
            return Err(DomainError::Validation {
                message: "Frequency must be at least 1 day".to_string(),
            });
        }
        Ok(())
    }
}

/// Deserialize a non-negative count from a JSON number or a numeric string
///
/// Historical records stored counts as strings ("7"); both forms revive to
/// the same value. Anything else is an explicit error, never a silent
/// garbage value.
fn coerce_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a non-negative integer or numeric string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u32, E> {
            u32::try_from(value).map_err(|_| E::custom("count out of range"))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u32, E> {
            u32::try_from(value).map_err(|_| E::custom("count out of range"))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u32, E> {
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
                Ok(value as u32)
            } else {
                Err(E::custom("count out of range"))
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u32, E> {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| E::custom(format!("cannot coerce {:?} to a count", value)))
        }
    }

    deserializer.deserialize_any(CountVisitor)
}
