/// Core types and capabilities used throughout the domain layer
///
/// This module defines the habit key scheme, the injected id-generation and
/// clock capabilities, and the day-granularity time helpers shared by the
/// recurrence and streak logic.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

/// Prefix shared by every habit key in the store
///
/// The store may hold unrelated keys (themes, UI state); only keys that are
/// this prefix followed by a UUID are treated as habit records.
pub const HABIT_KEY_PREFIX: &str = "id";

/// One calendar day in milliseconds, the granularity of all recurrence math
pub const DAY_IN_MS: i64 = 86_400_000;

/// Unique identifier for a habit
///
/// Wraps the full store key (`"id"` + UUID) so a habit id can't be confused
/// with an arbitrary store key. Construction goes through `generate` or
/// `from_key`, which enforce the key shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HabitId(String);

impl HabitId {
    /// Generate a fresh habit id from the injected id source
    pub fn generate(ids: &dyn IdSource) -> Self {
        Self(format!("{}{}", HABIT_KEY_PREFIX, ids.next_id()))
    }

    /// Parse a store key into a habit id, rejecting keys that don't match
    /// the habit key shape (prefix + UUID)
    pub fn from_key(key: &str) -> Option<Self> {
        if is_habit_key(key) {
            Some(Self(key.to_string()))
        } else {
            None
        }
    }

    /// The full store key for this habit
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check whether a store key names a habit record
pub fn is_habit_key(key: &str) -> bool {
    match key.strip_prefix(HABIT_KEY_PREFIX) {
        Some(rest) => Uuid::parse_str(rest).is_ok(),
        None => false,
    }
}

/// Capability producing fresh opaque id strings
///
/// Injected into the repository so tests can substitute deterministic ids.
pub trait IdSource {
    /// Return a fresh id string, unique per call
    fn next_id(&self) -> String;
}

/// Default id source backed by random v4 UUIDs
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Capability reporting the current instant
///
/// All time-sensitive operations read the clock exactly once at the facade
/// boundary, so the domain logic underneath is deterministic and testable.
pub trait Clock {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Default clock reading the system wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for deterministic consumers and tests
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Day index of an instant: whole days since the Unix epoch
///
/// Euclidean division so pre-epoch instants still map to the correct day.
pub fn day_index(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis().div_euclid(DAY_IN_MS)
}

/// Parse a stored date/time string into an instant
///
/// Historical records carry several formats (RFC 3339 from this engine,
/// locale-style day strings from older data), so parsing is permissive.
/// Returns `None` rather than failing so read paths can fall back safely.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    // Day-only formats, including the "Thu Jun 05 2025" shape older records used
    for format in ["%Y-%m-%d", "%a %b %d %Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&parsed.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}
