/// Domain module containing core business logic and data types
///
/// This module defines the Habit record, the recurrence and streak logic
/// derived from its completion log, and the validation rules applied at
/// creation and revival time.

pub mod habit;
pub mod recurrence;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use streak::calculate_streak;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit record: {message}")]
    InvalidRecord { message: String },

    #[error("Invalid log entry in stored record: {entry}")]
    InvalidLogEntry { entry: String },

    #[error("Malformed log entry during streak computation: {entry}")]
    MalformedLog { entry: String },
}
