//! Error handling utilities for the moodlens application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Nothing in the insight engine returns these errors to its callers: the engine
//! logs them and degrades to "no suggestions". They surface only from the store,
//! the LLM client and the command-line flows.

use thiserror::Error;

/// Represents a check-in row that cannot be turned into a valid record.
///
/// The analysis pipeline skips records that fail validation instead of
/// aborting the batch, so a single bad row only loses itself.
///
/// # Examples
///
/// ```
/// use moodlens::errors::RecordError;
///
/// let error = RecordError::StressOutOfRange(9);
/// assert!(format!("{}", error).contains("9"));
/// assert!(format!("{}", error).contains("1 and 5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field was absent.
    #[error("Check-in is missing required field '{0}'")]
    MissingField(&'static str),

    /// The routine value is not one of the known options.
    #[error("Unknown routine value '{0}'. Expected 'Consistent', 'Partly off' or 'Totally off'")]
    InvalidRoutine(String),

    /// The stress rating is outside the 1-5 scale.
    #[error("Stress rating {0} is out of range; it must be between 1 and 5")]
    StressOutOfRange(i64),

    /// The creation timestamp could not be parsed.
    #[error("Invalid check-in timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use moodlens::errors::DatabaseError;
///
/// let error = DatabaseError::Custom("schema mismatch".to_string());
/// assert!(format!("{}", error).contains("schema mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other moodlens instances.")]
    Pool(#[from] r2d2::Error),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Represents specific error cases that can occur during AI operations.
///
/// # Examples
///
/// ```
/// use moodlens::errors::AIError;
///
/// let error = AIError::ModelNotFound("llama3.2:3b".to_string());
/// assert!(format!("{}", error).contains("llama3.2:3b"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// Ollama API is not reachable.
    #[error("Ollama API error: {0}. Is Ollama running? Try: ollama serve")]
    OllamaOffline(#[source] reqwest::Error),

    /// Requested model not found in Ollama.
    #[error("Model not found: {0}. Try: ollama pull {0}")]
    ModelNotFound(String),

    /// Invalid or unexpected response from Ollama API.
    #[error("Invalid response from Ollama: {0}")]
    InvalidResponse(String),
}

/// Represents all possible errors that can occur in the moodlens application.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use moodlens::errors::AppError;
///
/// let error = AppError::Config("Missing database path".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing database path");
/// ```
///
/// Converting from an IO error:
/// ```
/// use moodlens::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem or terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A check-in failed validation.
    #[error("Invalid check-in: {0}")]
    Checkin(#[from] RecordError),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors related to AI operations.
    #[error("AI error: {0}")]
    AI(#[from] AIError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use moodlens::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Config("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
