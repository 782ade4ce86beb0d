//! Configuration management for the moodlens application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `MOODLENS_DB`: Path to the check-in database (defaults to ~/.moodlens/moodlens.db)
//! - `MOODLENS_SESSION`: Session id; generated and remembered when unset
//! - `MOODLENS_OLLAMA_URL`: Ollama endpoint (defaults to http://127.0.0.1:11434)
//! - `MOODLENS_CHAT_MODEL`: Chat model (defaults to llama3.2:3b)
//! - `MOODLENS_WINDOW`: Number of recent check-ins analyzed (defaults to 10)

use crate::constants::{
    DEFAULT_ANALYSIS_WINDOW, DEFAULT_CHAT_MODEL, DEFAULT_DB_PATH, DEFAULT_OLLAMA_URL,
    ENV_VAR_MOODLENS_CHAT_MODEL, ENV_VAR_MOODLENS_DB, ENV_VAR_MOODLENS_OLLAMA_URL,
    ENV_VAR_MOODLENS_SESSION, ENV_VAR_MOODLENS_WINDOW, MAX_ANALYSIS_WINDOW, MIN_ANALYSIS_ENTRIES,
    REDACTED_PLACEHOLDER, SESSION_ID_FILENAME,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for the moodlens application.
///
/// # Examples
///
/// ```
/// use moodlens::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     database_path: PathBuf::from("/tmp/moodlens.db"),
///     session_id: Some("my-session".to_string()),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// SQLite file holding the check-ins.
    pub database_path: PathBuf,

    /// Session id pinned through the environment or the command line.
    ///
    /// When `None`, `resolve_session_id` generates one and stores it next to
    /// the database.
    pub session_id: Option<String>,

    /// Base URL of the Ollama API.
    pub ollama_url: String,

    /// Model used for chat completions.
    pub chat_model: String,

    /// Number of recent check-ins analyzed.
    pub analysis_window: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &REDACTED_PLACEHOLDER)
            .field(
                "session_id",
                &self.session_id.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .field("ollama_url", &self.ollama_url)
            .field("chat_model", &self.chat_model)
            .field("analysis_window", &self.analysis_window)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from(""),
            session_id: None,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            analysis_window: DEFAULT_ANALYSIS_WINDOW,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The database path is expanded with `shellexpand` to handle `~` and
    /// environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The database path expansion fails
    /// - `MOODLENS_WINDOW` is not a number
    pub fn load() -> AppResult<Self> {
        let db_raw = env::var(ENV_VAR_MOODLENS_DB).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let expanded = shellexpand::full(&db_raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let database_path = PathBuf::from(expanded.into_owned());

        let session_id = env::var(ENV_VAR_MOODLENS_SESSION)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let ollama_url = env::var(ENV_VAR_MOODLENS_OLLAMA_URL)
            .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let chat_model = env::var(ENV_VAR_MOODLENS_CHAT_MODEL)
            .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        let analysis_window = match env::var(ENV_VAR_MOODLENS_WINDOW) {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|_| {
                AppError::Config(format!(
                    "{} must be a whole number, got '{}'",
                    ENV_VAR_MOODLENS_WINDOW, raw
                ))
            })?,
            Err(_) => DEFAULT_ANALYSIS_WINDOW,
        };

        Ok(Config {
            database_path,
            session_id,
            ollama_url,
            chat_model,
            analysis_window,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Database path is empty"
    /// - "Database path must be an absolute path"
    /// - "Analysis window must be between 2 and 50"
    /// - "Chat model is empty"
    pub fn validate(&self) -> AppResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if !self.database_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        if !(MIN_ANALYSIS_ENTRIES..=MAX_ANALYSIS_WINDOW).contains(&self.analysis_window) {
            return Err(AppError::Config(format!(
                "Analysis window must be between {} and {}",
                MIN_ANALYSIS_ENTRIES, MAX_ANALYSIS_WINDOW
            )));
        }

        if self.chat_model.trim().is_empty() {
            return Err(AppError::Config("Chat model is empty".to_string()));
        }

        Ok(())
    }

    /// Returns the session id to use, generating and remembering one if needed.
    ///
    /// A pinned `session_id` wins. Otherwise the id stored in a `session_id`
    /// file next to the database is reused, or a new v4 uuid is written there.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the session file cannot be read or written.
    pub fn resolve_session_id(&self) -> AppResult<String> {
        if let Some(id) = &self.session_id {
            return Ok(id.clone());
        }

        let session_file = self.session_file();
        if session_file.exists() {
            let stored = fs::read_to_string(&session_file)?.trim().to_string();
            if !stored.is_empty() {
                debug!("Reusing stored session id");
                return Ok(stored);
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        if let Some(parent) = session_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&session_file, &id)?;
        info!("Started a new anonymous session");
        Ok(id)
    }

    fn session_file(&self) -> PathBuf {
        self.database_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(SESSION_ID_FILENAME)
    }
}
