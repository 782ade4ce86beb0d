//! Constants used throughout the application.
//!
//! This module contains all constants used in the moodlens application, organized
//! into logical groups. Thresholds that drive the suggestion rules live here so
//! they can be read side by side with the rules that use them.

use std::time::Duration;

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "moodlens";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Mood check-ins with pattern-aware suggestions";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for the check-in database path.
pub const ENV_VAR_MOODLENS_DB: &str = "MOODLENS_DB";
/// Environment variable for pinning the session identifier.
pub const ENV_VAR_MOODLENS_SESSION: &str = "MOODLENS_SESSION";
/// Environment variable for the Ollama base URL.
pub const ENV_VAR_MOODLENS_OLLAMA_URL: &str = "MOODLENS_OLLAMA_URL";
/// Environment variable for the chat model name.
pub const ENV_VAR_MOODLENS_CHAT_MODEL: &str = "MOODLENS_CHAT_MODEL";
/// Environment variable for the analysis window size.
pub const ENV_VAR_MOODLENS_WINDOW: &str = "MOODLENS_WINDOW";
/// Default database location, expanded with `shellexpand`.
pub const DEFAULT_DB_PATH: &str = "~/.moodlens/moodlens.db";
/// File next to the database that remembers the generated session id.
pub const SESSION_ID_FILENAME: &str = "session_id";
/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "llama3.2:3b";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Analysis Window
/// Number of recent check-ins fetched for analysis.
pub const DEFAULT_ANALYSIS_WINDOW: usize = 10;
/// Largest accepted analysis window.
pub const MAX_ANALYSIS_WINDOW: usize = 50;
/// Fewest records for which any trend is computed.
pub const MIN_ANALYSIS_ENTRIES: usize = 2;
/// Fewest records for the full dashboard panel.
pub const MIN_DASHBOARD_ENTRIES: usize = 3;

// Check-in Values
/// Lowest stress rating.
pub const STRESS_MIN: u8 = 1;
/// Highest stress rating.
pub const STRESS_MAX: u8 = 5;
/// Ratings at or above this count as high stress.
pub const HIGH_STRESS_RATING: u8 = 4;

// Suggestion Thresholds (percentages unless noted)
/// `stress_management` fires above this high-stress frequency.
pub const STRESS_FREQUENCY_THRESHOLD: u32 = 60;
/// `routine` fires above this inconsistency.
pub const ROUTINE_INCONSISTENCY_THRESHOLD: u32 = 70;
/// `emotional_support` fires at or above this many consecutive dejected check-ins.
pub const DEJECTION_STREAK_THRESHOLD: u32 = 3;
/// `positive_reinforcement` needs consistency above this.
pub const POSITIVE_CONSISTENCY_THRESHOLD: u32 = 80;
/// `positive_reinforcement` needs average stress below this (rating scale).
pub const POSITIVE_STRESS_CEILING: f64 = 3.0;
/// `weekend_dips` needs average stress above this (rating scale).
pub const WEEKEND_DIP_STRESS: f64 = 3.5;
/// `weekend_dips` needs inconsistency above this.
pub const WEEKEND_DIP_INCONSISTENCY: u32 = 50;

// Chat
/// Pause between the welcome message and a proactive insight bubble.
pub const CHAT_INSIGHT_DELAY: Duration = Duration::from_millis(1500);
/// Messages kept in the chat history besides the system prompt.
pub const CHAT_HISTORY_LIMIT: usize = 20;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "moodlens";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
