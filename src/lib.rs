/*!
# Moodlens

Moodlens records short daily mood check-ins and turns the most recent ones into
gentle, prioritized suggestions. The suggestions surface in two places: a
proactive "Pattern Insight" when a support chat opens, and the insights
dashboard shown after each check-in. Every message sent to the chat model is
augmented with the same pattern context.

## Architecture

- `checkin`: Check-in records and their validation
- `insights`: Pattern analysis, suggestion rules, delivery and prompt augmentation
- `store`: The `CheckinStore` seam plus an in-memory implementation
- `db`: SQLite storage with connection pooling
- `ai`: Ollama chat client and persona prompt
- `ops`: The check-in, insights and chat operations
- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure

## Usage Example

```rust
use moodlens::checkin::{CheckinRecord, Routine};
use moodlens::store::{CheckinStore, MemoryCheckinStore};
use moodlens::InsightEngine;
use chrono::{Duration, Utc};

fn main() -> moodlens::AppResult<()> {
    let store = MemoryCheckinStore::new();
    let start = Utc::now() - Duration::days(3);
    for day in 0..3 {
        let record = CheckinRecord::new(
            "demo",
            Routine::TotallyOff,
            5,
            false,
            None,
            start + Duration::days(day),
        )?;
        store.insert(&record)?;
    }

    let engine = InsightEngine::new(&store);
    let suggestions = engine.suggestions("demo");
    assert_eq!(suggestions[0].kind.as_str(), "stress_management");
    Ok(())
}
```
*/

pub mod ai;
pub mod checkin;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
pub mod constants;
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
pub mod insights;
pub mod ops;
pub mod store;

// Re-export important types for convenience
pub use checkin::{CheckinRecord, Routine, StoredCheckin};
pub use cli::CliArgs;
pub use config::Config;
pub use db::Database;
pub use errors::{AppError, AppResult};
pub use insights::{DeliverySession, InsightEngine, PatternSummary, Suggestion};
pub use store::{CheckinStore, MemoryCheckinStore};
