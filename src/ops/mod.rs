//! User-facing operations behind the CLI subcommands.
//!
//! Each operation takes its store, engine and output writer as arguments so
//! it can run against an in-memory store in tests.

pub mod chat;
pub mod checkin;
pub mod insights;

pub use chat::{run_chat, ChatOptions};
pub use checkin::{render_outcome, submit_checkin, CheckinInput, CheckinOutcome};
pub use insights::{render_dashboard, show_insights};
