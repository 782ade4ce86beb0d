//! Mood-pattern analysis and suggestion engine.
//!
//! The pipeline runs store → analyzer → generator, then hands the suggestions
//! either to the delivery coordinator (chat bubble, dashboard) or to the prompt
//! augmenter (outgoing LLM message).
//!
//! # Module Structure
//!
//! - `analyzer`: Window statistics, streaks and trigger tags
//! - `suggestions`: Threshold rules producing prioritized suggestions
//! - `delivery`: Surface selection and per-session deduplication
//! - `prompt`: Prompt augmentation and check-in chat openers
//! - `summary`: Plain-language dashboard summary
//!
//! `InsightEngine` wraps the pipeline for callers whose primary action must
//! never fail because of it: every entry point logs internal faults and
//! returns "no suggestions" instead.

pub mod analyzer;
pub mod delivery;
pub mod prompt;
pub mod suggestions;
pub mod summary;

pub use analyzer::{analyze, PatternSummary, TriggerTag};
pub use delivery::{dashboard_items, pick_for_surface, DeliverySession, Surface};
pub use prompt::{augment, checkin_chat_opener};
pub use suggestions::{conversation_starters, generate, Priority, Suggestion, SuggestionKind};
pub use summary::InsightSummary;

use crate::checkin::CheckinRecord;
use crate::constants::{DEFAULT_ANALYSIS_WINDOW, MIN_DASHBOARD_ENTRIES};
use crate::errors::AppResult;
use crate::store::CheckinStore;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Everything the check-in dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardInsights {
    pub summary: InsightSummary,
    pub suggestions: Vec<Suggestion>,
    pub conversation_starters: Vec<&'static str>,
}

/// Best-effort facade over the analysis pipeline for one store.
pub struct InsightEngine<'a, S: CheckinStore + ?Sized> {
    store: &'a S,
    window: usize,
}

impl<'a, S: CheckinStore + ?Sized> InsightEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            window: DEFAULT_ANALYSIS_WINDOW,
        }
    }

    /// Sets how many recent check-ins are analyzed.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Loads the session's recent check-ins, skipping rows that fail validation.
    ///
    /// Records come back newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store itself fails.
    pub fn load_records(&self, session_id: &str) -> AppResult<Vec<CheckinRecord>> {
        let rows = self.store.fetch_recent(session_id, self.window)?;
        let fetched = rows.len();

        let records: Vec<CheckinRecord> = rows
            .into_iter()
            .filter_map(|row| match CheckinRecord::try_from(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping malformed check-in: {}", e);
                    None
                }
            })
            .collect();

        debug!("Loaded {} of {} check-ins", records.len(), fetched);
        Ok(records)
    }

    /// Analyzes the session's recent check-ins.
    ///
    /// Returns `None` for too little data or an unavailable store.
    pub fn pattern_summary(&self, session_id: &str) -> Option<PatternSummary> {
        match self.load_records(session_id) {
            Ok(records) => analyze(&records),
            Err(e) => {
                warn!("Check-in store unavailable, skipping analysis: {}", e);
                None
            }
        }
    }

    /// Suggestions for the session, in rule order. Empty on any failure.
    pub fn suggestions(&self, session_id: &str) -> Vec<Suggestion> {
        generate(self.pattern_summary(session_id).as_ref())
    }

    /// Dashboard panel data, once the session has at least three usable check-ins.
    pub fn dashboard(&self, session_id: &str) -> Option<DashboardInsights> {
        let records = match self.load_records(session_id) {
            Ok(records) => records,
            Err(e) => {
                warn!("Check-in store unavailable, skipping dashboard: {}", e);
                return None;
            }
        };

        if records.len() < MIN_DASHBOARD_ENTRIES {
            debug!("Not enough check-ins for the dashboard: {}", records.len());
            return None;
        }

        let pattern = analyze(&records)?;
        let suggestions = generate(Some(&pattern))
            .into_iter()
            .filter(|s| s.priority.is_actionable())
            .collect();

        Some(DashboardInsights {
            summary: InsightSummary::from_pattern(&pattern),
            suggestions,
            conversation_starters: conversation_starters(&pattern),
        })
    }

    /// Refreshes suggestions right after a check-in was stored and hands the
    /// actionable ones over to the chat.
    pub fn on_checkin_stored(
        &self,
        session_id: &str,
        delivery: &mut DeliverySession,
    ) -> Vec<Suggestion> {
        let suggestions = self.suggestions(session_id);
        delivery.stash_pending(&suggestions);
        info!("Refreshed {} suggestions after check-in", suggestions.len());
        suggestions
    }

    /// The proactive chat bubble for a starting chat, if one is due.
    ///
    /// Suggestions handed over by a check-in take precedence over a fresh
    /// analysis.
    pub fn chat_insight(
        &self,
        session_id: &str,
        delivery: &mut DeliverySession,
    ) -> Option<Suggestion> {
        let pending = delivery.take_pending();
        if let Some(picked) = delivery.pick_for_chat(&pending) {
            return Some(picked);
        }
        delivery.pick_for_chat(&self.suggestions(session_id))
    }

    /// The message to send to the LLM for `user_message`.
    pub fn augment_outgoing(&self, session_id: &str, user_message: &str) -> String {
        augment(user_message, &self.suggestions(session_id))
    }
}
