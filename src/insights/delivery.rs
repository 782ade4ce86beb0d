//! Deciding which suggestion to surface where.
//!
//! The chat surface shows at most one proactive suggestion: the first
//! high-priority one in generator order. The dashboard lists every high and
//! medium suggestion. `DeliverySession` remembers which kinds the chat has
//! already shown so the same hint is not pushed twice in one session.

use super::suggestions::{Priority, Suggestion, SuggestionKind};
use std::collections::HashSet;
use tracing::debug;

/// Where a suggestion is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// A proactive "Pattern Insight" bubble in the chat stream.
    Chat,
    /// The check-in history panel.
    Dashboard,
}

/// Picks the suggestion to surface now, if any.
///
/// For `Surface::Chat` this is the first high-priority suggestion in input
/// order. The dashboard gets no single pick; it renders `dashboard_items`.
pub fn pick_for_surface(suggestions: &[Suggestion], surface: Surface) -> Option<&Suggestion> {
    match surface {
        Surface::Chat => suggestions.iter().find(|s| s.priority == Priority::High),
        Surface::Dashboard => None,
    }
}

/// High and medium suggestions, in input order, for the dashboard bullets.
pub fn dashboard_items(suggestions: &[Suggestion]) -> Vec<&Suggestion> {
    suggestions
        .iter()
        .filter(|s| s.priority.is_actionable())
        .collect()
}

/// Per-session delivery state for the chat surface.
///
/// Holds the kinds already surfaced in chat and the suggestions handed over
/// by the latest check-in. It lives as long as one chat session and is never
/// persisted.
#[derive(Debug, Default)]
pub struct DeliverySession {
    shown: HashSet<SuggestionKind>,
    pending: Vec<Suggestion>,
}

impl DeliverySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the first high-priority suggestion whose kind has not been shown
    /// in this session's chat yet, and marks it as shown.
    pub fn pick_for_chat(&mut self, suggestions: &[Suggestion]) -> Option<Suggestion> {
        let fresh: Vec<Suggestion> = suggestions
            .iter()
            .filter(|s| !self.shown.contains(&s.kind))
            .cloned()
            .collect();

        let picked = pick_for_surface(&fresh, Surface::Chat)?.clone();
        self.shown.insert(picked.kind);
        debug!("Surfacing {} suggestion in chat", picked.kind);
        Some(picked)
    }

    pub fn was_shown(&self, kind: SuggestionKind) -> bool {
        self.shown.contains(&kind)
    }

    /// Keeps the high and medium suggestions from a check-in for the chat to
    /// pick up, replacing anything still pending.
    pub fn stash_pending(&mut self, suggestions: &[Suggestion]) {
        self.pending = suggestions
            .iter()
            .filter(|s| s.priority.is_actionable())
            .cloned()
            .collect();
    }

    /// Drains the pending suggestions; a second call returns nothing.
    pub fn take_pending(&mut self) -> Vec<Suggestion> {
        std::mem::take(&mut self.pending)
    }
}
