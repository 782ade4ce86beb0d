//! Threshold rules that turn a pattern summary into suggestions.
//!
//! Every rule is checked on its own; a summary can trigger several of them.
//! Output keeps rule order, not priority order.

use super::analyzer::PatternSummary;
use crate::constants::{
    DEJECTION_STREAK_THRESHOLD, POSITIVE_CONSISTENCY_THRESHOLD, POSITIVE_STRESS_CEILING,
    ROUTINE_INCONSISTENCY_THRESHOLD, STRESS_FREQUENCY_THRESHOLD,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// What a suggestion is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    StressManagement,
    Routine,
    EmotionalSupport,
    PositiveReinforcement,
    WeekendSupport,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::StressManagement => "stress_management",
            SuggestionKind::Routine => "routine",
            SuggestionKind::EmotionalSupport => "emotional_support",
            SuggestionKind::PositiveReinforcement => "positive_reinforcement",
            SuggestionKind::WeekendSupport => "weekend_support",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggestion priority; `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// High and medium suggestions are the ones shown to the user or the model.
    pub fn is_actionable(&self) -> bool {
        *self >= Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A templated hint with a priority tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub message: &'static str,
    pub priority: Priority,
}

impl Suggestion {
    fn new(kind: SuggestionKind, priority: Priority) -> Self {
        Suggestion {
            kind,
            message: message_for(kind),
            priority,
        }
    }
}

fn message_for(kind: SuggestionKind) -> &'static str {
    match kind {
        SuggestionKind::StressManagement => "I've noticed your stress levels have been higher than usual lately. Consider taking short breaks between study sessions or trying a 5-minute breathing exercise.",
        SuggestionKind::Routine => "Your routine has been quite irregular recently. This might be contributing to stress - maybe try setting one small daily anchor, like a morning check-in?",
        SuggestionKind::EmotionalSupport => "You've been feeling down for a few days. That takes courage to acknowledge. Would it help to talk about what's been on your mind?",
        SuggestionKind::PositiveReinforcement => "You've been doing great maintaining your routine! It's clearly helping keep your stress manageable. Keep up the excellent work.",
        SuggestionKind::WeekendSupport => "I notice your motivation tends to dip on weekends. Maybe try a gentle morning routine or one small meaningful activity to start your day?",
    }
}

/// Generates suggestions for a summary, in rule order.
///
/// Returns an empty list when `summary` is `None` or no rule fires.
///
/// # Examples
///
/// ```
/// use moodlens::insights::generate;
///
/// assert!(generate(None).is_empty());
/// ```
pub fn generate(summary: Option<&PatternSummary>) -> Vec<Suggestion> {
    let Some(summary) = summary else {
        return Vec::new();
    };

    let mut suggestions = Vec::new();

    if summary.high_stress_frequency > STRESS_FREQUENCY_THRESHOLD {
        suggestions.push(Suggestion::new(
            SuggestionKind::StressManagement,
            Priority::High,
        ));
    }

    if summary.routine_inconsistency > ROUTINE_INCONSISTENCY_THRESHOLD {
        suggestions.push(Suggestion::new(SuggestionKind::Routine, Priority::Medium));
    }

    if summary.dejection_streak >= DEJECTION_STREAK_THRESHOLD {
        suggestions.push(Suggestion::new(
            SuggestionKind::EmotionalSupport,
            Priority::High,
        ));
    }

    if summary.consistent_routine > POSITIVE_CONSISTENCY_THRESHOLD
        && summary.average_stress < POSITIVE_STRESS_CEILING
    {
        suggestions.push(Suggestion::new(
            SuggestionKind::PositiveReinforcement,
            Priority::Low,
        ));
    }

    if summary.weekend_dips {
        suggestions.push(Suggestion::new(
            SuggestionKind::WeekendSupport,
            Priority::Medium,
        ));
    }

    debug!("Generated {} suggestions", suggestions.len());
    suggestions
}

/// Canned conversation openers the user can pick to start a chat.
pub fn conversation_starters(summary: &PatternSummary) -> Vec<&'static str> {
    let mut starters = Vec::new();

    if summary.high_stress_frequency > STRESS_FREQUENCY_THRESHOLD {
        starters.push(
            "I've been feeling quite stressed lately and would like to talk about coping strategies.",
        );
    }
    if summary.routine_inconsistency > ROUTINE_INCONSISTENCY_THRESHOLD {
        starters.push(
            "My daily routine has been all over the place. Can you help me think through this?",
        );
    }
    if summary.dejection_streak >= DEJECTION_STREAK_THRESHOLD {
        starters.push("I've been feeling down for several days now and could use some support.");
    }

    starters
}
