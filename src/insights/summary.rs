//! Human-readable insight summary for the check-in dashboard.

use super::analyzer::{PatternSummary, TriggerTag};
use serde::Serialize;

/// Text shown on the dashboard's insight cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSummary {
    pub entries_analyzed: usize,
    pub mood_summary: String,
    pub triggers: String,
    pub actions: Vec<&'static str>,
}

impl InsightSummary {
    /// Describes a pattern summary in plain words.
    ///
    /// # Examples
    ///
    /// ```
    /// use moodlens::insights::{InsightSummary, PatternSummary};
    ///
    /// let pattern = PatternSummary {
    ///     entries_analyzed: 4,
    ///     average_stress: 1.5,
    ///     high_stress_frequency: 0,
    ///     routine_inconsistency: 0,
    ///     consistent_routine: 100,
    ///     dejection_frequency: 0,
    ///     dejection_streak: 0,
    ///     trigger_tags: vec![],
    ///     weekend_dips: false,
    /// };
    /// let summary = InsightSummary::from_pattern(&pattern);
    /// assert_eq!(summary.mood_summary, "Generally calm and relaxed");
    /// assert_eq!(summary.triggers, "None identified");
    /// ```
    pub fn from_pattern(pattern: &PatternSummary) -> Self {
        InsightSummary {
            entries_analyzed: pattern.entries_analyzed,
            mood_summary: mood_summary(pattern),
            triggers: triggers_text(&pattern.trigger_tags),
            actions: actions(pattern),
        }
    }
}

fn mood_summary(pattern: &PatternSummary) -> String {
    let stress = pattern.average_stress;
    let mut summary = if stress <= 2.0 {
        "Generally calm and relaxed"
    } else if stress <= 3.0 {
        "Moderate stress levels"
    } else if stress <= 4.0 {
        "Elevated stress levels"
    } else {
        "High stress periods"
    }
    .to_string();

    if pattern.dejection_frequency > 50 {
        summary.push_str(", frequent low moods");
    } else if pattern.dejection_frequency > 20 {
        summary.push_str(", occasional low moods");
    }
    summary
}

fn triggers_text(tags: &[TriggerTag]) -> String {
    if tags.is_empty() {
        return "None identified".to_string();
    }
    tags.iter()
        .map(TriggerTag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn actions(pattern: &PatternSummary) -> Vec<&'static str> {
    let mut actions = Vec::new();

    if pattern.average_stress > 3.5 {
        actions.push("Consider stress management techniques like deep breathing or short walks");
    }
    if pattern.dejection_frequency > 40 {
        actions.push("Try journaling or talking to someone when feeling down");
    }
    if pattern.consistent_routine < 50 {
        actions.push("Focus on maintaining a more consistent daily routine");
    }
    if pattern.consistent_routine > 70 && pattern.average_stress < 3.0 {
        actions.push("Keep up the great work with your routine!");
    }
    if pattern.trigger_tags.contains(&TriggerTag::Studies) {
        actions.push("Consider study breaks and time management techniques");
    }

    actions
}
