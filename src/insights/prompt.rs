//! Folding suggestions into outgoing chat prompts.

use super::suggestions::Suggestion;
use crate::checkin::CheckinRecord;

/// Prepends pattern context to a user message bound for the LLM.
///
/// Only high and medium suggestions are used, joined with spaces in the order
/// given. With none of those, the message is returned unchanged. The user's
/// message always ends the prompt.
///
/// # Examples
///
/// ```
/// use moodlens::insights::augment;
///
/// assert_eq!(augment("I feel tired", &[]), "I feel tired");
/// ```
pub fn augment(user_message: &str, suggestions: &[Suggestion]) -> String {
    let context: Vec<&str> = suggestions
        .iter()
        .filter(|s| s.priority.is_actionable())
        .map(|s| s.message)
        .collect();

    if context.is_empty() {
        return user_message.to_string();
    }

    format!(
        "Context: Based on recent mood patterns: {}\n\n\
         Please respond naturally, weaving this pattern awareness in subtly if it is \
         relevant to the conversation. Do not quote it or mention the pattern analysis \
         directly unless it fits naturally.\n\n\
         User message: {}",
        context.join(" "),
        user_message
    )
}

/// Suggested first chat message after a check-in, written in the user's voice.
pub fn checkin_chat_opener(record: &CheckinRecord) -> String {
    let stress = record.stress.value();

    if let (true, Some(notes)) = (record.dejection, record.notes.as_deref()) {
        format!(
            "I just completed a mood check-in and shared that I've been feeling dejected about: {}. I'd like to talk more about this.",
            notes
        )
    } else if record.stress.is_high() {
        let routine_note = if record.routine.is_consistent() {
            ""
        } else {
            " My routine has also been off lately."
        };
        format!(
            "I just did a mood check-in and my stress level is pretty high ({}/5).{} Can you help me process this?",
            stress, routine_note
        )
    } else if !record.routine.is_consistent() {
        format!(
            "I just completed a mood check-in. My routine has been {} lately and I'm wondering how to get back on track.",
            record.routine.as_str().to_lowercase()
        )
    } else {
        "I just completed my daily mood check-in. Things are going relatively well, but I'd like to reflect on how I'm doing overall.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::Routine;
    use crate::insights::{generate, PatternSummary, SuggestionKind};
    use chrono::Utc;

    fn suggestions() -> Vec<Suggestion> {
        generate(Some(&PatternSummary {
            entries_analyzed: 5,
            average_stress: 2.0,
            high_stress_frequency: 80,
            routine_inconsistency: 80,
            consistent_routine: 20,
            dejection_frequency: 0,
            dejection_streak: 0,
            trigger_tags: Vec::new(),
            weekend_dips: false,
        }))
    }

    fn record(
        routine: Routine,
        stress: i64,
        dejection: bool,
        notes: Option<&str>,
    ) -> CheckinRecord {
        CheckinRecord::new(
            "s",
            routine,
            stress,
            dejection,
            notes.map(str::to_string),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_augment_without_suggestions_is_unchanged() {
        assert_eq!(augment("I feel tired", &[]), "I feel tired");
    }

    #[test]
    fn test_augment_ignores_low_priority_only() {
        let low = generate(Some(&PatternSummary {
            entries_analyzed: 3,
            average_stress: 1.5,
            high_stress_frequency: 0,
            routine_inconsistency: 0,
            consistent_routine: 100,
            dejection_frequency: 0,
            dejection_streak: 0,
            trigger_tags: Vec::new(),
            weekend_dips: false,
        }));
        assert_eq!(low[0].kind, SuggestionKind::PositiveReinforcement);
        assert_eq!(augment("hello", &low), "hello");
    }

    #[test]
    fn test_augment_keeps_order_and_user_message_last() {
        let suggestions = suggestions();
        let prompt = augment("Can we talk about my week?", &suggestions);

        let expected_context = format!("{} {}", suggestions[0].message, suggestions[1].message);
        assert!(prompt.contains(&expected_context));
        assert!(prompt.contains("subtly"));
        assert!(prompt.ends_with("Can we talk about my week?"));
    }

    #[test]
    fn test_opener_for_dejected_notes() {
        let opener = checkin_chat_opener(&record(Routine::Consistent, 2, true, Some("my exam")));
        assert!(opener.contains("dejected about: my exam"));
    }

    #[test]
    fn test_opener_for_high_stress_mentions_routine() {
        let opener = checkin_chat_opener(&record(Routine::TotallyOff, 5, false, None));
        assert!(opener.contains("(5/5)"));
        assert!(opener.contains("routine has also been off"));

        let opener = checkin_chat_opener(&record(Routine::Consistent, 4, false, None));
        assert!(!opener.contains("routine"));
    }

    #[test]
    fn test_opener_for_irregular_routine() {
        let opener = checkin_chat_opener(&record(Routine::PartlyOff, 2, false, None));
        assert!(opener.contains("partly off"));
    }

    #[test]
    fn test_opener_default() {
        let opener = checkin_chat_opener(&record(Routine::Consistent, 1, false, None));
        assert!(opener.contains("relatively well"));
    }
}
