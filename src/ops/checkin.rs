//! Submitting a mood check-in.
//!
//! Storing the check-in is the primary action and its failure is reported.
//! The insight refresh that follows is best-effort.

use super::insights::render_dashboard;
use crate::checkin::{CheckinRecord, Routine};
use crate::errors::AppResult;
use crate::insights::{
    checkin_chat_opener, DashboardInsights, DeliverySession, InsightEngine, Suggestion,
};
use crate::store::CheckinStore;
use chrono::Utc;
use std::io::Write;
use tracing::info;

/// What the user entered on the check-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinInput {
    pub routine: Routine,
    pub stress: i64,
    pub dejected: bool,
    pub notes: Option<String>,
}

/// Result of a stored check-in.
#[derive(Debug)]
pub struct CheckinOutcome {
    pub record: CheckinRecord,
    /// Fresh suggestions, in rule order.
    pub suggestions: Vec<Suggestion>,
    /// Present once the session has enough check-ins.
    pub dashboard: Option<DashboardInsights>,
    /// Suggested first message for a follow-up chat.
    pub chat_opener: String,
}

/// Validates and stores a check-in, then refreshes the session's insights.
///
/// Actionable suggestions are handed to `delivery` so a chat started in the
/// same process surfaces them first.
///
/// # Errors
///
/// Returns an error if the input is invalid or the store rejects the write.
pub fn submit_checkin<S: CheckinStore + ?Sized>(
    store: &S,
    engine: &InsightEngine<'_, S>,
    session_id: &str,
    input: CheckinInput,
    delivery: &mut DeliverySession,
) -> AppResult<CheckinOutcome> {
    let record = CheckinRecord::new(
        session_id,
        input.routine,
        input.stress,
        input.dejected,
        input.notes,
        Utc::now(),
    )?;

    store.insert(&record)?;
    info!("Stored check-in");

    let suggestions = engine.on_checkin_stored(session_id, delivery);
    let dashboard = engine.dashboard(session_id);
    let chat_opener = checkin_chat_opener(&record);

    Ok(CheckinOutcome {
        record,
        suggestions,
        dashboard,
        chat_opener,
    })
}

/// Writes the confirmation, the dashboard and the suggested chat opener.
pub fn render_outcome<W: Write>(outcome: &CheckinOutcome, out: &mut W) -> AppResult<()> {
    let record = &outcome.record;
    writeln!(
        out,
        "✅ Check-in saved: routine {}, stress {}/5{}",
        record.routine.as_str().to_lowercase(),
        record.stress.value(),
        if record.dejection { ", feeling down" } else { "" }
    )?;
    writeln!(out)?;

    match &outcome.dashboard {
        Some(dashboard) => render_dashboard(dashboard, out)?,
        None => writeln!(
            out,
            "Keep checking in. Patterns show up after a few entries."
        )?,
    }

    writeln!(out, "\n💬 Want to talk about it? Try opening with:")?;
    writeln!(out, "  \"{}\"", outcome.chat_opener)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, RecordError};
    use crate::insights::SuggestionKind;
    use crate::store::MemoryCheckinStore;

    fn input(routine: Routine, stress: i64, dejected: bool, notes: Option<&str>) -> CheckinInput {
        CheckinInput {
            routine,
            stress,
            dejected,
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_first_checkin_has_no_dashboard() {
        let store = MemoryCheckinStore::new();
        let engine = InsightEngine::new(&store);
        let mut delivery = DeliverySession::new();

        let outcome = submit_checkin(
            &store,
            &engine,
            "s",
            input(Routine::Consistent, 2, false, None),
            &mut delivery,
        )
        .unwrap();

        assert!(outcome.suggestions.is_empty());
        assert!(outcome.dashboard.is_none());
        assert!(delivery.take_pending().is_empty());

        let mut out = Vec::new();
        render_outcome(&outcome, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Check-in saved: routine consistent, stress 2/5"));
        assert!(text.contains("Keep checking in"));
    }

    #[test]
    fn test_invalid_stress_is_rejected_before_storing() {
        let store = MemoryCheckinStore::new();
        let engine = InsightEngine::new(&store);
        let mut delivery = DeliverySession::new();

        let result = submit_checkin(
            &store,
            &engine,
            "s",
            input(Routine::Consistent, 9, false, None),
            &mut delivery,
        );

        assert!(matches!(
            result,
            Err(AppError::Checkin(RecordError::StressOutOfRange(9)))
        ));
        assert!(store.fetch_recent("s", 10).unwrap().is_empty());
    }

    #[test]
    fn test_struggling_streak_hands_off_to_chat() {
        let store = MemoryCheckinStore::new();
        let engine = InsightEngine::new(&store);
        let mut delivery = DeliverySession::new();

        let mut last = None;
        for _ in 0..3 {
            last = Some(
                submit_checkin(
                    &store,
                    &engine,
                    "s",
                    input(Routine::TotallyOff, 5, true, Some("exam tomorrow")),
                    &mut delivery,
                )
                .unwrap(),
            );
        }
        let outcome = last.unwrap();

        assert!(outcome.dashboard.is_some());
        assert!(outcome.chat_opener.contains("exam tomorrow"));
        let pending = delivery.take_pending();
        assert_eq!(pending[0].kind, SuggestionKind::StressManagement);

        let mut out = Vec::new();
        render_outcome(&outcome, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("feeling down"));
        assert!(text.contains("Insights from your last 3 check-ins"));
    }
}
