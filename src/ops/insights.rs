//! Printing the insights dashboard.

use crate::errors::AppResult;
use crate::insights::{DashboardInsights, InsightEngine};
use crate::store::CheckinStore;
use std::io::{self, Write};
use tracing::info;

/// Prints the dashboard for a session, as text or as JSON.
///
/// With fewer than three usable check-ins the text output says so and the
/// JSON output is `null`.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn show_insights<S: CheckinStore + ?Sized, W: Write>(
    engine: &InsightEngine<'_, S>,
    session_id: &str,
    json: bool,
    out: &mut W,
) -> AppResult<()> {
    let dashboard = engine.dashboard(session_id);
    info!(
        "Showing insights (available: {}, json: {})",
        dashboard.is_some(),
        json
    );

    if json {
        serde_json::to_writer_pretty(&mut *out, &dashboard).map_err(io::Error::from)?;
        writeln!(out)?;
        return Ok(());
    }

    match &dashboard {
        Some(dashboard) => render_dashboard(dashboard, out),
        None => {
            writeln!(
                out,
                "Not enough check-ins yet. Add at least 3 to start seeing patterns."
            )?;
            Ok(())
        }
    }
}

/// Writes the dashboard panel as plain text.
pub fn render_dashboard<W: Write>(dashboard: &DashboardInsights, out: &mut W) -> AppResult<()> {
    let summary = &dashboard.summary;

    writeln!(
        out,
        "📊 Insights from your last {} check-ins",
        summary.entries_analyzed
    )?;
    writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    writeln!(out, "Mood:     {}", summary.mood_summary)?;
    writeln!(out, "Triggers: {}", summary.triggers)?;

    if !summary.actions.is_empty() {
        writeln!(out, "\nSmall steps to try:")?;
        for action in &summary.actions {
            writeln!(out, "  • {}", action)?;
        }
    }

    if !dashboard.suggestions.is_empty() {
        writeln!(out, "\nSuggestions:")?;
        for suggestion in &dashboard.suggestions {
            writeln!(out, "  • [{}] {}", suggestion.priority.as_str(), suggestion.message)?;
        }
    }

    if !dashboard.conversation_starters.is_empty() {
        writeln!(out, "\nThings you could bring up in chat:")?;
        for starter in &dashboard.conversation_starters {
            writeln!(out, "  • \"{}\"", starter)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::{CheckinRecord, Routine};
    use crate::store::MemoryCheckinStore;
    use chrono::{Duration, TimeZone, Utc};

    fn store_with(days: &[(Routine, i64, bool)]) -> MemoryCheckinStore {
        let store = MemoryCheckinStore::new();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap();
        for (i, (routine, stress, dejected)) in days.iter().enumerate() {
            let record = CheckinRecord::new(
                "s",
                *routine,
                *stress,
                *dejected,
                dejected.then(|| "work is piling up".to_string()),
                start + Duration::days(i as i64),
            )
            .unwrap();
            store.insert(&record).unwrap();
        }
        store
    }

    fn render(store: &MemoryCheckinStore, json: bool) -> String {
        let engine = InsightEngine::new(store);
        let mut out = Vec::new();
        show_insights(&engine, "s", json, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_not_enough_checkins() {
        let store = store_with(&[(Routine::Consistent, 2, false)]);
        assert!(render(&store, false).contains("Not enough check-ins"));
        assert_eq!(render(&store, true).trim(), "null");
    }

    #[test]
    fn test_text_dashboard() {
        let store = store_with(&[
            (Routine::TotallyOff, 5, true),
            (Routine::TotallyOff, 4, true),
            (Routine::PartlyOff, 5, true),
        ]);
        let text = render(&store, false);

        assert!(text.contains("last 3 check-ins"));
        assert!(text.contains("Triggers: work"));
        assert!(text.contains("[high]"));
        assert!(text.contains("Things you could bring up in chat"));
    }

    #[test]
    fn test_json_dashboard() {
        let store = store_with(&[
            (Routine::Consistent, 1, false),
            (Routine::Consistent, 2, false),
            (Routine::Consistent, 1, false),
        ]);
        let value: serde_json::Value = serde_json::from_str(&render(&store, true)).unwrap();

        assert_eq!(value["summary"]["entries_analyzed"], 3);
        assert_eq!(value["summary"]["mood_summary"], "Generally calm and relaxed");
        // Praise is low priority and stays off the dashboard.
        assert_eq!(value["suggestions"], serde_json::json!([]));
        assert_eq!(value["conversation_starters"], serde_json::json!([]));
    }
}
