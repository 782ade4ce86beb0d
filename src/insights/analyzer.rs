//! Pattern analysis over recent check-ins.
//!
//! Reduces a window of check-ins into a `PatternSummary`: stress averages and
//! frequencies, routine consistency, the longest dejection streak and coarse
//! trigger tags taken from the notes of dejected check-ins.

use crate::checkin::CheckinRecord;
use crate::constants::{MIN_ANALYSIS_ENTRIES, WEEKEND_DIP_INCONSISTENCY, WEEKEND_DIP_STRESS};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Coarse life area a dejected check-in's notes point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTag {
    Studies,
    Social,
    Family,
    Work,
}

impl TriggerTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerTag::Studies => "studies",
            TriggerTag::Social => "social",
            TriggerTag::Family => "family",
            TriggerTag::Work => "work",
        }
    }
}

impl fmt::Display for TriggerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords matched as lower-case substrings of the notes.
const TRIGGER_KEYWORDS: &[(TriggerTag, &[&str])] = &[
    (TriggerTag::Studies, &["study", "exam", "school"]),
    (TriggerTag::Social, &["friend", "social"]),
    (TriggerTag::Family, &["family", "home"]),
    (TriggerTag::Work, &["work", "job"]),
];

/// Aggregate statistics over a window of check-ins.
///
/// Percentages are whole numbers in 0-100. The summary is recomputed on every
/// call and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSummary {
    /// Number of check-ins in the window.
    pub entries_analyzed: usize,
    /// Mean stress rating, rounded to one decimal.
    pub average_stress: f64,
    /// Share of check-ins rated 4 or 5.
    pub high_stress_frequency: u32,
    /// Share of check-ins whose routine was not consistent.
    pub routine_inconsistency: u32,
    /// Share of check-ins whose routine was consistent.
    pub consistent_routine: u32,
    /// Share of check-ins flagged as dejected.
    pub dejection_frequency: u32,
    /// Longest run of consecutive dejected check-ins, oldest to newest.
    pub dejection_streak: u32,
    /// Trigger areas in order of first appearance, newest check-in first,
    /// without duplicates.
    pub trigger_tags: Vec<TriggerTag>,
    /// High average stress combined with a mostly irregular routine.
    ///
    /// Despite the name this does not look at the day of the week.
    pub weekend_dips: bool,
}

/// Analyzes a window of check-ins ordered newest-first, as returned by a store.
///
/// Returns `None` when there are fewer than two check-ins, since no trend can
/// be claimed from a single data point.
///
/// # Examples
///
/// ```
/// use moodlens::checkin::{CheckinRecord, Routine};
/// use moodlens::insights::analyze;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let records = vec![
///     CheckinRecord::new("s", Routine::Consistent, 4, false, None, now)?,
///     CheckinRecord::new("s", Routine::PartlyOff, 2, false, None, now)?,
/// ];
/// let summary = analyze(&records).expect("two check-ins are enough");
/// assert_eq!(summary.average_stress, 3.0);
/// assert_eq!(summary.routine_inconsistency, 50);
/// # Ok::<(), moodlens::errors::RecordError>(())
/// ```
pub fn analyze(records: &[CheckinRecord]) -> Option<PatternSummary> {
    let total = records.len();
    if total < MIN_ANALYSIS_ENTRIES {
        debug!("Not enough check-ins for analysis: {}", total);
        return None;
    }

    let stress_sum: u32 = records.iter().map(|r| u32::from(r.stress.value())).sum();
    let high_stress = records.iter().filter(|r| r.stress.is_high()).count();
    let consistent = records.iter().filter(|r| r.routine.is_consistent()).count();
    let dejected = records.iter().filter(|r| r.dejection).count();

    let average_stress = round_one_decimal(f64::from(stress_sum) / total as f64);
    let routine_inconsistency = percentage(total - consistent, total);

    let summary = PatternSummary {
        entries_analyzed: total,
        average_stress,
        high_stress_frequency: percentage(high_stress, total),
        routine_inconsistency,
        consistent_routine: percentage(consistent, total),
        dejection_frequency: percentage(dejected, total),
        dejection_streak: longest_dejection_streak(records),
        trigger_tags: trigger_tags(records),
        weekend_dips: average_stress > WEEKEND_DIP_STRESS
            && routine_inconsistency > WEEKEND_DIP_INCONSISTENCY,
    };

    debug!("Pattern summary: {:?}", summary);
    Some(summary)
}

/// Longest chronological run of dejected check-ins.
///
/// The input is newest-first, so it is walked in reverse.
fn longest_dejection_streak(records: &[CheckinRecord]) -> u32 {
    let mut current = 0;
    let mut longest = 0;
    for record in records.iter().rev() {
        if record.dejection {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn trigger_tags(records: &[CheckinRecord]) -> Vec<TriggerTag> {
    let mut tags = Vec::new();

    for note in records
        .iter()
        .filter(|r| r.dejection)
        .filter_map(|r| r.notes.as_deref())
        .map(str::to_lowercase)
    {
        for (tag, keywords) in TRIGGER_KEYWORDS {
            if !tags.contains(tag) && keywords.iter().any(|keyword| note.contains(keyword)) {
                tags.push(*tag);
            }
        }
    }

    tags
}

fn percentage(count: usize, total: usize) -> u32 {
    (count as f64 * 100.0 / total as f64).round() as u32
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::checkin::Routine;
    use chrono::{Duration, TimeZone, Utc};

    /// Builds newest-first records from chronological `(routine, stress, dejection, notes)` tuples.
    pub(crate) fn records_newest_first(
        chronological: &[(Routine, i64, bool, Option<&str>)],
    ) -> Vec<CheckinRecord> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let mut records: Vec<CheckinRecord> = chronological
            .iter()
            .enumerate()
            .map(|(i, (routine, stress, dejection, notes))| {
                CheckinRecord::new(
                    "test-session",
                    *routine,
                    *stress,
                    *dejection,
                    notes.map(str::to_string),
                    start + Duration::days(i as i64),
                )
                .unwrap()
            })
            .collect();
        records.reverse();
        records
    }

    fn with_stress(stresses: &[i64]) -> Vec<CheckinRecord> {
        let rows: Vec<_> = stresses
            .iter()
            .map(|s| (Routine::Consistent, *s, false, None))
            .collect();
        records_newest_first(&rows)
    }

    fn with_dejection(flags: &[bool]) -> Vec<CheckinRecord> {
        let rows: Vec<_> = flags
            .iter()
            .map(|d| (Routine::Consistent, 2, *d, None))
            .collect();
        records_newest_first(&rows)
    }

    #[test]
    fn test_fewer_than_two_records_is_none() {
        assert!(analyze(&[]).is_none());
        assert!(analyze(&with_stress(&[3])).is_none());
        assert!(analyze(&with_stress(&[3, 3])).is_some());
    }

    #[test]
    fn test_average_stress_rounding() {
        assert_eq!(analyze(&with_stress(&[2, 4])).unwrap().average_stress, 3.0);
        assert_eq!(analyze(&with_stress(&[5, 5, 5])).unwrap().average_stress, 5.0);
        // 7 / 3 = 2.333...
        assert_eq!(analyze(&with_stress(&[2, 2, 3])).unwrap().average_stress, 2.3);
    }

    #[test]
    fn test_high_stress_frequency_rounds_to_whole_percent() {
        let summary = analyze(&with_stress(&[5, 2, 5])).unwrap();
        assert_eq!(summary.high_stress_frequency, 67);
        assert_eq!(summary.entries_analyzed, 3);
    }

    #[test]
    fn test_routine_percentages_are_complementary() {
        let records = records_newest_first(&[
            (Routine::Consistent, 2, false, None),
            (Routine::PartlyOff, 2, false, None),
            (Routine::TotallyOff, 2, false, None),
            (Routine::Consistent, 2, false, None),
        ]);
        let summary = analyze(&records).unwrap();
        assert_eq!(summary.consistent_routine, 50);
        assert_eq!(summary.routine_inconsistency, 50);
    }

    #[test]
    fn test_dejection_streak_counts_chronologically() {
        let records = with_dejection(&[true, true, false, true, true, true]);
        let summary = analyze(&records).unwrap();
        assert_eq!(summary.dejection_streak, 3);
        assert_eq!(summary.dejection_frequency, 83);
    }

    #[test]
    fn test_dejection_streak_zero_without_dejection() {
        let summary = analyze(&with_dejection(&[false, false, false])).unwrap();
        assert_eq!(summary.dejection_streak, 0);
    }

    #[test]
    fn test_trigger_tags_from_dejected_notes() {
        let records = records_newest_first(&[
            (Routine::Consistent, 3, true, Some("Failed my EXAM and fought with a friend")),
            (Routine::Consistent, 3, true, Some("work was rough, exam tomorrow")),
            (Routine::Consistent, 3, false, Some("family dinner")),
        ]);
        let summary = analyze(&records).unwrap();
        // The newest note is read first; table order applies within one note.
        assert_eq!(
            summary.trigger_tags,
            vec![TriggerTag::Studies, TriggerTag::Work, TriggerTag::Social]
        );
    }

    #[test]
    fn test_trigger_tags_follow_recency() {
        let records = records_newest_first(&[
            (Routine::PartlyOff, 4, true, Some("school project")),
            (Routine::PartlyOff, 4, true, Some("job interview")),
        ]);
        let summary = analyze(&records).unwrap();
        assert_eq!(
            summary.trigger_tags,
            vec![TriggerTag::Work, TriggerTag::Studies]
        );
    }

    #[test]
    fn test_weekend_dips_threshold() {
        let irregular_and_stressed = records_newest_first(&[
            (Routine::TotallyOff, 4, false, None),
            (Routine::PartlyOff, 4, false, None),
            (Routine::Consistent, 4, false, None),
        ]);
        assert!(analyze(&irregular_and_stressed).unwrap().weekend_dips);

        let regular_and_stressed = records_newest_first(&[
            (Routine::Consistent, 5, false, None),
            (Routine::Consistent, 5, false, None),
            (Routine::PartlyOff, 5, false, None),
        ]);
        assert!(!analyze(&regular_and_stressed).unwrap().weekend_dips);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let records = with_dejection(&[true, false, true, true]);
        assert_eq!(analyze(&records), analyze(&records));
    }

    #[test]
    fn test_high_stress_consistent_week() {
        let summary = analyze(&with_stress(&[5, 4, 5, 4, 5])).unwrap();
        assert_eq!(summary.average_stress, 4.6);
        assert_eq!(summary.high_stress_frequency, 100);
        assert_eq!(summary.consistent_routine, 100);
        assert_eq!(summary.routine_inconsistency, 0);
        assert!(!summary.weekend_dips);
    }
}
