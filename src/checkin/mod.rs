//! Mood check-in records.
//!
//! A check-in is one mood snapshot: how the day's routine went, a stress rating
//! on a 1-5 scale, whether the user felt dejected and, only in that case, a
//! free-text note. `CheckinRecord` is the validated form the analyzer works on;
//! `StoredCheckin` is the loose row shape read back from a store, where any
//! field may be missing or malformed.

use crate::constants::{HIGH_STRESS_RATING, STRESS_MAX, STRESS_MIN};
use crate::errors::RecordError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How closely the day followed the user's usual routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Routine {
    Consistent,
    PartlyOff,
    TotallyOff,
}

impl Routine {
    /// Convert to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Routine::Consistent => "Consistent",
            Routine::PartlyOff => "Partly off",
            Routine::TotallyOff => "Totally off",
        }
    }

    pub fn is_consistent(&self) -> bool {
        matches!(self, Routine::Consistent)
    }
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Routine {
    type Err = RecordError;

    /// Parses the stored representation, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consistent" => Ok(Routine::Consistent),
            "partly off" => Ok(Routine::PartlyOff),
            "totally off" => Ok(Routine::TotallyOff),
            _ => Err(RecordError::InvalidRoutine(s.to_string())),
        }
    }
}

/// A stress rating on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct StressLevel(u8);

impl StressLevel {
    /// Validates a raw rating.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::StressOutOfRange` for values outside 1-5.
    pub fn new(value: i64) -> Result<Self, RecordError> {
        if (i64::from(STRESS_MIN)..=i64::from(STRESS_MAX)).contains(&value) {
            Ok(StressLevel(value as u8))
        } else {
            Err(RecordError::StressOutOfRange(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Ratings of 4 and 5 count as high stress.
    pub fn is_high(&self) -> bool {
        self.0 >= HIGH_STRESS_RATING
    }
}

impl TryFrom<i64> for StressLevel {
    type Error = RecordError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        StressLevel::new(value)
    }
}

impl From<StressLevel> for u8 {
    fn from(level: StressLevel) -> Self {
        level.0
    }
}

/// A validated mood check-in.
///
/// Records are immutable once built; `notes` is only ever `Some` when
/// `dejection` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub session_id: String,
    pub routine: Routine,
    pub stress: StressLevel,
    pub dejection: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CheckinRecord {
    /// Builds a record, dropping notes that were given without dejection and
    /// treating blank notes as absent.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::StressOutOfRange` when `stress` is not 1-5.
    ///
    /// # Examples
    ///
    /// ```
    /// use moodlens::checkin::{CheckinRecord, Routine};
    /// use chrono::Utc;
    ///
    /// let record = CheckinRecord::new(
    ///     "session-1",
    ///     Routine::Consistent,
    ///     2,
    ///     false,
    ///     Some("ignored without dejection".to_string()),
    ///     Utc::now(),
    /// )?;
    /// assert!(record.notes.is_none());
    /// # Ok::<(), moodlens::errors::RecordError>(())
    /// ```
    pub fn new(
        session_id: impl Into<String>,
        routine: Routine,
        stress: i64,
        dejection: bool,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RecordError> {
        let notes = if dejection {
            notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
        } else {
            None
        };

        Ok(CheckinRecord {
            session_id: session_id.into(),
            routine,
            stress: StressLevel::new(stress)?,
            dejection,
            notes,
            created_at,
        })
    }
}

/// A check-in row as read back from a store.
///
/// Every column is optional so that incomplete rows can be loaded and then
/// rejected one at a time by `CheckinRecord::try_from`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredCheckin {
    pub session_id: Option<String>,
    pub routine: Option<String>,
    pub stress: Option<i64>,
    pub dejection: Option<bool>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

impl From<&CheckinRecord> for StoredCheckin {
    fn from(record: &CheckinRecord) -> Self {
        StoredCheckin {
            session_id: Some(record.session_id.clone()),
            routine: Some(record.routine.as_str().to_string()),
            stress: Some(i64::from(record.stress.value())),
            dejection: Some(record.dejection),
            notes: record.notes.clone(),
            created_at: Some(record.created_at.to_rfc3339()),
        }
    }
}

impl TryFrom<StoredCheckin> for CheckinRecord {
    type Error = RecordError;

    fn try_from(row: StoredCheckin) -> Result<Self, Self::Error> {
        let session_id = row.session_id.ok_or(RecordError::MissingField("session_id"))?;
        let routine: Routine = row
            .routine
            .ok_or(RecordError::MissingField("routine"))?
            .parse()?;
        let stress = row.stress.ok_or(RecordError::MissingField("stress"))?;
        let dejection = row.dejection.ok_or(RecordError::MissingField("dejection"))?;
        let created_at =
            parse_timestamp(&row.created_at.ok_or(RecordError::MissingField("created_at"))?)?;

        CheckinRecord::new(session_id, routine, stress, dejection, row.notes, created_at)
    }
}

/// Accepts RFC 3339 timestamps and SQLite's `CURRENT_TIMESTAMP` format (UTC).
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RecordError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| RecordError::InvalidTimestamp(raw.to_string()))
}
