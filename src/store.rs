//! Check-in storage seam.
//!
//! The insight engine only needs to read the most recent check-ins of a session.
//! `CheckinStore` is that seam; the SQLite database implements it for the
//! application and `MemoryCheckinStore` implements it for tests and embedding.

use crate::checkin::{CheckinRecord, StoredCheckin};
use crate::errors::{AppResult, DatabaseError};
use std::sync::Mutex;
use tracing::debug;

/// Persists and retrieves check-ins for a session.
pub trait CheckinStore {
    /// Stores a validated check-in.
    fn insert(&self, record: &CheckinRecord) -> AppResult<()>;

    /// Returns up to `limit` check-ins for `session_id`, newest first.
    ///
    /// Returns an empty list when the session has no check-ins. Rows are
    /// returned as stored; validation is left to the caller.
    fn fetch_recent(&self, session_id: &str, limit: usize) -> AppResult<Vec<StoredCheckin>>;
}

/// In-memory store keeping rows in insertion order.
#[derive(Debug, Default)]
pub struct MemoryCheckinStore {
    rows: Mutex<Vec<StoredCheckin>>,
}

impl MemoryCheckinStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row as-is, without validation.
    pub fn push_row(&self, row: StoredCheckin) -> AppResult<()> {
        self.rows()?.push(row);
        Ok(())
    }

    fn rows(&self) -> AppResult<std::sync::MutexGuard<'_, Vec<StoredCheckin>>> {
        self.rows.lock().map_err(|_| {
            DatabaseError::Custom("In-memory check-in store is poisoned".to_string()).into()
        })
    }
}

impl CheckinStore for MemoryCheckinStore {
    fn insert(&self, record: &CheckinRecord) -> AppResult<()> {
        self.push_row(StoredCheckin::from(record))
    }

    fn fetch_recent(&self, session_id: &str, limit: usize) -> AppResult<Vec<StoredCheckin>> {
        let rows = self.rows()?;
        let recent: Vec<StoredCheckin> = rows
            .iter()
            .rev()
            .filter(|row| row.session_id.as_deref() == Some(session_id))
            .take(limit)
            .cloned()
            .collect();
        debug!("Fetched {} in-memory check-ins", recent.len());
        Ok(recent)
    }
}
