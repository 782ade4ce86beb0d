//! Check-in insert and query operations.

use super::Database;
use crate::checkin::{CheckinRecord, StoredCheckin};
use crate::errors::{AppResult, DatabaseError};
use crate::store::CheckinStore;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use tracing::debug;

/// Inserts a check-in and returns its row id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn insert_checkin(conn: &Connection, record: &CheckinRecord) -> AppResult<i64> {
    debug!(
        "Inserting check-in (routine: {}, stress: {})",
        record.routine,
        record.stress.value()
    );

    conn.execute(
        r#"
        INSERT INTO checkins (session_id, routine, stress, dejection, notes, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            record.session_id,
            record.routine.as_str(),
            record.stress.value(),
            record.dejection,
            record.notes,
            record.created_at.to_rfc3339(),
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    let id = conn.last_insert_rowid();
    debug!("Check-in inserted with id {}", id);
    Ok(id)
}

/// Lists the most recent check-ins of a session, newest first.
///
/// Rows are ordered by the instant in `created_at`, so RFC 3339 values and
/// SQLite's `YYYY-MM-DD HH:MM:SS` default sort together. Column values of the
/// wrong type are read as missing rather than failing the whole query.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn recent_checkins(
    conn: &Connection,
    session_id: &str,
    limit: usize,
) -> AppResult<Vec<StoredCheckin>> {
    debug!("Listing up to {} recent check-ins", limit);

    let mut stmt = conn
        .prepare(
            r#"
            SELECT session_id, routine, stress, dejection, notes, created_at
            FROM checkins
            WHERE session_id = ?1
            ORDER BY julianday(created_at) DESC, id DESC
            LIMIT ?2
            "#,
        )
        .map_err(DatabaseError::Sqlite)?;

    let rows = stmt
        .query_map(params![session_id, limit as i64], stored_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    Ok(rows)
}

fn stored_from_row(row: &Row<'_>) -> rusqlite::Result<StoredCheckin> {
    Ok(StoredCheckin {
        session_id: text(row.get_ref(0)?),
        routine: text(row.get_ref(1)?),
        stress: integer(row.get_ref(2)?),
        dejection: boolean(row.get_ref(3)?),
        notes: text(row.get_ref(4)?),
        created_at: text(row.get_ref(5)?),
    })
}

fn text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().map(str::to_string),
        _ => None,
    }
}

fn integer(value: ValueRef<'_>) -> Option<i64> {
    match value {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
        _ => None,
    }
}

fn boolean(value: ValueRef<'_>) -> Option<bool> {
    match value {
        ValueRef::Integer(i) => Some(i != 0),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes).ok()?.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

impl CheckinStore for Database {
    fn insert(&self, record: &CheckinRecord) -> AppResult<()> {
        let conn = self.get_conn()?;
        insert_checkin(&conn, record)?;
        Ok(())
    }

    fn fetch_recent(&self, session_id: &str, limit: usize) -> AppResult<Vec<StoredCheckin>> {
        let conn = self.get_conn()?;
        recent_checkins(&conn, session_id, limit)
    }
}
