//! SQLite-backed note store implementation.

mod connection;
mod notes;
mod users;


use rusqlite::Connection;
use std::sync::Mutex;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed note and account store.
///
/// The connection sits behind a mutex so one store can be shared by every
/// HTTP worker; each repository call holds the lock for its whole statement
/// sequence.
pub struct SqliteStore {
    pub(crate) conn: Mutex<Connection>,
}

/// Returns true if `err` is a UNIQUE violation on `column` (`table.column`).
pub(crate) fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(msg)) => {
            e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE && msg.contains(column)
        }
        _ => false,
    }
}
